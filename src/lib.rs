//! fortran-linter - Style checker and auto-fixer for modern Fortran source code
//!
//! Re-indents each file from its block structure, then runs an ordered
//! set of style rules on every line, fixing what can be fixed safely and
//! reporting the rest as compiler-style warnings.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;
pub mod rules;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs, OutputMode};
pub use config::Config;
pub use diagnostic::Diagnostic;
pub use error::{LintError, Result};
pub use process::{check_source, CheckReport, LineChecker, LineRecord};
pub use rules::RuleCorpus;
