//! Style rules for Fortran source lines.
//!
//! - [`node`]: Rule tree building blocks ([`Pattern`], [`Correction`], [`Rule`], [`RuleNode`])
//! - [`corpus`]: The built-in Fortran rule set, parameterised by [`crate::Config`]
//! - [`engine`]: Applies a corpus to one line, guarding string literals and comments

pub mod corpus;
pub mod engine;
pub mod node;

pub use corpus::RuleCorpus;
pub use engine::{check_line, LineContext, LineOutcome};
pub use node::{Correction, CorrectionFn, Pattern, Rule, RuleNode};
