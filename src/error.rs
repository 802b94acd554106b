//! Error types and result aliases for fortran-linter.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the file-level glue
//! - [`LintError`]: Construction-time failures of the rule corpus and checker

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// Errors raised while building a rule corpus or a line checker.
///
/// These are always fatal: no line is processed with an invalid corpus.
#[derive(Debug, Error)]
pub enum LintError {
    /// A rule pattern failed to compile.
    #[error("invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A replacement template refers to a capture group the pattern lacks.
    #[error("invalid replacement template `{template}` for `{pattern}`: {source}")]
    InvalidTemplate {
        template: String,
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
