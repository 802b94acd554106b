//! Style diagnostics and their compiler-like rendering.
//!
//! A rendered diagnostic spans five lines, the same layout gfortran uses for
//! warnings, so editors that parse compiler output can jump to it:
//!
//! ```text
//! file.f90:3:4:
//!
//!  do i=1,10
//!      1
//! Warning: Missing spaces at (1).
//! ```

use std::fmt;

/// One reported style violation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File identifier used only for labelling
    pub filename: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the match on the re-indented line, which can differ
    /// from the position in `source_line` when indentation changed
    pub column: usize,
    /// The original line, terminator removed
    pub source_line: String,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        filename: &str,
        line: usize,
        column: usize,
        source_line: &str,
        message: &str,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
            source_line: source_line.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:\n\n {}\n {}1\nWarning: {} at (1).",
            self.filename,
            self.line,
            self.column,
            self.source_line,
            " ".repeat(self.column),
            self.message
        )
    }
}
