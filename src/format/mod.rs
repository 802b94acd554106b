//! Fortran source layout.
//!
//! - [`indenter`]: Rebuilds leading whitespace from block depth (IF/DO/MODULE/etc.)

pub mod indenter;

pub use indenter::{indent_lines, F90Indenter, IndentState};
