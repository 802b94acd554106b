//! Lexical helpers for Fortran source lines.
//!
//! This module provides the infrastructure shared by the rule engine and the
//! indenter:
//! - [`spans`]: String literal spans, comment offset and code masking for one line
//! - [`patterns`]: Precompiled regex patterns for Fortran block structure
//!
//! Nothing here parses Fortran. Each function looks at a single line and
//! answers "which bytes are quoted text" and "where does the comment start".

pub mod patterns;
pub mod spans;

pub use spans::{
    code_only, comment_offset, in_string, split_line_ending, string_literals, string_spans, Span,
};
