//! File checking pipeline.
//!
//! This module runs the two passes over one file:
//!
//! **Pass 1 - Indentation:**
//! - Track block depth (IF/DO/MODULE/etc.) and continuation state
//! - Rebuild the leading whitespace of every line from that depth
//!
//! **Pass 2 - Rules:**
//! - Run the rule corpus on each re-indented line
//! - Keep only corrections that leave string literals intact
//! - Collect diagnostics against the original line
//!
//! The main entry point is [`LineChecker`], built once from a [`crate::Config`]
//! and reused for every file.

pub mod pipeline;

pub use pipeline::{check_source, CheckReport, LineChecker, LineRecord};
