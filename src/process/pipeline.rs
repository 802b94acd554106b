//! Two-pass checking pipeline
//!
//! Implements the per-file checking pipeline:
//! - Pass 1 (optional): Indentation of every line, independent of corrections
//! - Pass 2: Rule corpus on each (original, indented) line pair

use std::io::BufRead;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::format::indent_lines;
use crate::rules::{check_line, LineContext, RuleCorpus};
use crate::Result;

/// One line as it moves through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Source text, terminator included
    pub original: String,
    /// After the indentation pass
    pub indented: String,
    /// After the rule corpus
    pub corrected: String,
}

/// Everything found while checking one file
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub filename: String,
    pub records: Vec<LineRecord>,
    /// In line order, then rule order, then right to left within a rule
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
    pub modification_count: usize,
}

impl CheckReport {
    pub fn corrected_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.corrected.as_str())
    }

    /// The corrected file contents
    #[must_use]
    pub fn corrected_text(&self) -> String {
        self.corrected_lines().collect()
    }

    /// True when the corrected text differs from the source
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.records.iter().any(|r| r.corrected != r.original)
    }

    /// Rendered diagnostics separated by newlines, at most `max` of them
    #[must_use]
    pub fn render_diagnostics(&self, max: Option<usize>) -> String {
        let limit = max.unwrap_or(self.diagnostics.len());
        self.diagnostics
            .iter()
            .take(limit)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Checks files against one rule corpus.
///
/// Holds no per-file state, so one checker can serve many files, including
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct LineChecker {
    config: Config,
    corpus: RuleCorpus,
}

impl LineChecker {
    /// Validate `config` and build the rule corpus.
    pub fn new(config: &Config) -> std::result::Result<Self, LintError> {
        if let Some(message) = config.validate() {
            return Err(LintError::InvalidConfig(message));
        }
        Ok(Self {
            config: config.clone(),
            corpus: RuleCorpus::new(config)?,
        })
    }

    /// Check one file given as lines that keep their terminators.
    #[must_use]
    pub fn check<S: AsRef<str>>(&self, filename: &str, lines: &[S]) -> CheckReport {
        let indented: Vec<String> = if self.config.impose_indent {
            indent_lines(lines, self.config.indent_unit)
        } else {
            lines.iter().map(|l| l.as_ref().to_string()).collect()
        };

        let mut report = CheckReport {
            filename: filename.to_string(),
            ..Default::default()
        };

        for (index, (original, indented)) in lines.iter().zip(indented).enumerate() {
            let original = original.as_ref();
            let ctx = LineContext {
                filename,
                line_number: index + 1,
                original,
            };
            let outcome = check_line(&self.corpus, &ctx, &indented);

            if indented != original {
                report.modification_count += 1;
            }
            report.modification_count += outcome.modifications;
            report.error_count += outcome.diagnostics.len();
            report.diagnostics.extend(outcome.diagnostics);
            report.records.push(LineRecord {
                original: original.to_string(),
                indented,
                corrected: outcome.corrected,
            });
        }

        log::debug!(
            "{filename}: {} lines, {} diagnostics, {} modifications",
            report.records.len(),
            report.error_count,
            report.modification_count
        );
        report
    }

    /// Check in-memory source text
    #[must_use]
    pub fn check_source(&self, filename: &str, source: &str) -> CheckReport {
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        self.check(filename, &lines)
    }

    /// Read all of `input` and check it
    pub fn check_reader<R: BufRead>(&self, filename: &str, mut input: R) -> Result<CheckReport> {
        let mut source = String::new();
        input.read_to_string(&mut source)?;
        Ok(self.check_source(filename, &source))
    }
}

/// Build a checker for `config` and run it on `source`
pub fn check_source(source: &str, filename: &str, config: &Config) -> Result<CheckReport> {
    let checker = LineChecker::new(config)?;
    Ok(checker.check_source(filename, source))
}
