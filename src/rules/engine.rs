/// Rule engine: applies a rule corpus to a single line
///
/// Every leaf collects its matches on the current working line, then
/// handles them right to left so that rewriting one match never shifts the
/// offsets of the matches still waiting on its left. A correction is kept
/// only if the string literals of the line are unchanged afterwards.
use fancy_regex::Captures;

use crate::diagnostic::Diagnostic;
use crate::parser::{comment_offset, split_line_ending, string_literals};
use crate::rules::corpus::RuleCorpus;
use crate::rules::node::{Rule, RuleNode};

/// Where a line comes from, for diagnostics and literal checks
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub filename: &'a str,
    /// 1-based line number
    pub line_number: usize,
    /// The untouched source line, terminator allowed
    pub original: &'a str,
}

/// Result of running the corpus on one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOutcome {
    /// Corrected line, terminator preserved
    pub corrected: String,
    /// Matches seen, including rejected corrections and silent group heads
    pub matches: usize,
    /// Accepted corrections that changed the text
    pub modifications: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Working state while one line goes through the corpus
struct LinePass<'a> {
    ctx: &'a LineContext<'a>,
    source_line: &'a str,
    original_literals: Vec<&'a str>,
    line: String,
    modifications: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LinePass<'a> {
    fn new(ctx: &'a LineContext<'a>, line: &str) -> Self {
        let (source_line, _) = split_line_ending(ctx.original);
        Self {
            ctx,
            source_line,
            original_literals: string_literals(source_line).collect(),
            line: line.to_string(),
            modifications: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Evaluate one node and return how many matches it produced.
    ///
    /// Inside a group, the first child with at least one match ends the
    /// group. Top-level nodes are evaluated by the caller one after the
    /// other and never short-circuit each other.
    fn eval_node(&mut self, node: &RuleNode) -> usize {
        match node {
            RuleNode::Leaf(rule) => self.eval_rule(rule),
            RuleNode::Group(children) => {
                let mut total = 0;
                for child in children {
                    let matches = self.eval_node(child);
                    total += matches;
                    if matches > 0 {
                        break;
                    }
                }
                total
            }
        }
    }

    fn eval_rule(&mut self, rule: &Rule) -> usize {
        let comment_start = comment_offset(&self.line);
        let mut fixes: Vec<(usize, usize, Option<String>)> = Vec::new();

        for caps in rule.pattern.regex().captures_iter(&self.line) {
            let caps: Captures<'_> = match caps {
                Ok(caps) => caps,
                Err(e) => {
                    log::warn!(
                        "{}:{}: rule `{}` aborted: {e}",
                        self.ctx.filename,
                        self.ctx.line_number,
                        rule.pattern.as_str()
                    );
                    break;
                }
            };
            let Some(whole) = caps.get(0) else { continue };
            // Never rewrite inside a comment, but allow a match on the marker itself
            if whole.start() > comment_start {
                continue;
            }
            fixes.push((whole.start(), whole.end(), rule.correction.apply(&caps)));
        }

        let matches = fixes.len();
        for (start, end, replacement) in fixes.into_iter().rev() {
            let candidate = match replacement {
                Some(replacement) => {
                    let mut candidate = String::with_capacity(self.line.len() + replacement.len());
                    candidate.push_str(&self.line[..start]);
                    candidate.push_str(&replacement);
                    candidate.push_str(&self.line[end..]);
                    candidate
                }
                None => self.line.clone(),
            };

            if !string_literals(&candidate).eq(self.original_literals.iter().copied()) {
                log::debug!(
                    "{}:{}: rejected correction that alters a string literal: {:?}",
                    self.ctx.filename,
                    self.ctx.line_number,
                    candidate
                );
                continue;
            }

            if let Some(message) = &rule.message {
                let column = self.line[..start].chars().count() + 1;
                self.diagnostics.push(Diagnostic::new(
                    self.ctx.filename,
                    self.ctx.line_number,
                    column,
                    self.source_line,
                    message,
                ));
            }
            if candidate != self.line {
                self.modifications += 1;
                self.line = candidate;
            }
        }

        matches
    }
}

/// Run every top-level node of `corpus` on `line`.
///
/// `line` is the text to correct (usually the re-indented line) and
/// `ctx.original` the source line whose string literals must survive.
/// Line terminators are set aside during matching so `$` anchors the end
/// of the text, and put back on the corrected line.
#[must_use]
pub fn check_line(corpus: &RuleCorpus, ctx: &LineContext<'_>, line: &str) -> LineOutcome {
    let (body, ending) = split_line_ending(line);
    let mut pass = LinePass::new(ctx, body);

    let mut matches = 0;
    for node in corpus.nodes() {
        matches += pass.eval_node(node);
    }

    let mut corrected = pass.line;
    corrected.push_str(ending);
    LineOutcome {
        corrected,
        matches,
        modifications: pass.modifications,
        diagnostics: pass.diagnostics,
    }
}
