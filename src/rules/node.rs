/// Rule tree building blocks: patterns, corrections, leaves and groups
use std::fmt;

use fancy_regex::{Captures, Expander, Regex};

use crate::error::LintError;

/// A compiled pattern for one syntactic shape.
///
/// Backed by `fancy_regex` because several rules need lookahead and
/// lookbehind to describe the context around a match.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a case-sensitive pattern.
    pub fn new(pattern: &str) -> Result<Self, LintError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| LintError::InvalidPattern {
                pattern: pattern.to_string(),
                source: Box::new(source),
            })
    }

    /// Compile a pattern that ignores ASCII and Unicode case.
    pub fn case_insensitive(pattern: &str) -> Result<Self, LintError> {
        Self::new(&format!("(?i){pattern}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Pure function computing a replacement from the matched text and its captures
pub type CorrectionFn = fn(&str, &Captures<'_>) -> String;

/// How a match is rewritten.
#[derive(Clone)]
pub enum Correction {
    /// Report only, never rewrite
    DetectOnly,
    /// Capture-group template (`${1}`, `${name}`, `$$` for a literal `$`)
    Template(String),
    /// Replacement computed by a function
    Callback(CorrectionFn),
}

impl fmt::Debug for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::DetectOnly => f.write_str("DetectOnly"),
            Correction::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Correction::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl Correction {
    /// Replacement text for one match, or `None` for detect-only rules.
    #[must_use]
    pub fn apply(&self, caps: &Captures<'_>) -> Option<String> {
        let whole = caps.get(0)?;
        match self {
            Correction::DetectOnly => None,
            Correction::Template(template) => Some(Expander::default().expansion(template, caps)),
            Correction::Callback(callback) => Some(callback(whole.as_str(), caps)),
        }
    }
}

/// A single detect-and-fix unit.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub correction: Correction,
    pub message: Option<String>,
}

impl Rule {
    /// Build a rule, checking that a template only names groups the pattern has.
    pub fn new(
        pattern: Pattern,
        correction: Correction,
        message: Option<String>,
    ) -> Result<Self, LintError> {
        if let Correction::Template(template) = &correction {
            Expander::default()
                .check(template, pattern.regex())
                .map_err(|source| LintError::InvalidTemplate {
                    template: template.clone(),
                    pattern: pattern.as_str().to_string(),
                    source: Box::new(source),
                })?;
        }
        Ok(Self {
            pattern,
            correction,
            message: message.filter(|m| !m.is_empty()),
        })
    }
}

/// A node of the rule corpus.
///
/// Groups try their children in order and stop at the first child that
/// matched at least once, which lets a leading detect-only child act as an
/// exception for the rules after it.
#[derive(Debug, Clone)]
pub enum RuleNode {
    Leaf(Rule),
    Group(Vec<RuleNode>),
}

impl RuleNode {
    /// Number of leaves below this node
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            RuleNode::Leaf(_) => 1,
            RuleNode::Group(children) => children.iter().map(RuleNode::leaf_count).sum(),
        }
    }
}

impl From<Rule> for RuleNode {
    fn from(rule: Rule) -> Self {
        RuleNode::Leaf(rule)
    }
}
