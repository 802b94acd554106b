/// Built-in Fortran style rules
///
/// The corpus is an ordered list of top-level nodes. Every top-level node
/// runs on every line; groups inside it short-circuit on their first
/// matching child. Order matters: old-style kinds are rewritten before the
/// operator rules see the `*`, and `do` loops are spaced before the
/// generic `=` rules.
use crate::config::Config;
use crate::error::LintError;
use crate::rules::node::{Correction, Pattern, Rule, RuleNode};

/// Intrinsic types that accept an old-style `TYPE*kind` suffix
const TYPES: &[&str] = &["real", "character", "logical", "integer"];

/// Operators, longest alternatives first so `<=` wins over `<`
const OPERATORS: &[&str] = &[
    r"\.eq\.",
    r"\.ne\.",
    r"\.gt\.",
    r"\.ge\.",
    r"\.lt\.",
    r"\.le\.",
    r"\.and\.",
    r"\.or\.",
    r"\.eqv\.",
    r"\.neqv\.",
    r"==",
    r"/=",
    r"<=",
    r">=",
    r"<",
    r">",
    r"\*\*",
    r"//",
    r"\+",
    r"-",
    r"\*",
    r"/",
];

/// Keywords that take a parenthesised argument
const STRUCTS: &[&str] = &["if", "elseif", "case", "while", "where", "forall"];

/// Constructs whose `END` may be glued to the keyword (`enddo`)
const END_CONSTRUCTS: &[&str] = &[
    "if",
    "do",
    "select",
    "subroutine",
    "function",
    "module",
    "program",
    "type",
    "interface",
    "where",
    "forall",
    "associate",
    "block",
    "critical",
    "enum",
    "submodule",
];

/// Statements where `/`, `*` and `-` are not arithmetic
const NON_ARITHMETIC_SKIP: &str = r"^\s*(?:data|common|namelist)\b|\bformat\s*\(";

/// Ordered, immutable set of rules used by one checker
#[derive(Debug, Clone)]
pub struct RuleCorpus {
    nodes: Vec<RuleNode>,
}

fn leaf(pattern: Pattern, correction: Correction, message: &str) -> Result<RuleNode, LintError> {
    Ok(RuleNode::Leaf(Rule::new(
        pattern,
        correction,
        Some(message.to_string()),
    )?))
}

fn fix(pattern: &str, template: &str, message: &str) -> Result<RuleNode, LintError> {
    leaf(
        Pattern::new(pattern)?,
        Correction::Template(template.to_string()),
        message,
    )
}

fn fix_nocase(pattern: &str, template: &str, message: &str) -> Result<RuleNode, LintError> {
    leaf(
        Pattern::case_insensitive(pattern)?,
        Correction::Template(template.to_string()),
        message,
    )
}

fn detect(pattern: Pattern, message: &str) -> Result<RuleNode, LintError> {
    leaf(pattern, Correction::DetectOnly, message)
}

/// Silent detect-only leaf, used as the exception at the head of a group
fn skip(pattern: Pattern) -> Result<RuleNode, LintError> {
    Ok(RuleNode::Leaf(Rule::new(
        pattern,
        Correction::DetectOnly,
        None,
    )?))
}

fn lowercase_match(text: &str, _caps: &fancy_regex::Captures<'_>) -> String {
    text.to_lowercase()
}

impl RuleCorpus {
    /// Build the built-in corpus for `config`.
    pub fn new(config: &Config) -> Result<Self, LintError> {
        if let Some(message) = config.validate() {
            return Err(LintError::InvalidConfig(message));
        }

        let types = TYPES.join("|");
        let operators = OPERATORS.join("|");
        let structs = STRUCTS.join("|");
        let ends = END_CONSTRUCTS.join("|");
        let line_length = config.max_line_length;

        let equal_skips = || -> Result<Vec<RuleNode>, LintError> {
            Ok(vec![
                skip(Pattern::case_insensitive(r"\((kind|len)=")?)?,
                skip(Pattern::case_insensitive(
                    r"(write|read|open|close|inquire)\s*\(.*\)",
                )?)?,
                skip(Pattern::new("::")?)?,
            ])
        };

        let mut equal_after = equal_skips()?;
        equal_after.push(fix(
            r#"(?<![=<>/])=(\w|\(|\.|\+|-|'|")"#,
            "= ${1}",
            r#"Missing space after "=""#,
        )?);
        let mut equal_before = equal_skips()?;
        equal_before.push(fix(
            r"(\w|\)|\.)=(?![=>])",
            "${1} =",
            r#"Missing space before "=""#,
        )?);

        let nodes = vec![
            fix(
                &format!(r"\b({types})\*(?:(\w+)|\((\*|\w+)\))"),
                "${1}(${2}${3})",
                "Use new syntax TYPE(kind)",
            )?,
            fix_nocase(
                r"(?<=do )(?<!\wdo )(\w+)=(\S+),(\S+)",
                "${1} = ${2}, ${3}",
                "Missing spaces",
            )?,
            RuleNode::Group(vec![
                skip(Pattern::case_insensitive(NON_ARITHMETIC_SKIP)?)?,
                fix_nocase(
                    &format!(r"(?<=[\w)])(?<![0-9.][eEdD])(?P<op>{operators})(?!\))"),
                    " ${op}",
                    "Missing space before operator",
                )?,
            ]),
            RuleNode::Group(vec![
                skip(Pattern::case_insensitive(NON_ARITHMETIC_SKIP)?)?,
                fix_nocase(
                    &format!(r"(?<=[\w)] )(?P<op>{operators})(?=[\w(])"),
                    "${op} ",
                    "Missing space after operator",
                )?,
            ]),
            fix(r"(?<=[\w)])=>", " =>", "Missing space before operator")?,
            fix(r"=>(?=[\w(])", "=> ", "Missing space after operator")?,
            fix(r"(\S)::", "${1} ::", "Missing space before separator")?,
            fix(r"::(\S)", ":: ${1}", "Missing space after separator")?,
            fix(r"(,|\)|;)(\w)", "${1} ${2}", "Missing space after punctuation")?,
            leaf(
                Pattern::new(&format!(
                    r"\b(?:{})\b(?=.*::)",
                    types.to_uppercase()
                ))?,
                Correction::Callback(lowercase_match),
                "Types should be lowercased",
            )?,
            fix_nocase(
                &format!(r"\b({structs})\("),
                "${1} (",
                "Missing space before parenthesis",
            )?,
            fix(
                r"^(\s*)use omp_lib",
                "${1}!$$ use omp_lib",
                r#"Should prepend with "!$""#,
            )?,
            detect(
                Pattern::new(&format!(r"^.{{{line_length}}}.+$"))?,
                &format!("Line length > {line_length} characters"),
            )?,
            fix(r"\t", "  ", "Should use 2 spaces instead of tabulation")?,
            fix(r"([^\s!])(?=!)", "${1} ", "At least one space before comment")?,
            fix(
                r"(?<!!)!([!<>]?)(?:[ \t]{2,})?([^\s!<>$])",
                "!${1} ${2}",
                "Exactly one space after comment",
            )?,
            fix(r";\s*$", "", r#"Useless ";" at end of line"#)?,
            RuleNode::Group(vec![
                skip(Pattern::new("#endif")?)?,
                fix_nocase(
                    &format!(r"\b(end)({ends})\b"),
                    "${1} ${2}",
                    "Missing space after `end'",
                )?,
            ]),
            RuleNode::Group(equal_after),
            RuleNode::Group(equal_before),
            fix(r"[ \t]+$", "", "Trailing whitespaces")?,
            detect(
                Pattern::case_insensitive(r"\(kind\s*=\s*\d\s*\)")?,
                r#"You should use "sp" or "dp" instead"#,
            )?,
            fix(r"\(/([^/)]*)/\)", "[${1}]", r#"You should use "[]" instead"#)?,
            RuleNode::Group(vec![
                skip(Pattern::new(r"!\$")?)?,
                fix_nocase(
                    r"^(\s*)(call\s+|\w+\s*=\s*)(?=omp_)",
                    "${1}!$$ ${2}",
                    "Should prepend OpenMP calls with !$",
                )?,
            ]),
            detect(
                Pattern::case_insensitive(r#"include\s*["']mpif\.h["']"#)?,
                "Should use `use mpi_f08` instead (or `use mpi` if not available)",
            )?,
        ];

        log::debug!(
            "Built rule corpus: {} top-level nodes, {} rules",
            nodes.len(),
            nodes.iter().map(RuleNode::leaf_count).sum::<usize>()
        );

        Ok(Self { nodes })
    }

    /// Build a corpus from caller-supplied nodes.
    #[must_use]
    pub fn from_nodes(nodes: Vec<RuleNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in evaluation order
    #[must_use]
    pub fn nodes(&self) -> &[RuleNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
