/// Block-structure keywords recognised by the indenter
///
/// Each regex is case-insensitive and is matched against
/// the code part of a line (see [`crate::parser::code_only`]) with any
/// statement label already removed, so string contents and comments never
/// reach them.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// # Panics
///
/// On an invalid pattern, at first access of the static. Every static here
/// is exercised by the tests below.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

const EOL_STR: &str = r"\s*;?\s*$"; // End of line
const SOL_STR: &str = r"^\s*"; // Start of line
const NAME_STR: &str = r"(\w+\s*:\s*)?"; // Optional construct name

// ===== IMMEDIATE DEDENTERS =====
// Close one branch and open a sibling: shallower line, unchanged depth.

// ELSE, ELSE IF, ELSEIF, ELSEWHERE, ELSE WHERE
pub static ELSE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}ELSE(\s*IF|\s*WHERE)?\b")));

// CASE (...), CASE DEFAULT, RANK (...), TYPE IS, CLASS IS, CLASS DEFAULT
pub static CASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}((CASE|RANK)\s*(\(|DEFAULT\b)|(TYPE|CLASS)\s+IS\s*\(|CLASS\s+DEFAULT\b)"
    ))
});

// CONTAINS
pub static CONTAINS_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}CONTAINS{EOL_STR}")));

// ===== DEDENTERS =====

// Bare END, or END followed by the construct it closes and an optional name
pub static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}END(\s*(IF|DO|SELECT|SUBROUTINE|FUNCTION|MODULE|SUBMODULE|PROGRAM|TYPE|INTERFACE|BLOCK(\s*DATA)?|ASSOCIATE|WHERE|FORALL|CRITICAL|ENUM)(\s+\S.*)?)?{EOL_STR}"
    ))
});

// ===== INDENTERS =====

// IF (...) THEN on a single line
pub static IF_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}{NAME_STR}IF\s*\(.*\)\s*THEN{EOL_STR}"
    ))
});

// Start of an IF whose condition may continue on the next lines
pub static IF_START_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{NAME_STR}IF\s*\(")));

// Final line of a continued IF (...) THEN
pub static THEN_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"\)\s*THEN{EOL_STR}")));

// DO, DO WHILE, DO CONCURRENT, DO i = ... (labelled DO 10 excluded)
pub static DO_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}{NAME_STR}DO(\s+[a-z_]|{EOL_STR})"
    ))
});

// SELECT CASE/RANK/TYPE
pub static SELECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}{NAME_STR}SELECT\s*(CASE|RANK|TYPE)\s*\("
    ))
});

// SUBROUTINE, with any prefix (PURE, RECURSIVE, MODULE, ...)
pub static SUBR_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}(\w[\w(),*=\s]*\s)?SUBROUTINE\s+\w+"
    ))
});

// FUNCTION, with any prefix including a result type
pub static FCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}(\w[\w(),*=\s]*\s)?FUNCTION\s+\w+\s*\("
    ))
});

// MODULE (MODULE PROCEDURE has two words and does not match)
pub static MOD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}MODULE\s+\w+{EOL_STR}")));

// SUBMODULE
pub static SMOD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}SUBMODULE\s*\(")));

// PROGRAM
pub static PROG_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}PROGRAM\s+\w+{EOL_STR}")));

// TYPE definition (not TYPE(...) declarations, not TYPE IS)
pub static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}TYPE(\s*,[^:]*::|\s*::|\s+)\s*\w+{EOL_STR}"
    ))
});

// INTERFACE
pub static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}(ABSTRACT\s+)?INTERFACE\b")));

// ENUM
pub static ENUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}ENUM(\s*,\s*BIND\s*\(\s*C\s*\))?{EOL_STR}"
    ))
});

// BLOCK, BLOCK DATA
pub static BLK_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"{SOL_STR}({NAME_STR}BLOCK|BLOCK\s*DATA(\s+\w+)?){EOL_STR}"
    ))
});

// ASSOCIATE
pub static ASSOCIATE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{NAME_STR}ASSOCIATE\s*\(")));

// CRITICAL
pub static CRITICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{NAME_STR}CRITICAL{EOL_STR}")));

// WHERE / FORALL header; only a construct when nothing follows the mask
pub static MASKED_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{SOL_STR}{NAME_STR}(WHERE|FORALL)\s*\(")));

// ===== LINE STRUCTURE =====

// Trailing continuation marker (applied to code with the comment removed)
pub static LINEBREAK_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"&\s*$"));

// Statement label: numeric prefix like "100 " followed by a statement
pub static STATEMENT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*(\d+)\s+\S"));

// C preprocessor line
pub static CPP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*#"));
