/// String literal and comment boundary detection for a single line
///
/// This is a lexical shortcut, not a tokenizer: it only knows enough about
/// Fortran to tell which byte ranges are quoted text and where the comment
/// begins. Everything that rewrites a line relies on it to stay out of
/// string literals and comments.
use std::sync::LazyLock;

use regex::Regex;

/// A quoted literal: opening quote, then either an escaped quote of the same
/// kind or any other character, lazily, up to the first closing quote.
static STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'(?:\\'|[^'\n])*?'|"(?:\\"|[^"\n])*?""#).expect("string literal pattern")
});

/// Half-open byte range `(start, end)` of one string literal, quotes included
pub type Span = (usize, usize);

/// Lazily iterate over the string literal spans of `line`, left to right.
///
/// Spans never overlap. A quote preceded by a backslash does not close
/// the literal it appears in.
pub fn string_spans(line: &str) -> impl Iterator<Item = Span> + '_ {
    STRING_RE.find_iter(line).map(|m| (m.start(), m.end()))
}

/// Iterate over the text of every string literal of `line`, quotes included.
pub fn string_literals(line: &str) -> impl Iterator<Item = &str> + '_ {
    STRING_RE.find_iter(line).map(|m| m.as_str())
}

/// True when `pos` lies strictly inside one of `spans`.
#[must_use]
pub fn in_string(pos: usize, spans: &[Span]) -> bool {
    spans.iter().any(|&(start, end)| start < pos && pos < end)
}

/// Byte offset where the comment of `line` starts, or `line.len()` if the
/// whole line is code.
///
/// A `#` that is the first non-blank character makes the whole line a
/// (preprocessor) comment. Otherwise the first `!` outside any string
/// literal starts the comment.
#[must_use]
pub fn comment_offset(line: &str) -> usize {
    let indent = line.len() - line.trim_start().len();
    if line[indent..].starts_with('#') {
        return indent;
    }

    let spans: Vec<Span> = string_spans(line).collect();
    line.match_indices('!')
        .map(|(pos, _)| pos)
        .find(|&pos| !in_string(pos, &spans))
        .unwrap_or(line.len())
}

/// Split a physical line into its body and its terminator (`\n`, `\r\n` or
/// nothing).
#[must_use]
pub fn split_line_ending(line: &str) -> (&str, &str) {
    let body = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    line.split_at(body.len())
}

/// The code part of `line`: everything before the comment, with the contents
/// of every string literal blanked to an empty `''` so keyword patterns
/// cannot see inside them.
#[must_use]
pub fn code_only(line: &str) -> String {
    let code = &line[..comment_offset(line)];
    let mut masked = String::with_capacity(code.len());
    let mut last = 0;
    for (start, end) in string_spans(code) {
        masked.push_str(&code[last..start]);
        masked.push_str("''");
        last = end;
    }
    masked.push_str(&code[last..]);
    masked
}
