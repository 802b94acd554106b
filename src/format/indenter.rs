/// `F90Indenter` - Block-depth indentation state machine
///
/// Walks a file line by line, tracking how many blocks (IF, DO, MODULE,
/// etc.) are open and whether the current statement continues on the next
/// line. Each line's leading whitespace is rebuilt from that depth.
use crate::parser::patterns::{
    ASSOCIATE_RE, BLK_RE, CASE_RE, CONTAINS_RE, CPP_LINE_RE, CRITICAL_RE, DO_RE, ELSE_RE, END_RE,
    ENUM_RE, FCT_RE, IF_RE, IF_START_RE, INTERFACE_RE, LINEBREAK_RE, MASKED_RE, MOD_RE, PROG_RE,
    SELECT_RE, SMOD_RE, STATEMENT_LABEL_RE, SUBR_RE, THEN_RE, TYPE_RE,
};
use crate::parser::{code_only, split_line_ending};

/// Running indentation state, owned by one [`F90Indenter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentState {
    /// Number of open blocks plus one while inside a continued statement
    pub depth: usize,
    /// True when the previous code line ended with `&`
    pub continuation: bool,
}

/// How a statement-start line affects block depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEffect {
    /// Sibling clause (`else`, `case`, `contains`): drawn one level out
    Sibling,
    /// Block end: depth drops before the line is drawn
    Close,
    /// Block start: depth grows after the line is drawn
    Open,
    None,
}

/// `F90Indenter` re-indents one file. Create a fresh one per file.
#[derive(Debug, Clone)]
pub struct F90Indenter {
    state: IndentState,
    /// Spaces per depth level
    unit: usize,
    /// A continued `if (` is waiting for its `) then`
    pending_then: bool,
    /// Lines seen so far, for log messages
    line_number: usize,
}

/// True when the mask of a WHERE/FORALL header closes at the end of the
/// statement, i.e. the header opens a construct instead of being a
/// single-statement form like `where (a > 0) a = 0`.
fn is_masked_construct(code: &str) -> bool {
    let Some(header) = MASKED_RE.find(code) else {
        return false;
    };
    // The header match ends just after the opening parenthesis
    let mut level = 1usize;
    for (offset, c) in code[header.end()..].char_indices() {
        match c {
            '(' => level += 1,
            ')' => {
                level -= 1;
                if level == 0 {
                    let rest = code[header.end() + offset + 1..].trim();
                    return rest.is_empty() || rest == ";";
                }
            }
            _ => {}
        }
    }
    false
}

fn classify(code: &str) -> BlockEffect {
    if ELSE_RE.is_match(code) || CASE_RE.is_match(code) || CONTAINS_RE.is_match(code) {
        return BlockEffect::Sibling;
    }
    if END_RE.is_match(code) {
        return BlockEffect::Close;
    }
    let opens = [
        &IF_RE,
        &DO_RE,
        &SELECT_RE,
        &SUBR_RE,
        &FCT_RE,
        &MOD_RE,
        &SMOD_RE,
        &PROG_RE,
        &TYPE_RE,
        &INTERFACE_RE,
        &ENUM_RE,
        &BLK_RE,
        &ASSOCIATE_RE,
        &CRITICAL_RE,
    ]
    .iter()
    .any(|re| re.is_match(code));
    if opens || is_masked_construct(code) {
        BlockEffect::Open
    } else {
        BlockEffect::None
    }
}

impl F90Indenter {
    /// Create an indenter at depth 0, using `unit` spaces per level
    #[must_use]
    pub fn new(unit: usize) -> Self {
        Self {
            state: IndentState::default(),
            unit,
            pending_then: false,
            line_number: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> IndentState {
        self.state
    }

    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.state.depth
    }

    /// Re-indent one physical line (terminator kept) and advance the state.
    ///
    /// Blank lines and preprocessor lines come back unchanged. Comment-only
    /// lines are drawn at the current depth and leave the state alone.
    pub fn indent_line(&mut self, line: &str) -> String {
        self.line_number += 1;
        let (body, ending) = split_line_ending(line);
        let content = body.trim_start();
        if content.trim_end().is_empty() || CPP_LINE_RE.is_match(body) {
            return line.to_string();
        }
        if code_only(content).trim().is_empty() {
            return self.render(self.state.depth, None, content, ending);
        }

        let (label, statement) = if self.state.continuation {
            (None, content)
        } else {
            match STATEMENT_LABEL_RE
                .captures(content)
                .and_then(|caps| caps.get(1))
            {
                Some(m) => (
                    Some(&content[..m.end()]),
                    content[m.end()..].trim_start(),
                ),
                None => (None, content),
            }
        };

        let code = code_only(statement);
        let continues = LINEBREAK_RE.is_match(&code);
        let depth = self.state.depth;
        let mut draw_depth = depth;
        let mut next_depth = depth;

        if !self.state.continuation {
            match classify(&code) {
                BlockEffect::Sibling => draw_depth = depth.saturating_sub(1),
                BlockEffect::Close => {
                    if depth == 0 {
                        log::debug!(
                            "line {}: block end without an open block: {}",
                            self.line_number,
                            statement.trim_end()
                        );
                    }
                    next_depth = depth.saturating_sub(1);
                    draw_depth = next_depth;
                }
                BlockEffect::Open => next_depth += 1,
                BlockEffect::None => {
                    self.pending_then = continues && IF_START_RE.is_match(&code);
                }
            }
            if continues {
                next_depth += 1;
                self.state.continuation = true;
            }
        } else if !continues {
            if self.pending_then && THEN_RE.is_match(&code) {
                next_depth += 1;
            }
            self.pending_then = false;
            next_depth = next_depth.saturating_sub(1);
            self.state.continuation = false;
        }

        self.state.depth = next_depth;
        self.render(draw_depth, label, statement, ending)
    }

    fn render(&self, depth: usize, label: Option<&str>, statement: &str, ending: &str) -> String {
        let width = depth * self.unit;
        match label {
            None => format!("{}{statement}{ending}", " ".repeat(width)),
            Some(label) => {
                let pad = width.saturating_sub(label.len()).max(1);
                format!("{label}{}{statement}{ending}", " ".repeat(pad))
            }
        }
    }
}

/// Re-indent a whole file with a fresh [`F90Indenter`]
#[must_use]
pub fn indent_lines<S: AsRef<str>>(lines: &[S], unit: usize) -> Vec<String> {
    let mut indenter = F90Indenter::new(unit);
    lines
        .iter()
        .map(|line| indenter.indent_line(line.as_ref()))
        .collect()
}
