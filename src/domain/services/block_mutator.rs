//! Block Mutator
//!
//! Edits one line inside a fragment's brace-delimited block without touching
//! the rest of the document. Block boundaries are found by scanning the
//! current text on every call; nothing is cached between mutations.

use std::fmt;
use std::ops::Range;

/// Line range of a top-level block.
///
/// `start` is the opening line, `end` is one past the closing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    /// Lines strictly between the delimiters
    pub fn body(&self) -> Range<usize> {
        self.start + 1..self.end - 1
    }
}

/// Why a block could not be located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// No top-level block opens with the anchor
    AnchorNotFound,
    /// A block opens with the anchor but its delimiters are broken
    Malformed(String),
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::AnchorNotFound => write!(f, "anchor block not found"),
            BlockError::Malformed(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for BlockError {}

/// Result of a text edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    /// `false` when the input already had the desired shape
    pub changed: bool,
}

impl Edit {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            changed: false,
        }
    }
}

/// Count structural `{` and `}` on a line.
///
/// Braces inside quoted tokens and after a `#` comment marker are ignored.
fn brace_counts(line: &str) -> (i64, i64) {
    let mut opens = 0;
    let mut closes = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev_is_space = true;

    for c in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev_is_space = false;
            continue;
        }
        match c {
            '"' | '`' => quote = Some(c),
            '#' if prev_is_space => break,
            '{' => opens += 1,
            '}' => closes += 1,
            _ => {}
        }
        prev_is_space = c.is_whitespace();
    }
    (opens, closes)
}

/// The part of `line` before an unquoted ` #` comment
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev_is_space = true;

    for (i, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev_is_space = false;
            continue;
        }
        match c {
            '"' | '`' => quote = Some(c),
            '#' if prev_is_space => return &line[..i],
            _ => {}
        }
        prev_is_space = c.is_whitespace();
    }
    line
}

/// Does this line open a block whose address list names `anchor`?
fn opens_block_for(line: &str, anchor: &str) -> bool {
    let Some(head) = strip_comment(line).trim().strip_suffix('{') else {
        return false;
    };
    head.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .strip_prefix("https://")
                .or_else(|| token.strip_prefix("http://"))
                .unwrap_or(token)
        })
        .any(|token| token == anchor)
}

/// Locate the single top-level block opened by `anchor`.
pub fn find_block(lines: &[&str], anchor: &str) -> Result<BlockSpan, BlockError> {
    let mut depth: i64 = 0;
    let mut span: Option<BlockSpan> = None;
    let mut open_at: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let (opens, closes) = brace_counts(line);

        if let Some(start) = open_at {
            depth += opens - closes;
            if depth == 0 {
                span = Some(BlockSpan { start, end: i + 1 });
                open_at = None;
            } else if depth < 0 {
                return Err(BlockError::Malformed(format!(
                    "unexpected '}}' on line {} closing the '{}' block",
                    i + 1,
                    anchor
                )));
            }
            continue;
        }

        if depth == 0 && opens_block_for(line, anchor) {
            if span.is_some() {
                return Err(BlockError::Malformed(format!(
                    "second top-level '{}' block on line {}",
                    anchor,
                    i + 1
                )));
            }
            depth = opens - closes;
            if depth <= 0 {
                return Err(BlockError::Malformed(format!(
                    "'{}' block opens and closes on line {}",
                    anchor,
                    i + 1
                )));
            }
            open_at = Some(i);
            continue;
        }

        depth = (depth + opens - closes).max(0);
    }

    if let Some(start) = open_at {
        return Err(BlockError::Malformed(format!(
            "'{}' block opened on line {} is never closed",
            anchor,
            start + 1
        )));
    }
    span.ok_or(BlockError::AnchorNotFound)
}

/// True when some line of `text`, trimmed, equals `line` trimmed
pub fn contains_line(text: &str, line: &str) -> bool {
    let needle = line.trim();
    text.split('\n').any(|l| l.trim() == needle)
}

/// Insert `line` as the first body line of the `anchor` block.
///
/// No-op when the line is already present anywhere in the fragment. The new
/// line takes the indentation of the current first body line, or one tab
/// deeper than the opening line when the body is empty.
pub fn insert_line(text: &str, anchor: &str, line: &str) -> Result<Edit, BlockError> {
    if contains_line(text, line) {
        return Ok(Edit::unchanged(text));
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    let span = find_block(&lines, anchor)?;

    let indent = lines[span.body()]
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l).to_string())
        .unwrap_or_else(|| format!("{}\t", leading_whitespace(lines[span.start])));
    let new_line = format!("{}{}", indent, line.trim());
    lines.insert(span.start + 1, &new_line);

    Ok(Edit {
        text: lines.join("\n"),
        changed: true,
    })
}

/// Remove every line whose trimmed content equals `line`, anywhere in the
/// fragment, then collapse runs of blank lines left behind.
pub fn remove_line(text: &str, line: &str) -> Edit {
    let target = line.trim();
    if target.is_empty() {
        return Edit::unchanged(text);
    }

    let all: Vec<&str> = text.split('\n').collect();
    let kept: Vec<&str> = all.iter().copied().filter(|l| l.trim() != target).collect();
    if kept.len() == all.len() {
        return Edit::unchanged(text);
    }

    let mut collapsed: Vec<&str> = Vec::with_capacity(kept.len());
    for l in kept {
        let blank = l.trim().is_empty();
        let prev_blank = collapsed.last().is_some_and(|p: &&str| p.trim().is_empty());
        if blank && prev_blank {
            continue;
        }
        collapsed.push(l);
    }

    Edit {
        text: collapsed.join("\n"),
        changed: true,
    }
}

/// Arguments of every `<name> ...` line, in document order
pub fn directive_arguments(text: &str, name: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| {
            let mut parts = l.trim().splitn(2, char::is_whitespace);
            match (parts.next(), parts.next()) {
                (Some(head), Some(rest)) if head == name => Some(rest.trim().to_string()),
                _ => None,
            }
        })
        .collect()
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}
