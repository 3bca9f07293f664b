//! Line-level edits of the shared schedule file

use crate::domain::entities::DirectivePattern;

use super::block_mutator::Edit;

/// Append `line` unless the file already holds it verbatim.
///
/// A file missing its final newline gets one first so lines never merge.
pub fn append_directive(content: &str, line: &str) -> Edit {
    if content.lines().any(|l| l == line) {
        return Edit {
            text: content.to_string(),
            changed: false,
        };
    }

    let mut text = String::with_capacity(content.len() + line.len() + 2);
    text.push_str(content);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(line);
    text.push('\n');
    Edit {
        text,
        changed: true,
    }
}

/// Drop every line matching `pattern`; returns the edit and how many went
pub fn strip_directive(content: &str, pattern: &DirectivePattern) -> (Edit, usize) {
    let lines: Vec<&str> = content.split('\n').collect();
    let kept: Vec<&str> = lines.iter().copied().filter(|l| !pattern.matches(l)).collect();
    let removed = lines.len() - kept.len();
    let edit = if removed == 0 {
        Edit {
            text: content.to_string(),
            changed: false,
        }
    } else {
        Edit {
            text: kept.join("\n"),
            changed: true,
        }
    };
    (edit, removed)
}

/// Lines that look like scheduled entries (no blanks, no comments)
pub fn scheduled_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}
