//! Folding of backslash-continued directives into logical lines.

use crate::classify::{LineClass, classify_line, strip_comments};

/// A logical line: one physical line, or a directive plus its continuation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalLine {
    /// Index of the first physical line.
    pub start: usize,
    /// Number of physical lines consumed.
    pub len: usize,
    /// Classification of the first physical line.
    pub class: LineClass,
}

impl LogicalLine {
    /// Index one past the last physical line.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

fn ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Number of physical lines making up the directive starting at `start`.
///
/// Always at least 1; a trailing `\` on the last line of the file simply
/// ends the directive there.
pub fn continuation_len<S: AsRef<str>>(lines: &[S], start: usize) -> usize {
    let mut idx = start;
    while idx + 1 < lines.len() && ends_with_continuation(lines[idx].as_ref()) {
        idx += 1;
    }
    idx - start + 1
}

/// Classify a file into logical lines.
///
/// Directive depth updates are applied once per logical line, so a
/// multi-line `#if A && \` condition is never counted twice.
pub fn logical_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LogicalLine> {
    let mut units = Vec::with_capacity(lines.len());
    let mut in_comment = false;
    let mut idx = 0;

    while idx < lines.len() {
        let (mut class, mut ends) = classify_line(lines[idx].as_ref(), in_comment);
        let len = if class.directive.is_directive() {
            continuation_len(lines, idx)
        } else {
            1
        };

        for line in &lines[idx + 1..idx + len] {
            let (_, still_open) = strip_comments(line.as_ref(), ends);
            ends = still_open;
        }
        if len > 1 {
            class.opens_block_comment = ends;
        }

        units.push(LogicalLine {
            start: idx,
            len,
            class,
        });
        in_comment = ends;
        idx += len;
    }

    units
}
