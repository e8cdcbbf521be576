//! In-memory line buffer for one source file.

use std::ops::Range;

/// An ordered sequence of text lines that can be rendered back byte-for-byte.
///
/// Lines are split on `\n` only; a `\r` belonging to a CRLF ending stays part
/// of the line text, so untouched lines survive unchanged. Lines inserted by
/// the rewriter adopt the file's ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    lines: Vec<String>,
    trailing_newline: bool,
    crlf: bool,
}

impl SourceFile {
    /// Split file content into lines.
    pub fn from_text(content: &str) -> Self {
        if content.is_empty() {
            return Self {
                lines: Vec::new(),
                trailing_newline: false,
                crlf: false,
            };
        }

        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let trailing_newline = content.ends_with('\n');
        if trailing_newline {
            lines.pop();
        }
        let crlf = lines.first().is_some_and(|l| l.ends_with('\r'));

        Self {
            lines,
            trailing_newline,
            crlf,
        }
    }

    /// Render the buffer back into file content.
    pub fn to_text(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the file uses CRLF line endings (judged by its first line).
    pub fn is_crlf(&self) -> bool {
        self.crlf
    }

    /// Insert lines before index `at`, appending `\r` for CRLF files.
    pub(crate) fn insert_lines(&mut self, at: usize, new_lines: &[String]) {
        let suffix = if self.crlf { "\r" } else { "" };
        let at = at.min(self.lines.len());
        self.lines.splice(
            at..at,
            new_lines.iter().map(|line| format!("{}{}", line, suffix)),
        );
    }

    pub(crate) fn remove_lines(&mut self, range: Range<usize>) {
        let end = range.end.min(self.lines.len());
        self.lines.drain(range.start.min(end)..end);
    }

    /// Rewrite every line in place.
    pub(crate) fn map_lines<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        for line in &mut self.lines {
            if let Some(replacement) = f(line) {
                *line = replacement;
            }
        }
    }
}

impl From<&str> for SourceFile {
    fn from(content: &str) -> Self {
        Self::from_text(content)
    }
}
