//! Span calculation: where namespace wrappers may legally begin and end.
//!
//! The calculator walks the logical lines of a file in two modes. While no
//! namespace is open it only tracks `#if` depth and waits for the first line
//! of ordinary code. While a namespace is open it watches for the points
//! that force it shut:
//!
//! - the `#endif`, `#else` or `#elif` of the conditional level the namespace
//!   was opened in,
//! - an `#include` whose target is not in the ignore table (the span then
//!   backs up past any `#if` levels opened inside it),
//! - end of file.
//!
//! An `extern` line directly bracketed by `#if` lines before and the same
//! number of `#endif` lines after (the `extern "C" {` guard idiom) moves the
//! opening back onto the first of those `#if` lines, so the guard is never
//! split across the namespace boundary.
//!
//! A boundary may never land on a line that begins inside a block comment
//! (code after a multi-line comment's `*/`): the marker would end up in the
//! comment, so such files are rejected with `BoundaryInComment`.

use tracing::debug;

use crate::classify::{DirectiveKind, include_target};
use crate::continuation::{LogicalLine, logical_lines};
use crate::error::{Error, Result};
use crate::ignore::IgnoreSet;
use crate::nesting::{NestingTracker, Span};

/// Compute the ordered, disjoint spans to wrap in a namespace.
pub fn compute_spans<S: AsRef<str>>(lines: &[S], ignore: &IgnoreSet) -> Result<Vec<Span>> {
    SpanCalculator::new(lines, ignore).run()
}

pub struct SpanCalculator<'a, S> {
    lines: &'a [S],
    units: Vec<LogicalLine>,
    ignore: &'a IgnoreSet,
    tracker: NestingTracker,
    spans: Vec<Span>,
    in_header: bool,
}

impl<'a, S: AsRef<str>> SpanCalculator<'a, S> {
    pub fn new(lines: &'a [S], ignore: &'a IgnoreSet) -> Self {
        Self {
            lines,
            units: logical_lines(lines),
            ignore,
            tracker: NestingTracker::new(),
            spans: Vec::new(),
            in_header: true,
        }
    }

    pub fn run(mut self) -> Result<Vec<Span>> {
        for idx in 0..self.units.len() {
            if self.tracker.is_open() {
                self.step_open(idx)?;
            } else {
                self.step_closed(idx)?;
            }
        }
        self.finish()
    }

    fn step_closed(&mut self, idx: usize) -> Result<()> {
        let unit = self.units[idx];
        let class = unit.class;

        if !class.has_code {
            return Ok(());
        }
        // Stray `*`-prefixed banner lines before the first code
        if self.in_header && self.lines[unit.start].as_ref().trim_start().starts_with('*') {
            return Ok(());
        }

        match class.directive {
            DirectiveKind::If => self.tracker.enter_if(),
            DirectiveKind::EndIf => self.tracker.exit_endif(unit.start)?,
            DirectiveKind::Elif
            | DirectiveKind::Else
            | DirectiveKind::Include
            | DirectiveKind::Define
            | DirectiveKind::Other => {}
            DirectiveKind::None => {
                self.in_header = false;
                let anchor = if class.is_extern && self.tracker.depth() > 0 {
                    self.extern_anchor(idx)?
                } else {
                    None
                };
                match anchor {
                    Some(bracket) => {
                        let first_if = self.units[idx - bracket].start;
                        let depth = self.tracker.depth() - bracket;
                        debug!(
                            line = unit.start + 1,
                            anchor = first_if + 1,
                            "extern guard moves namespace opening back"
                        );
                        self.check_boundary(first_if)?;
                        self.tracker.open_namespace_at(first_if, depth)?;
                    }
                    None => {
                        self.check_boundary(unit.start)?;
                        self.tracker.open_namespace_here(unit.start)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn step_open(&mut self, idx: usize) -> Result<()> {
        let unit = self.units[idx];
        let open_depth = self.tracker.open_depth().unwrap_or(0);

        match unit.class.directive {
            DirectiveKind::If => self.tracker.enter_if(),
            DirectiveKind::Elif | DirectiveKind::Else => {
                if self.tracker.depth() == open_depth {
                    self.close_at(unit.start)?;
                }
            }
            DirectiveKind::EndIf => {
                if self.tracker.depth() == open_depth {
                    self.close_at(unit.start)?;
                }
                self.tracker.exit_endif(unit.start)?;
            }
            DirectiveKind::Include => {
                let line = self.lines[unit.start].as_ref();
                let ignored = include_target(line)
                    .is_some_and(|target| self.ignore.is_include_ignored(target));
                if ignored {
                    debug!(line = unit.start + 1, "include in ignore table keeps namespace open");
                } else {
                    let end = self.backtrack(idx, unit.start);
                    self.close_at(end)?;
                }
            }
            DirectiveKind::Define | DirectiveKind::Other | DirectiveKind::None => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Span>> {
        if self.tracker.is_open() {
            let end = self.backtrack(self.units.len(), self.lines.len());
            self.close_at(end)?;
        } else if self.tracker.depth() > 0 {
            return Err(Error::malformed(
                self.lines.len().saturating_sub(1),
                format!("{} unterminated #if at end of file", self.tracker.depth()),
            ));
        }

        debug_assert!(self.spans.windows(2).all(|w| w[0].end <= w[1].start));
        Ok(self.spans)
    }

    /// Number of `#if` lines bracketing the `extern` line at `idx`, when
    /// the bracket is symmetric.
    ///
    /// Counts `#if` lines immediately before and `#endif` lines immediately
    /// after. No bracket on either side means the line is ordinary code;
    /// brackets on both sides with different counts cannot be anchored.
    fn extern_anchor(&self, idx: usize) -> Result<Option<usize>> {
        let before = self.units[..idx]
            .iter()
            .rev()
            .take_while(|u| u.class.directive == DirectiveKind::If)
            .count();
        let after = self.units[idx + 1..]
            .iter()
            .take_while(|u| u.class.directive == DirectiveKind::EndIf)
            .count();

        if before == 0 || after == 0 {
            return Ok(None);
        }
        if before != after {
            return Err(Error::AmbiguousExternGuard {
                line: self.units[idx].start + 1,
                before,
                after,
            });
        }
        Ok(Some(before))
    }

    /// Close point for a span interrupted at logical line `idx` (physical
    /// line `anchor`).
    ///
    /// Walks backwards while `#if` levels opened inside the span are still
    /// unmatched, so the span ends before the outermost of them.
    fn backtrack(&self, idx: usize, anchor: usize) -> usize {
        let (Some(open_depth), Some(start)) = (self.tracker.open_depth(), self.tracker.start_line())
        else {
            return anchor;
        };

        let mut counter = self.tracker.depth();
        let mut end = anchor;
        for unit in self.units[..idx].iter().rev() {
            if counter <= open_depth || unit.start < start {
                break;
            }
            match unit.class.directive {
                DirectiveKind::If => {
                    counter -= 1;
                    end = unit.start;
                }
                DirectiveKind::EndIf => counter += 1,
                _ => {}
            }
        }

        if end != anchor {
            debug!(from = anchor + 1, to = end + 1, "span end backed up past nested #if");
        }
        end
    }

    fn close_at(&mut self, end: usize) -> Result<()> {
        if let Some(span) = self.tracker.close_namespace_here(end) {
            if span.is_empty() {
                debug!(line = span.start + 1, "dropping empty span");
            } else {
                self.check_boundary(span.end)?;
                debug!(%span, "namespace span");
                self.spans.push(span);
            }
        }
        Ok(())
    }

    /// Fails when a marker inserted before physical line `line` would land
    /// inside a block comment that started on an earlier line.
    fn check_boundary(&self, line: usize) -> Result<()> {
        let in_comment = self
            .units
            .binary_search_by_key(&line, |u| u.start)
            .is_ok_and(|idx| self.units[idx].class.continues_block_comment);
        if in_comment {
            return Err(Error::BoundaryInComment { line: line + 1 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(text: &str) -> Vec<Span> {
        let lines: Vec<&str> = text.lines().collect();
        compute_spans(&lines, &IgnoreSet::new()).unwrap()
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(spans(""), vec![]);
    }

    #[test]
    fn test_only_directives_and_comments() {
        let text = "/* banner */\n#ifndef A_H\n#define A_H\n#include <stdio.h>\n#endif\n";
        assert_eq!(spans(text), vec![]);
    }

    #[test]
    fn test_plain_body() {
        let text = "// header\n\nint a;\nint b;\n";
        assert_eq!(spans(text), vec![Span::new(2, 4)]);
    }

    #[test]
    fn test_include_guard() {
        let text = "#ifndef A_H\n#define A_H\n\nint a;\n\n#endif\n";
        assert_eq!(spans(text), vec![Span::new(3, 5)]);
    }

    #[test]
    fn test_else_closes_at_open_depth() {
        let text = "#ifdef X\nint a;\n#else\nint b;\n#endif\n";
        assert_eq!(spans(text), vec![Span::new(1, 2), Span::new(3, 4)]);
    }

    #[test]
    fn test_nested_else_does_not_close() {
        let text = "int a;\n#ifdef X\nint b;\n#else\nint c;\n#endif\nint d;\n";
        assert_eq!(spans(text), vec![Span::new(0, 7)]);
    }

    #[test]
    fn test_stray_star_lines_in_header() {
        let text = "// banner\n * stray\n *\nint a;\n*p = 1;\n";
        assert_eq!(spans(text), vec![Span::new(3, 5)]);
    }

    #[test]
    fn test_unmatched_endif() {
        let lines = ["int a;", "#endif"];
        let err = compute_spans(&lines, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedNesting { line: 2, .. }));
    }

    #[test]
    fn test_unterminated_if_outside_namespace() {
        let lines = ["#ifdef X", "#define Y"];
        let err = compute_spans(&lines, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedNesting { .. }));
    }

    #[test]
    fn test_include_backtracks_past_nested_if() {
        let text = "int a;\n#ifdef _WIN32\n#include <windows.h>\n#endif\nint b;\n";
        assert_eq!(spans(text), vec![Span::new(0, 1), Span::new(4, 5)]);
    }

    #[test]
    fn test_include_backtracks_over_closed_inner_levels() {
        let text = "int a;\n#if A\n#if B\nint x;\n#endif\n#include \"p.h\"\n#endif\nint z;\n";
        assert_eq!(spans(text), vec![Span::new(0, 1), Span::new(7, 8)]);
    }

    #[test]
    fn test_ignored_include_keeps_span_open() {
        let lines = ["int a;", "#include OS_HEADER(os)", "int b;"];
        let ignore = IgnoreSet::new().with_includes(["OS_HEADER(os)"]);
        assert_eq!(compute_spans(&lines, &ignore).unwrap(), vec![Span::new(0, 3)]);
    }

    #[test]
    fn test_ambiguous_extern_guard() {
        let lines = ["#if A", "#if B", "extern \"C\" {", "#endif", "int x;", "#endif"];
        let err = compute_spans(&lines, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousExternGuard {
                line: 3,
                before: 2,
                after: 1
            }
        ));
    }

    #[test]
    fn test_opening_after_comment_close_is_rejected() {
        let lines = ["/* banner", "   end */ int x;", "int y;"];
        let err = compute_spans(&lines, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, Error::BoundaryInComment { line: 2 }));
    }

    #[test]
    fn test_closing_after_comment_close_is_rejected() {
        let text = "#ifdef X\nint a;\n/* note\n */ #else\nint b;\n#endif\n";
        let lines: Vec<&str> = text.lines().collect();
        let err = compute_spans(&lines, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, Error::BoundaryInComment { line: 4 }));
    }

    #[test]
    fn test_comment_closed_before_code_line_is_fine() {
        let text = "/* banner\n   end */\nint x;\n";
        assert_eq!(spans(text), vec![Span::new(2, 3)]);
    }

    #[test]
    fn test_extern_without_bracket_is_ordinary_code() {
        let text = "#ifdef X\nextern int a;\nextern int b;\n#endif\n";
        assert_eq!(spans(text), vec![Span::new(1, 3)]);
    }
}
