//! Preprocessor nesting depth and open-namespace bookkeeping.

use std::fmt;

use crate::error::{Error, Result};

/// Half-open range `[start, end)` of physical line indices to wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }

    /// 1-based inclusive first line, for reports.
    pub fn first_line(&self) -> usize {
        self.start + 1
    }

    /// 1-based inclusive last line, for reports.
    pub fn last_line(&self) -> usize {
        self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lines {}-{}", self.first_line(), self.last_line())
    }
}

/// Tracks `#if` depth for the whole file and, independently, the depth and
/// line at which the current namespace region was opened.
///
/// Invariant: while a namespace is open, its opening depth never exceeds
/// the current depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingTracker {
    current_depth: usize,
    namespace_open: bool,
    namespace_open_depth: usize,
    namespace_start_line: usize,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn is_open(&self) -> bool {
        self.namespace_open
    }

    /// Depth at which the open namespace was opened.
    pub fn open_depth(&self) -> Option<usize> {
        self.namespace_open.then_some(self.namespace_open_depth)
    }

    /// Line at which the open namespace starts.
    pub fn start_line(&self) -> Option<usize> {
        self.namespace_open.then_some(self.namespace_start_line)
    }

    /// `#if`, `#ifdef`, `#ifndef`.
    pub fn enter_if(&mut self) {
        self.current_depth += 1;
    }

    /// `#endif` at physical line `line`; an unmatched `#endif` is fatal.
    pub fn exit_endif(&mut self, line: usize) -> Result<()> {
        if self.current_depth == 0 {
            return Err(Error::malformed(line, "#endif without matching #if"));
        }
        self.current_depth -= 1;
        if self.namespace_open && self.namespace_open_depth > self.current_depth {
            return Err(Error::malformed(
                line,
                "#endif closes the conditional enclosing an open namespace",
            ));
        }
        Ok(())
    }

    /// Open a namespace at `line` at the current depth.
    pub fn open_namespace_here(&mut self, line: usize) -> Result<()> {
        self.open_namespace_at(line, self.current_depth)
    }

    /// Open a namespace at `line` at an explicit depth no deeper than the
    /// current one (used when the opening moves back onto enclosing `#if`s).
    pub fn open_namespace_at(&mut self, line: usize, depth: usize) -> Result<()> {
        if self.namespace_open {
            return Err(Error::NamespaceAlreadyOpen { line: line + 1 });
        }
        debug_assert!(depth <= self.current_depth);
        self.namespace_open = true;
        self.namespace_open_depth = depth.min(self.current_depth);
        self.namespace_start_line = line;
        Ok(())
    }

    /// Close the open namespace before `line`, returning the span it covered.
    pub fn close_namespace_here(&mut self, line: usize) -> Option<Span> {
        if !self.namespace_open {
            return None;
        }
        self.namespace_open = false;
        Some(Span::new(self.namespace_start_line, line))
    }
}
