//! Namespace marker text and marker-pair parsing.
//!
//! Markers come in two forms:
//!
//! ```text
//! namespace NAME {              #ifdef __cplusplus
//! ...                           namespace NAME {
//! } // namespace NAME           #endif
//!                               ...
//!                               #ifdef __cplusplus
//!                               } // namespace NAME
//!                               #endif
//! ```
//!
//! The guarded form keeps the wrapped region valid when the file is also
//! compiled as plain C.

use crate::error::{Error, Result};

pub const CPP_GUARD_OPEN: &str = "#ifdef __cplusplus";
pub const CPP_GUARD_CLOSE: &str = "#endif";

/// Which marker form a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerStyle {
    #[default]
    Plain,
    CppGuarded,
}

/// Marker lines for one namespace name and style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    style: MarkerStyle,
    open_core: String,
    close_core: String,
    open: Vec<String>,
    close: Vec<String>,
}

/// Location of one opening/closing marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    /// Index of the first line of the opening marker block.
    pub open_line: usize,
    /// Index of the first line of the closing marker block.
    pub close_line: usize,
}

impl Markers {
    pub fn new(namespace: &str, style: MarkerStyle) -> Self {
        let open_core = format!("namespace {} {{", namespace);
        let close_core = format!("}} // namespace {}", namespace);
        let (open, close) = match style {
            MarkerStyle::Plain => (vec![open_core.clone()], vec![close_core.clone()]),
            MarkerStyle::CppGuarded => (
                guarded(&open_core),
                guarded(&close_core),
            ),
        };
        Self {
            style,
            open_core,
            close_core,
            open,
            close,
        }
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    pub fn open_lines(&self) -> &[String] {
        &self.open
    }

    pub fn close_lines(&self) -> &[String] {
        &self.close
    }

    /// Index of the first line holding an opening or closing marker line,
    /// in either style.
    pub fn find_any<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        lines.iter().position(|line| {
            let line = line.as_ref().trim();
            line == self.open_core || line == self.close_core
        })
    }

    /// Index of the first line of the marker block whose core line is at `core`.
    fn block_start(&self, core: usize) -> usize {
        match self.style {
            MarkerStyle::Plain => core,
            MarkerStyle::CppGuarded => core - 1,
        }
    }

    /// Check the guard lines around a core marker line at `core` match the style.
    fn check_guard<S: AsRef<str>>(&self, lines: &[S], core: usize) -> Result<()> {
        let trimmed = |idx: usize| lines.get(idx).map(|l| l.as_ref().trim());
        let guarded = core > 0
            && trimmed(core - 1) == Some(CPP_GUARD_OPEN)
            && trimmed(core + 1) == Some(CPP_GUARD_CLOSE);

        match (self.style, guarded) {
            (MarkerStyle::CppGuarded, false) => Err(Error::unbalanced(
                core,
                "marker is missing its #ifdef __cplusplus guard",
            )),
            (MarkerStyle::Plain, true) => Err(Error::unbalanced(
                core,
                "found a __cplusplus-guarded marker where a plain marker was expected",
            )),
            _ => Ok(()),
        }
    }
}

fn guarded(core: &str) -> Vec<String> {
    vec![
        CPP_GUARD_OPEN.to_string(),
        core.to_string(),
        CPP_GUARD_CLOSE.to_string(),
    ]
}

/// Parse all marker pairs, in order of appearance.
///
/// Pairs must strictly alternate open, close, open, close. A second opening
/// marker before a close, a close with no open, or an open left unclosed at
/// end of file are all fatal.
pub fn find_marker_pairs<S: AsRef<str>>(lines: &[S], markers: &Markers) -> Result<Vec<MarkerPair>> {
    let mut pairs = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line == markers.open_core {
            markers.check_guard(lines, idx)?;
            if let Some(previous) = open {
                return Err(Error::unbalanced(
                    idx,
                    format!(
                        "opening marker while the one at line {} is still open",
                        previous + 1
                    ),
                ));
            }
            open = Some(markers.block_start(idx));
        } else if line == markers.close_core {
            markers.check_guard(lines, idx)?;
            let Some(open_line) = open.take() else {
                return Err(Error::unbalanced(idx, "closing marker without opening marker"));
            };
            pairs.push(MarkerPair {
                open_line,
                close_line: markers.block_start(idx),
            });
        }
    }

    if let Some(open_line) = open {
        return Err(Error::unbalanced(
            open_line,
            "opening marker is never closed",
        ));
    }

    Ok(pairs)
}

/// Checks if any marker pair is present.
pub fn has_markers<S: AsRef<str>>(lines: &[S], markers: &Markers) -> bool {
    markers.find_any(lines).is_some()
}
