//! Insertion and removal of namespace wrappers.
//!
//! Padding is one-sided: each marker block is followed by exactly one blank
//! line, except a closing block at end of file, and no blank line is ever
//! inserted before a marker block, even where the surrounding text has none.
//! A blank line before the block would be indistinguishable from one the file
//! already had, so `remove` could not restore the original bytes. The line
//! following an insertion point is never blank (spans start at code and end
//! at a directive or end of file), so padding never doubles an existing
//! blank line, and removal knows exactly which blank lines it has to delete.

use std::borrow::Cow;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ignore::IgnoreSet;
use crate::markers::{MarkerPair, MarkerStyle, Markers, find_marker_pairs};
use crate::nesting::Span;
use crate::qualify::SymbolQualifier;
use crate::source::SourceFile;
use crate::span::compute_spans;

/// Result of wrapping one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Wrapped spans, in the coordinates of the file before insertion.
    pub spans: Vec<Span>,
}

/// Result of unwrapping one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveReport {
    /// Marker pairs removed, in the coordinates of the file before removal.
    pub pairs: Vec<MarkerPair>,
}

/// Wraps and unwraps source files in `namespace NAME { ... }`.
#[derive(Debug, Clone)]
pub struct Rewriter {
    qualifier: SymbolQualifier,
    ignore: IgnoreSet,
}

impl Rewriter {
    /// Create a rewriter for `namespace`, qualifying references to `symbols`.
    pub fn new<I, S>(namespace: &str, symbols: I, ignore: IgnoreSet) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            qualifier: SymbolQualifier::new(namespace, symbols)?,
            ignore,
        })
    }

    pub fn namespace(&self) -> &str {
        self.qualifier.namespace()
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    pub fn markers(&self, style: MarkerStyle) -> Markers {
        Markers::new(self.namespace(), style)
    }

    /// Compute the spans `add` would wrap, without touching the file.
    pub fn plan(&self, source: &SourceFile) -> Result<Vec<Span>> {
        let markers = self.markers(MarkerStyle::Plain);
        if let Some(line) = markers.find_any(source.lines()) {
            return Err(Error::DuplicateMarker { line: line + 1 });
        }
        compute_spans(source.lines(), &self.ignore)
    }

    /// Wrap every computed span and qualify references on every original line.
    ///
    /// Fails without modifying `source` if the file already carries markers
    /// for this namespace or its preprocessor nesting is malformed. A file
    /// with no span to wrap is left untouched, references included.
    pub fn add(&self, source: &mut SourceFile, style: MarkerStyle) -> Result<AddReport> {
        let spans = self.plan(source)?;
        if spans.is_empty() {
            debug!(namespace = self.namespace(), "no code to wrap");
            return Ok(AddReport { spans });
        }
        let markers = self.markers(style);

        source.map_lines(|line| match self.qualifier.qualify(line) {
            Cow::Owned(qualified) => Some(qualified),
            Cow::Borrowed(_) => None,
        });

        let mut open_block = markers.open_lines().to_vec();
        open_block.push(String::new());

        // Right to left keeps earlier indices valid
        for span in spans.iter().rev() {
            let mut close_block = markers.close_lines().to_vec();
            if span.end < source.len() {
                close_block.push(String::new());
            }
            source.insert_lines(span.end, &close_block);
            source.insert_lines(span.start, &open_block);
            debug!(%span, namespace = self.namespace(), "wrapped span");
        }

        info!(spans = spans.len(), "namespace added");
        Ok(AddReport { spans })
    }

    /// Delete every marker pair with its padding and unqualify every line.
    ///
    /// A file without markers is left as is and reported with no pairs.
    pub fn remove(&self, source: &mut SourceFile, style: MarkerStyle) -> Result<RemoveReport> {
        let markers = self.markers(style);
        let pairs = find_marker_pairs(source.lines(), &markers)?;
        if pairs.is_empty() {
            debug!(namespace = self.namespace(), "no markers found");
            return Ok(RemoveReport { pairs });
        }

        for pair in pairs.iter().rev() {
            remove_block(source, pair.close_line, markers.close_lines().len());
            remove_block(source, pair.open_line, markers.open_lines().len());
        }

        source.map_lines(|line| match self.qualifier.unqualify(line) {
            Cow::Owned(unqualified) => Some(unqualified),
            Cow::Borrowed(_) => None,
        });

        info!(pairs = pairs.len(), "namespace removed");
        Ok(RemoveReport { pairs })
    }
}

/// Remove a marker block of `len` lines at `at` plus the blank line after it.
fn remove_block(source: &mut SourceFile, at: usize, len: usize) {
    let pad_at = at + len;
    let padded = source
        .lines()
        .get(pad_at)
        .is_some_and(|line| line.trim().is_empty());
    let end = if padded { pad_at + 1 } else { pad_at };
    source.remove_lines(at..end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewriter() -> Rewriter {
        Rewriter::new("ns", ["sym"], IgnoreSet::new()).unwrap()
    }

    #[test]
    fn test_add_plain() {
        let mut source = SourceFile::from_text("// header\n\nint a;\nint b = ::sym();\n");
        let report = rewriter().add(&mut source, MarkerStyle::Plain).unwrap();

        assert_eq!(report.spans, vec![Span::new(2, 4)]);
        assert_eq!(
            source.to_text(),
            "// header\n\nnamespace ns {\n\nint a;\nint b = ns::sym();\n} // namespace ns\n"
        );
    }

    #[test]
    fn test_add_guarded_inside_include_guard() {
        let mut source = SourceFile::from_text("#ifndef A_H\n#define A_H\nint a;\n#endif\n");
        rewriter().add(&mut source, MarkerStyle::CppGuarded).unwrap();

        assert_eq!(
            source.to_text(),
            "#ifndef A_H\n#define A_H\n#ifdef __cplusplus\nnamespace ns {\n#endif\n\nint a;\n\
             #ifdef __cplusplus\n} // namespace ns\n#endif\n\n#endif\n"
        );
    }

    #[test]
    fn test_add_twice_fails() {
        let mut source = SourceFile::from_text("int a;\n");
        let r = rewriter();
        r.add(&mut source, MarkerStyle::Plain).unwrap();
        let before = source.clone();

        let err = r.add(&mut source, MarkerStyle::Plain).unwrap_err();
        assert!(matches!(err, Error::DuplicateMarker { line: 1 }));
        assert_eq!(source, before);
    }

    #[test]
    fn test_failed_add_leaves_source_untouched() {
        let text = "int a = ::sym();\n#endif\n";
        let mut source = SourceFile::from_text(text);
        assert!(rewriter().add(&mut source, MarkerStyle::Plain).is_err());
        assert_eq!(source.to_text(), text);
    }

    #[test]
    fn test_add_without_spans_does_not_qualify() {
        let text = "#ifndef A_H\n#define CALL(a) ::sym(a)\n#endif\n";
        let mut source = SourceFile::from_text(text);
        let report = rewriter().add(&mut source, MarkerStyle::Plain).unwrap();

        assert!(report.spans.is_empty());
        assert_eq!(source.to_text(), text);
    }

    #[test]
    fn test_remove_restores() {
        let text = "int a;\n\n#include \"p.h\"\nint b = ::sym();\n";
        let r = rewriter();
        let mut source = SourceFile::from_text(text);
        r.add(&mut source, MarkerStyle::Plain).unwrap();
        let report = r.remove(&mut source, MarkerStyle::Plain).unwrap();

        assert_eq!(report.pairs.len(), 2);
        assert_eq!(source.to_text(), text);
    }

    #[test]
    fn test_remove_without_markers_is_noop() {
        let text = "int a;\n";
        let mut source = SourceFile::from_text(text);
        let report = rewriter().remove(&mut source, MarkerStyle::Plain).unwrap();
        assert!(report.pairs.is_empty());
        assert_eq!(source.to_text(), text);
    }
}
