//! Namespace wrapping for C/C++ sources.
//!
//! This crate decides where a `namespace NAME { ... }` wrapper may legally
//! begin and end in a C/C++ file, inserts it, and removes it again so that
//! `remove(add(file)) == file` byte for byte.
//!
//! The pipeline, leaf first:
//!
//! - [`classify`]: lexical line classification (directives, comments, `extern`)
//! - [`continuation`]: folding of `\`-continued directives into logical lines
//! - [`nesting`]: `#if` depth and open-namespace bookkeeping
//! - [`span`]: the span calculator
//! - [`markers`] and [`writer`]: marker text, marker parsing, insertion and removal
//! - [`qualify`]: `::symbol` qualification
//!
//! # Example
//! ```
//! use nswrap_blocks::{IgnoreSet, MarkerStyle, Rewriter, SourceFile};
//!
//! let rewriter = Rewriter::new("espresso", ["JavaVM"], IgnoreSet::new()).unwrap();
//! let original = "#include <jni.h>\n\n::JavaVM* vm;\n";
//!
//! let mut source = SourceFile::from_text(original);
//! let report = rewriter.add(&mut source, MarkerStyle::Plain).unwrap();
//! assert_eq!(report.spans.len(), 1);
//! assert!(source.to_text().contains("namespace espresso {"));
//! assert!(source.to_text().contains("espresso::JavaVM* vm;"));
//!
//! rewriter.remove(&mut source, MarkerStyle::Plain).unwrap();
//! assert_eq!(source.to_text(), original);
//! ```

pub mod classify;
pub mod continuation;
pub mod error;
pub mod ignore;
pub mod markers;
pub mod nesting;
pub mod qualify;
pub mod source;
pub mod span;
pub mod writer;

pub use classify::{DirectiveKind, LineClass, classify_line, classify_lines, include_target};
pub use continuation::{LogicalLine, continuation_len, logical_lines};
pub use error::{Error, Result};
pub use ignore::IgnoreSet;
pub use markers::{MarkerPair, MarkerStyle, Markers, find_marker_pairs, has_markers};
pub use nesting::{NestingTracker, Span};
pub use qualify::{SymbolQualifier, is_identifier};
pub use source::SourceFile;
pub use span::{SpanCalculator, compute_spans};
pub use writer::{AddReport, RemoveReport, Rewriter};
