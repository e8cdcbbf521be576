//! Error types for nswrap-blocks
//!
//! Line numbers carried by errors are 1-based, ready for display.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed preprocessor nesting at line {line}: {reason}")]
    MalformedNesting { line: usize, reason: String },

    #[error("Unbalanced namespace markers at line {line}: {reason}")]
    UnbalancedMarkers { line: usize, reason: String },

    #[error(
        "Ambiguous extern guard at line {line}: {before} #if line(s) before but {after} #endif line(s) after"
    )]
    AmbiguousExternGuard {
        line: usize,
        before: usize,
        after: usize,
    },

    #[error("Namespace boundary at line {line} falls inside a block comment")]
    BoundaryInComment { line: usize },

    #[error("Namespace marker already present at line {line}")]
    DuplicateMarker { line: usize },

    #[error("Namespace already open when opening again at line {line}")]
    NamespaceAlreadyOpen { line: usize },

    #[error("Invalid namespace name: {name:?}")]
    InvalidNamespace { name: String },

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn malformed(line_index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedNesting {
            line: line_index + 1,
            reason: reason.into(),
        }
    }

    pub(crate) fn unbalanced(line_index: usize, reason: impl Into<String>) -> Self {
        Self::UnbalancedMarkers {
            line: line_index + 1,
            reason: reason.into(),
        }
    }
}
