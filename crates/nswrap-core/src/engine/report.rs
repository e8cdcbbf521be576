//! Per-file outcomes and the aggregate run status

use std::fmt;

use nswrap_blocks::{MarkerPair, Span};
use nswrap_fs::NormalizedPath;
use nswrap_meta::Command;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// `add` wrapped these spans (original line coordinates). Empty when the
    /// file has no code outside comments and directives.
    Wrapped(Vec<Span>),
    /// `remove` deleted these marker pairs (pre-removal coordinates).
    Removed(Vec<MarkerPair>),
    /// `remove` found no marker for the namespace.
    NoMarkers,
    /// Listed in `ignore_files`.
    Skipped,
    /// Read, rewrite or write failed; the file is untouched.
    Failed(String),
}

impl FileStatus {
    /// Whether the file content was (or in a dry run, would be) changed.
    pub fn is_change(&self) -> bool {
        match self {
            FileStatus::Wrapped(spans) => !spans.is_empty(),
            FileStatus::Removed(pairs) => !pairs.is_empty(),
            FileStatus::NoMarkers | FileStatus::Skipped | FileStatus::Failed(_) => false,
        }
    }

    /// Whether the outcome makes the run fail.
    pub fn is_failure(&self, allow_missing: bool) -> bool {
        match self {
            FileStatus::Failed(_) => true,
            FileStatus::NoMarkers => !allow_missing,
            _ => false,
        }
    }

    /// One line per wrapped span or removed pair, 1-based.
    pub fn details(&self) -> Vec<String> {
        match self {
            FileStatus::Wrapped(spans) => spans.iter().map(|s| format!("wrapped {}", s)).collect(),
            FileStatus::Removed(pairs) => pairs
                .iter()
                .map(|p| {
                    format!(
                        "removed markers at lines {}/{}",
                        p.open_line + 1,
                        p.close_line + 1
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Wrapped(spans) if spans.is_empty() => write!(f, "nothing to wrap"),
            FileStatus::Wrapped(spans) => write!(f, "wrapped {} span(s)", spans.len()),
            FileStatus::Removed(pairs) => write!(f, "removed {} marker pair(s)", pairs.len()),
            FileStatus::NoMarkers => write!(f, "no marker found"),
            FileStatus::Skipped => write!(f, "skipped"),
            FileStatus::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: NormalizedPath,
    pub status: FileStatus,
}

impl FileReport {
    pub fn new(path: NormalizedPath, status: FileStatus) -> Self {
        Self { path, status }
    }
}

/// Report from an add or remove run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Command that was run
    pub command: Command,
    /// Per-file outcomes, in discovery order
    pub files: Vec<FileReport>,
    /// No file was written
    pub dry_run: bool,
    /// Files without markers do not fail the run
    pub allow_missing: bool,
}

impl RunReport {
    /// Whether every file succeeded.
    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Files whose outcome fails the run.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| f.status.is_failure(self.allow_missing))
    }

    /// Number of files changed (or that would be changed).
    pub fn changed(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_change()).count()
    }

    /// Process exit code for this run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }
}
