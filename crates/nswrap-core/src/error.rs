//! Error types for nswrap-core

/// Result type for nswrap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole run.
///
/// Failures confined to one file never surface here; they are recorded in
/// that file's [`FileStatus::Failed`](crate::FileStatus::Failed).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from nswrap-fs
    #[error(transparent)]
    Fs(#[from] nswrap_fs::Error),

    /// Rewriting error from nswrap-blocks
    #[error(transparent)]
    Blocks(#[from] nswrap_blocks::Error),

    /// Configuration error from nswrap-meta
    #[error(transparent)]
    Meta(#[from] nswrap_meta::Error),
}
