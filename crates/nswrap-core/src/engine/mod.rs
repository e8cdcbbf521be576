//! Namespace engine: apply one command to a set of files
//!
//! - **runner**: per-file pipeline and the parallel multi-file run
//! - **report**: per-file outcomes and the aggregate run status

mod report;
mod runner;

pub use report::{FileReport, FileStatus, RunReport};
pub use runner::{NamespaceEngine, RunOptions};
