//! Per-file pipeline and multi-file runner for nswrap
//!
//! This crate ties the layer 0 crates together:
//!
//! ```text
//!                nswrap-cli
//!                    |
//!               nswrap-core
//!                    |
//!     +--------------+--------------+
//!     |              |              |
//! nswrap-fs    nswrap-blocks    nswrap-meta
//! ```
//!
//! Each file is read whole, rewritten in memory and written back atomically,
//! so a file that fails is never left half-written. Files are independent and
//! processed in parallel; the report lists them in discovery order.

pub mod engine;
pub mod error;

pub use engine::{FileReport, FileStatus, NamespaceEngine, RunOptions, RunReport};
pub use error::{Error, Result};
