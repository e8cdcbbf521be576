//! Run configuration for nswrap.
//!
//! Holds the command selector and the per-run tables (namespace name, files
//! to skip, files needing `__cplusplus`-guarded markers, symbols to qualify,
//! includes that must not split a span).

pub mod config;
pub mod error;

pub use config::{Command, NamespaceConfig, load_config};
pub use error::{Error, Result};
