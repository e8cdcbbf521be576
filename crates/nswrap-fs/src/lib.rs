//! Filesystem layer for nswrap
//!
//! Provides normalized path handling, whole-file atomic I/O, discovery of
//! C/C++ sources under a root directory and format-agnostic config loading.

pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use discovery::{SOURCE_EXTENSIONS, discover_sources, is_source_file};
pub use error::{Error, Result};
pub use path::NormalizedPath;
