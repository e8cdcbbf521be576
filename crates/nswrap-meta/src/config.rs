//! Configuration types and loading for nswrap
//!
//! A run is described by a [`Command`] and a [`NamespaceConfig`]. The config
//! can live in a TOML, JSON or YAML file:
//!
//! ```toml
//! namespace = "espresso"
//! ignore_files = ["jni_md.h"]
//! files_with_cpp_guard = ["jvm.h"]
//! qualify_with_namespace = ["JNI_CreateJavaVM", "JavaVM"]
//! ignore_includes = ["OS_HEADER(os)"]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use nswrap_blocks::{IgnoreSet, MarkerStyle, is_identifier};
use nswrap_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// What to do with the namespace wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Wrap code spans in the namespace.
    Add,
    /// Strip previously added wrappers.
    Remove,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Command::Add),
            "remove" => Ok(Command::Remove),
            _ => Err(Error::InvalidCommand {
                command: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add => write!(f, "add"),
            Command::Remove => write!(f, "remove"),
        }
    }
}

/// Namespace name plus the per-run tables.
///
/// File tables hold basenames (`jni.h`), not paths.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Namespace to add or remove
    pub namespace: String,
    /// Files left untouched
    pub ignore_files: BTreeSet<String>,
    /// Files whose markers are wrapped in `#ifdef __cplusplus`
    pub files_with_cpp_guard: BTreeSet<String>,
    /// Symbols whose `::name` references get qualified
    pub qualify_with_namespace: BTreeSet<String>,
    /// Include targets that do not end a span
    pub ignore_includes: BTreeSet<String>,
}

impl NamespaceConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of this config.
    ///
    /// A non-empty namespace in `other` replaces ours; tables are unioned.
    pub fn merge(&mut self, other: NamespaceConfig) {
        if !other.namespace.is_empty() {
            self.namespace = other.namespace;
        }
        self.ignore_files.extend(other.ignore_files);
        self.files_with_cpp_guard.extend(other.files_with_cpp_guard);
        self.qualify_with_namespace
            .extend(other.qualify_with_namespace);
        self.ignore_includes.extend(other.ignore_includes);
    }

    /// Check the namespace and every symbol are C/C++ identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(Error::InvalidConfig {
                message: "namespace name is empty".to_string(),
            });
        }
        if !is_identifier(&self.namespace) {
            return Err(Error::InvalidConfig {
                message: format!("namespace {:?} is not an identifier", self.namespace),
            });
        }
        if let Some(symbol) = self
            .qualify_with_namespace
            .iter()
            .find(|s| !is_identifier(s))
        {
            return Err(Error::InvalidConfig {
                message: format!("symbol {:?} is not an identifier", symbol),
            });
        }
        Ok(())
    }

    pub fn is_file_ignored(&self, basename: &str) -> bool {
        self.ignore_files.contains(basename)
    }

    /// Marker form to use for a file.
    pub fn marker_style(&self, basename: &str) -> MarkerStyle {
        if self.files_with_cpp_guard.contains(basename) {
            MarkerStyle::CppGuarded
        } else {
            MarkerStyle::Plain
        }
    }

    /// Include table in the form the rewriter consumes.
    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet::new().with_includes(self.ignore_includes.iter().cloned())
    }
}

/// Load and validate a config file; the format follows the extension.
pub fn load_config(path: &NormalizedPath) -> Result<NamespaceConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_native(),
        });
    }

    let config: NamespaceConfig = ConfigStore::new().load(path)?;
    debug!(
        path = %path,
        namespace = %config.namespace,
        symbols = config.qualify_with_namespace.len(),
        "loaded config"
    );
    config.validate()?;
    Ok(config)
}
