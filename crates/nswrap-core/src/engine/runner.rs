//! NamespaceEngine implementation

use rayon::prelude::*;
use tracing::{debug, info, warn};

use nswrap_blocks::{Rewriter, SourceFile};
use nswrap_fs::{NormalizedPath, discover_sources, io};
use nswrap_meta::{Command, NamespaceConfig};

use super::report::{FileReport, FileStatus, RunReport};
use crate::Result;

/// Options for add and remove runs
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute and report, but write nothing.
    pub dry_run: bool,
    /// `remove` on a file without markers does not fail the run.
    pub allow_missing: bool,
}

/// Applies `add` or `remove` for one namespace configuration.
pub struct NamespaceEngine {
    config: NamespaceConfig,
    rewriter: Rewriter,
    options: RunOptions,
}

impl NamespaceEngine {
    /// Create an engine; fails if the configuration does not validate.
    pub fn new(config: NamespaceConfig, options: RunOptions) -> Result<Self> {
        config.validate()?;
        let rewriter = Rewriter::new(
            &config.namespace,
            config.qualify_with_namespace.iter().cloned(),
            config.ignore_set(),
        )?;

        Ok(Self {
            config,
            rewriter,
            options,
        })
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Run `command` over files and directories.
    ///
    /// Directories are walked for C/C++ sources. A missing input path fails
    /// the whole run; anything going wrong inside one file is recorded in its
    /// report and the other files carry on.
    pub fn run(&self, command: Command, inputs: &[NormalizedPath]) -> Result<RunReport> {
        let files = discover_sources(inputs)?;
        info!(
            %command,
            namespace = %self.config.namespace,
            files = files.len(),
            dry_run = self.options.dry_run,
            "starting run"
        );

        let files: Vec<FileReport> = files
            .par_iter()
            .map(|path| self.process_file(command, path))
            .collect();

        Ok(RunReport {
            command,
            files,
            dry_run: self.options.dry_run,
            allow_missing: self.options.allow_missing,
        })
    }

    /// Apply `command` to one file and write it back unless in a dry run.
    pub fn process_file(&self, command: Command, path: &NormalizedPath) -> FileReport {
        let basename = path.file_name().unwrap_or_default();
        if self.config.is_file_ignored(basename) {
            debug!(path = %path, "file in ignore table");
            return FileReport::new(path.clone(), FileStatus::Skipped);
        }

        let status = match self.rewrite_file(command, path, basename) {
            Ok(status) => status,
            Err(e) => {
                warn!(path = %path, error = %e, "file left untouched");
                FileStatus::Failed(e.to_string())
            }
        };
        FileReport::new(path.clone(), status)
    }

    fn rewrite_file(
        &self,
        command: Command,
        path: &NormalizedPath,
        basename: &str,
    ) -> Result<FileStatus> {
        let original = io::read_source(path)?;
        let (rewritten, status) = self.rewrite_text(command, basename, &original.text)?;

        if status.is_change() && !self.options.dry_run {
            io::write_source(path, &rewritten, original.encoding)?;
            debug!(path = %path, "file written");
        }
        Ok(status)
    }

    /// Apply `command` to file content, returning the new content and status.
    ///
    /// `basename` selects the marker style from `files_with_cpp_guard`.
    pub fn rewrite_text(
        &self,
        command: Command,
        basename: &str,
        text: &str,
    ) -> Result<(String, FileStatus)> {
        let style = self.config.marker_style(basename);
        let mut source = SourceFile::from_text(text);

        let status = match command {
            Command::Add => {
                let report = self.rewriter.add(&mut source, style)?;
                FileStatus::Wrapped(report.spans)
            }
            Command::Remove => {
                let report = self.rewriter.remove(&mut source, style)?;
                if report.pairs.is_empty() {
                    FileStatus::NoMarkers
                } else {
                    FileStatus::Removed(report.pairs)
                }
            }
        };

        Ok((source.to_text(), status))
    }
}
