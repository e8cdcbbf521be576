//! Add and remove command implementations
//!
//! Both commands resolve a [`NamespaceConfig`] from an optional config file
//! plus command-line tables, run the engine and print one block per file.

use std::path::{Path, PathBuf};

use colored::Colorize;

use nswrap_core::{FileStatus, NamespaceEngine, RunOptions, RunReport};
use nswrap_fs::NormalizedPath;
use nswrap_meta::{Command, NamespaceConfig, load_config};

use crate::cli::RunArgs;
use crate::error::{CliError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nswrap.toml";

/// Build the run configuration: config file first, flags on top.
pub fn resolve_config(cwd: &Path, args: &RunArgs) -> Result<NamespaceConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(&resolve_path(cwd, path))?,
        None => {
            let default = resolve_path(cwd, Path::new(DEFAULT_CONFIG_FILE));
            if default.exists() {
                tracing::debug!(path = %default, "using default config file");
                load_config(&default)?
            } else {
                NamespaceConfig::default()
            }
        }
    };

    config.merge(NamespaceConfig {
        namespace: args.namespace.clone().unwrap_or_default(),
        ignore_files: args.ignore_files.iter().cloned().collect(),
        files_with_cpp_guard: args.cpp_guard.iter().cloned().collect(),
        qualify_with_namespace: args.qualify.iter().cloned().collect(),
        ignore_includes: args.ignore_includes.iter().cloned().collect(),
    });

    if config.namespace.is_empty() {
        return Err(CliError::user(
            "No namespace given. Pass --namespace or set `namespace` in the config file.",
        ));
    }
    config.validate()?;
    Ok(config)
}

/// Run the add or remove command
///
/// Prints the per-file report and fails if any file failed.
pub fn run_namespace(cwd: &Path, command: Command, args: &RunArgs) -> Result<()> {
    let config = resolve_config(cwd, args)?;
    let options = RunOptions {
        dry_run: args.dry_run,
        allow_missing: args.allow_missing,
    };

    let verb = match command {
        Command::Add => "Adding",
        Command::Remove => "Removing",
    };
    let suffix = if options.dry_run { " (dry run)" } else { "" };
    println!(
        "{} {} namespace {}{}",
        "=>".blue().bold(),
        verb,
        config.namespace.cyan(),
        suffix.dimmed()
    );

    let engine = NamespaceEngine::new(config, options)?;
    let inputs: Vec<NormalizedPath> = args
        .paths
        .iter()
        .map(|p| resolve_path(cwd, p))
        .collect();
    let report = engine.run(command, &inputs)?;

    print_report(cwd, &report);

    let failed = report.failures().count();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{} of {} file(s) failed",
            failed,
            report.files.len()
        )));
    }
    Ok(())
}

fn print_report(cwd: &Path, report: &RunReport) {
    let base = NormalizedPath::new(cwd);
    for file in &report.files {
        let shown = file.path.relative_to(&base);
        let status = file.status.to_string();
        let label = match &file.status {
            FileStatus::Failed(_) => status.red().bold(),
            FileStatus::NoMarkers if report.allow_missing => status.dimmed(),
            FileStatus::NoMarkers => status.yellow().bold(),
            FileStatus::Skipped => status.dimmed(),
            _ if file.status.is_change() => status.green(),
            _ => status.normal(),
        };
        println!("   {} {}: {}", "-".blue(), shown.cyan(), label);
        for detail in file.status.details() {
            println!("      {}", detail);
        }
    }

    println!();
    let action = if report.dry_run { "would change" } else { "changed" };
    if report.success() {
        println!(
            "{} {} file(s) {}.",
            "OK".green().bold(),
            report.changed(),
            action
        );
    } else {
        println!(
            "{} {} file(s) {}, {} failed.",
            "FAILED".red().bold(),
            report.changed(),
            action,
            report.failures().count()
        );
    }
}

/// Absolute form of a user-supplied path, with `.` components dropped.
fn resolve_path(cwd: &Path, path: &Path) -> NormalizedPath {
    NormalizedPath::new(cwd.join(path).components().collect::<PathBuf>())
}
