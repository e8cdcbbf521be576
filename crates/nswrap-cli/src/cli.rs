//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// nswrap - Wrap C/C++ sources in a namespace and unwrap them again
#[derive(Parser, Debug)]
#[command(name = "nswrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Wrap code in `namespace NAME { ... }`
    ///
    /// Examples:
    ///   nswrap add -n espresso include/       # Walk a directory
    ///   nswrap add -c nswrap.toml jni.h jvm.h # Explicit files, config file
    ///   nswrap add -n espresso --dry-run src/ # Report spans only
    Add(RunArgs),

    /// Remove namespace wrappers added by `add`
    Remove(RunArgs),
}

/// Arguments shared by `add` and `remove`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Files or directories to process (directories are walked for .c .h .hpp .cpp)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Config file (TOML, JSON or YAML); defaults to ./nswrap.toml when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Namespace name (overrides the config file)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Basename of a file to leave untouched
    #[arg(long = "ignore-file", value_name = "NAME")]
    pub ignore_files: Vec<String>,

    /// Basename of a file whose markers get an #ifdef __cplusplus guard
    #[arg(long = "cpp-guard", value_name = "NAME")]
    pub cpp_guard: Vec<String>,

    /// Symbol whose `::symbol` references get qualified with the namespace
    #[arg(long = "qualify", value_name = "SYMBOL")]
    pub qualify: Vec<String>,

    /// Include target that must not end a namespace span
    #[arg(long = "ignore-include", value_name = "TARGET")]
    pub ignore_includes: Vec<String>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Do not fail when `remove` finds a file without markers
    #[arg(long)]
    pub allow_missing: bool,
}
