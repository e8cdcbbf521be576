//! nswrap CLI
//!
//! Wraps C/C++ sources in `namespace NAME { ... }` and removes the wrappers
//! again, leaving the files byte-for-byte as they were.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};
use nswrap_meta::Command;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {}", e)))?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} C/C++ namespace wrapper", "nswrap".green().bold());
            println!();
            println!("Run {} for available commands.", "nswrap --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Add(args) => commands::run_namespace(&cwd, Command::Add, &args),
        Commands::Remove(args) => commands::run_namespace(&cwd, Command::Remove, &args),
    }
}
