//! CLI command implementations

mod catalog;
mod push;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Push(args) => push::run_push(args, log_level),
        Command::Catalog(args) => catalog::run_catalog(args, log_level),
    }
}
