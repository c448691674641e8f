//! Empujar CLI
//!
//! Pushes versioned NLP model artifacts to per-model Hugging Face Hub
//! repositories.
//!
//! # Usage
//!
//! ```bash
//! # Publish the full CoreNLP catalog
//! empujar push --input-dir /data/corenlp --version 4.5.4
//!
//! # Publish a subset
//! empujar push --input-dir /data/corenlp french german
//!
//! # Publish Stanza language packages
//! empujar push --family stanza --input-dir /data/stanza/1.3.0 --version 1.3.0
//!
//! # Inspect the catalog
//! empujar catalog
//! ```

use clap::Parser;
use empujar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
