//! CLI argument types

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::ArtifactFamily;

/// Empujar: push NLP model artifacts to per-model Hugging Face repos
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "empujar")]
#[command(version)]
#[command(about = "Publish versioned model artifacts to per-model Hugging Face Hub repositories")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Publish models to the Hub
    Push(PushArgs),

    /// Print the catalog a push would process
    Catalog(CatalogArgs),
}

/// Arguments for the push command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PushArgs {
    /// Models to publish (defaults to the full catalog)
    #[arg(value_name = "MODELS")]
    pub models: Vec<String>,

    /// Artifact family to publish
    #[arg(long, value_enum, default_value_t = ArtifactFamily::Corenlp)]
    pub family: ArtifactFamily,

    /// Directory the local model artifacts are loaded from
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the per-repo staging trees are assembled under
    #[arg(long, default_value = "hub")]
    pub output_dir: PathBuf,

    /// Version of the models to upload; tagged as v<VERSION>
    #[arg(long, default_value = "4.5.4")]
    pub version: String,

    /// Only push the package entry, skipping the per-language models
    #[arg(long)]
    pub package_only: bool,

    /// Halt the batch on the first fatal per-model error
    #[arg(long)]
    pub fail_fast: bool,

    /// Resolve and stage locally without touching the Hub
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the catalog command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CatalogArgs {
    /// Artifact family to list
    #[arg(long, value_enum, default_value_t = ArtifactFamily::Corenlp)]
    pub family: ArtifactFamily,

    /// Directory scanned for language packages (stanza family)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
