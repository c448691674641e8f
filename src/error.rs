//! Error types for publishing operations
//!
//! Every error is fatal for the model currently being published and for
//! that model only; the batch loop decides whether it halts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors that can occur while publishing a model
#[derive(Debug, Error)]
pub enum PublishError {
    /// No local artifact matched any candidate path
    #[error("Cannot find {model} model. Looked in {}", format_attempted(attempted))]
    ArtifactNotFound {
        model: String,
        attempted: Vec<PathBuf>,
    },

    /// Repository could not be created or read
    #[error("Repository '{repo_id}' unavailable: {message}")]
    RepoUnavailable { repo_id: String, message: String },

    /// The remote large-file tracking rule file is unreadable or malformed
    #[error("Corrupt tracking configuration in '{repo_id}': {message}")]
    ConfigCorrupt { repo_id: String, message: String },

    /// Remote write failed
    #[error("Failed to upload '{path}': {message}")]
    UploadFailed { path: String, message: String },

    /// Tag listing, deletion, or creation failed
    #[error("Tag operation failed for '{tag}': {message}")]
    TagOperationFailed { tag: String, message: String },

    /// Missing write token
    #[error("Authentication required: set HF_TOKEN or log in with huggingface-cli")]
    AuthRequired,

    /// Invalid repository ID format
    #[error("Invalid repository ID '{repo_id}': must be 'owner/name'")]
    InvalidRepoId { repo_id: String },

    /// Transport-level HTTP error
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_attempted(attempted: &[PathBuf]) -> String {
    attempted
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
