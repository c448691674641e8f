//! Empujar: publish versioned model artifacts to Hugging Face Hub
//!
//! For each model in a catalog, empujar resolves the local artifact that
//! matches the model's naming convention, ensures the remote repository
//! exists with the right LFS tracking rules, uploads the artifact together
//! with a freshly generated model card as one commit, and moves the
//! version tag to the new revision. Every remote step is idempotent, so a
//! batch interrupted anywhere can simply be re-run.
//!
//! # Example
//!
//! ```ignore
//! use empujar::catalog::{corenlp_catalog, ArtifactFamily};
//! use empujar::hub::HttpHubClient;
//! use empujar::publish::{PublishOptions, Publisher};
//!
//! let client = HttpHubClient::new()?;
//! let options = PublishOptions {
//!     family: ArtifactFamily::Corenlp,
//!     version: "4.5.4".to_string(),
//!     input_dir: Some("/data/corenlp".into()),
//!     staging_root: "hub".into(),
//!     fail_fast: false,
//! };
//! let publisher = Publisher::new(&client, options);
//! let report = publisher.publish_all(&corenlp_catalog(), |_| {});
//! println!("{report}");
//! ```

pub mod card;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod hub;
pub mod publish;
pub mod resolve;
pub mod staging;

pub use error::{PublishError, Result};
