//! Artifact resolution
//!
//! Maps a catalog entry to the single local file or directory to upload.
//! Pure lookup: candidates are tried in a fixed order and the first path
//! that exists wins.

use std::path::{Path, PathBuf};

use crate::catalog::{ArtifactFamily, ModelDescriptor};
use crate::error::{PublishError, Result};

/// Resolves local artifact paths for one run's family and version.
#[derive(Clone, Debug)]
pub struct Resolver {
    prefix: String,
    extension: String,
    version: String,
}

impl Resolver {
    #[must_use]
    pub fn new(family: ArtifactFamily, version: impl Into<String>) -> Self {
        Self {
            prefix: family.file_prefix().to_string(),
            extension: family.extension().to_string(),
            version: version.into(),
        }
    }

    /// Candidate filenames in precedence order: the convention name, the
    /// descriptor's alternate name, then the version-qualified name.
    #[must_use]
    pub fn candidates(&self, model: &ModelDescriptor) -> Vec<String> {
        let mut names = vec![format!(
            "{}-models-{}.{}",
            self.prefix, model.model_name, self.extension
        )];
        if let Some(local) = &model.local_name {
            if !names.contains(local) {
                names.push(local.clone());
            }
        }
        names.push(format!(
            "{}-{}-models-{}.{}",
            self.prefix, self.version, model.model_name, self.extension
        ));
        names
    }

    /// Return the first existing candidate path.
    ///
    /// Each candidate is tried under `input_dir` first (when set), then
    /// relative to the working directory. Fails with every attempted path
    /// when nothing exists; resolution is all-or-nothing.
    pub fn resolve(&self, model: &ModelDescriptor, input_dir: Option<&Path>) -> Result<PathBuf> {
        let mut attempted = Vec::new();
        for name in self.candidates(model) {
            if let Some(dir) = input_dir {
                let path = dir.join(&name);
                if path.exists() {
                    return Ok(path);
                }
                attempted.push(path);
            }
            let path = PathBuf::from(&name);
            if path.exists() {
                return Ok(path);
            }
            attempted.push(path);
        }
        Err(PublishError::ArtifactNotFound {
            model: model.model_name.clone(),
            attempted,
        })
    }
}
