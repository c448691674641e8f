//! Model catalog
//!
//! A catalog is the ordered list of models one run publishes. Providers are
//! swappable behind [`CatalogProvider`]: a static table for the CoreNLP
//! distribution, a directory listing for Stanza language packages, and a
//! user-filtered subset of either.

use std::path::PathBuf;

use crate::error::Result;

mod corenlp;


pub use corenlp::corenlp_catalog;

/// Which artifact family a run publishes.
///
/// The family fixes every per-distribution constant: hub namespace, repo
/// naming, artifact naming convention, LFS patterns, and model card text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ArtifactFamily {
    /// CoreNLP jar/zip packages, one repo per language variant
    Corenlp,
    /// Stanza model directories, one repo per language
    Stanza,
}

impl ArtifactFamily {
    /// Hub organization the repositories live under
    #[must_use]
    pub fn org(self) -> &'static str {
        "stanfordnlp"
    }

    /// Prefix for derived repository names (`<prefix>-<model_name>`)
    #[must_use]
    pub fn repo_prefix(self) -> &'static str {
        match self {
            Self::Corenlp => "corenlp",
            Self::Stanza => "stanza",
        }
    }

    /// Prefix of convention-named artifact files
    #[must_use]
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Corenlp => "stanford-corenlp",
            Self::Stanza => "stanza",
        }
    }

    /// Extension of convention-named artifact files
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Corenlp => "jar",
            Self::Stanza => "zip",
        }
    }

    /// Extension patterns that must be stored through LFS
    #[must_use]
    pub fn lfs_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Corenlp => &["*.jar", "*.zip"],
            Self::Stanza => &["*.zip", "*.pt"],
        }
    }
}

impl std::fmt::Display for ArtifactFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corenlp => write!(f, "corenlp"),
            Self::Stanza => write!(f, "stanza"),
        }
    }
}

/// One publishable unit: a model name plus its naming overrides.
///
/// Constructed once by a catalog provider and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Catalog key, unique within a run
    pub model_name: String,
    /// Short language code for the model card, absent for non-language
    /// artifacts such as the CoreNLP package itself
    pub language: Option<String>,
    /// Alternate local filename to try when resolving the artifact
    pub local_name: Option<String>,
    /// Name of the uploaded file; defaults to the naming convention
    pub remote_name: Option<String>,
    /// Repository name; defaults to `<repo-prefix>-<model_name>`
    pub repo_name: Option<String>,
}

impl ModelDescriptor {
    /// Descriptor with no overrides
    pub fn new(model_name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            language: Some(language.into()),
            local_name: None,
            remote_name: None,
            repo_name: None,
        }
    }

    /// Fully-qualified repository ID (`org/name`), derived deterministically
    #[must_use]
    pub fn repo_id(&self, family: ArtifactFamily) -> String {
        format!("{}/{}", family.org(), self.repo_name(family))
    }

    /// Bare repository name without the organization
    #[must_use]
    pub fn repo_name(&self, family: ArtifactFamily) -> String {
        self.repo_name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", family.repo_prefix(), self.model_name))
    }

    /// Name the artifact is uploaded under
    #[must_use]
    pub fn remote_file_name(&self, family: ArtifactFamily) -> String {
        self.remote_name.clone().unwrap_or_else(|| {
            format!(
                "{}-models-{}.{}",
                family.file_prefix(),
                self.model_name,
                family.extension()
            )
        })
    }
}

/// Source of the ordered model list for one run
pub trait CatalogProvider {
    /// Produce the catalog in publish order
    fn models(&self) -> Result<Vec<ModelDescriptor>>;
}

/// Fixed table of models, used for the CoreNLP distribution
pub struct StaticCatalog {
    entries: Vec<ModelDescriptor>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(entries: Vec<ModelDescriptor>) -> Self {
        Self { entries }
    }
}

impl CatalogProvider for StaticCatalog {
    fn models(&self) -> Result<Vec<ModelDescriptor>> {
        Ok(self.entries.clone())
    }
}

/// One model per subdirectory of a local root, used for Stanza packages
/// where the directory name is the language code.
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CatalogProvider for DirectoryCatalog {
    fn models(&self) -> Result<Vec<ModelDescriptor>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let mut model = ModelDescriptor::new(name.clone(), name.clone());
                // The artifact is the language directory itself.
                model.local_name = Some(name);
                model
            })
            .collect())
    }
}

/// Restrict a catalog to the requested model names, keeping catalog order.
///
/// An unknown name is a hard error so a typo cannot silently publish
/// nothing; the message lists the names the catalog does know.
pub fn filter_catalog(
    models: Vec<ModelDescriptor>,
    requested: &[String],
) -> std::result::Result<Vec<ModelDescriptor>, String> {
    if requested.is_empty() {
        return Ok(models);
    }

    let unknown: Vec<&String> = requested
        .iter()
        .filter(|name| !models.iter().any(|m| &m.model_name == *name))
        .collect();
    if !unknown.is_empty() {
        let known: Vec<&str> = models.iter().map(|m| m.model_name.as_str()).collect();
        return Err(format!(
            "Unknown model(s) {}. Known models: {}",
            unknown
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            known.join(", ")
        ));
    }

    Ok(models
        .into_iter()
        .filter(|m| requested.contains(&m.model_name))
        .collect())
}
