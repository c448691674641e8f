//! Publishing orchestration
//!
//! Drives one model through the fixed sequence resolve → repo ready →
//! upload → tag, and a catalog through the per-model loop. Models are
//! processed strictly sequentially in catalog order; one model's failure
//! never leaks state into the next, and only the `fail_fast` flag turns a
//! per-model failure into a batch halt.

use std::path::PathBuf;

use chrono::Utc;

use crate::card;
use crate::catalog::{ArtifactFamily, ModelDescriptor};
use crate::error::PublishError;
use crate::hub::{ensure_repo, ensure_tracked, retag, HubApi};
use crate::resolve::Resolver;
use crate::staging;

mod outcome;


pub use outcome::{BatchReport, ModelOutcome, ModelReport, Stage};

/// Fixed per-run configuration; the only state shared across models.
#[derive(Clone, Debug)]
pub struct PublishOptions {
    pub family: ArtifactFamily,
    /// Version string; the tag is `"v" + version`
    pub version: String,
    /// Search root for local artifacts
    pub input_dir: Option<PathBuf>,
    /// Root of the per-model staging directories
    pub staging_root: PathBuf,
    /// Halt the batch on the first fatal per-model error
    pub fail_fast: bool,
}

/// Batch progress notifications, for operator output.
pub enum Progress<'a> {
    Started { model: &'a str },
    Finished { report: &'a ModelReport },
}

/// Publishes a catalog of models against one hub.
pub struct Publisher<'a> {
    api: &'a dyn HubApi,
    opts: PublishOptions,
    resolver: Resolver,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub fn new(api: &'a dyn HubApi, opts: PublishOptions) -> Self {
        let resolver = Resolver::new(opts.family, opts.version.clone());
        Self {
            api,
            opts,
            resolver,
        }
    }

    /// Publish every model in catalog order.
    pub fn publish_all(
        &self,
        models: &[ModelDescriptor],
        mut progress: impl FnMut(Progress<'_>),
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for model in models {
            progress(Progress::Started {
                model: &model.model_name,
            });
            let model_report = self.publish_model(model);
            progress(Progress::Finished {
                report: &model_report,
            });
            let failed = model_report.is_failed();
            report.reports.push(model_report);
            if failed && self.opts.fail_fast {
                report.halted = true;
                break;
            }
        }
        report
    }

    /// Run one model through the full publish sequence.
    #[must_use]
    pub fn publish_model(&self, model: &ModelDescriptor) -> ModelReport {
        let outcome = match self.try_publish(model) {
            Ok((repo_url, no_op)) => ModelOutcome::Published { repo_url, no_op },
            Err((stage, error)) => ModelOutcome::Failed { stage, error },
        };
        ModelReport {
            model: model.model_name.clone(),
            outcome,
        }
    }

    fn try_publish(
        &self,
        model: &ModelDescriptor,
    ) -> Result<(String, bool), (Stage, PublishError)> {
        let artifact = self
            .resolver
            .resolve(model, self.opts.input_dir.as_deref())
            .map_err(|e| (Stage::Resolving, e))?;

        let repo_id = model.repo_id(self.opts.family);
        let repo_url = ensure_repo(self.api, &repo_id).map_err(|e| (Stage::RepoReady, e))?;
        for pattern in self.opts.family.lfs_patterns() {
            ensure_tracked(self.api, &repo_id, pattern).map_err(|e| (Stage::RepoReady, e))?;
        }

        let rendered = card::render(
            self.opts.family,
            &model.model_name,
            model.language.as_deref(),
            Utc::now(),
        );
        let staged = staging::stage(
            &self.opts.staging_root,
            self.opts.family,
            model,
            &artifact,
            &rendered,
        )
        .map_err(|e| (Stage::Uploading, e))?;
        let outcome = self
            .api
            .upload_folder(
                &repo_id,
                &staged,
                &format!("Add model {}", self.opts.version),
                self.opts.family.lfs_patterns(),
            )
            .map_err(|e| (Stage::Uploading, e))?;

        let tag = format!("v{}", self.opts.version);
        retag(self.api, &repo_id, &tag).map_err(|e| (Stage::Tagging, e))?;

        Ok((repo_url, outcome.is_no_op()))
    }
}
