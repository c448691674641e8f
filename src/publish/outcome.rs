//! Per-model and per-batch publish outcomes

use std::fmt;

use crate::error::PublishError;

/// The step of the publish sequence a model was in when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    RepoReady,
    Uploading,
    Tagging,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resolving => "resolving",
            Self::RepoReady => "preparing repository",
            Self::Uploading => "uploading",
            Self::Tagging => "tagging",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Terminal state of one model's publish.
#[derive(Debug)]
pub enum ModelOutcome {
    Published {
        repo_url: String,
        /// The upload matched the current revision; the tag was still moved
        no_op: bool,
    },
    Failed {
        stage: Stage,
        error: PublishError,
    },
}

/// One model's name with its terminal state.
#[derive(Debug)]
pub struct ModelReport {
    pub model: String,
    pub outcome: ModelOutcome,
}

impl ModelReport {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ModelOutcome::Failed { .. })
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ModelOutcome::Published { repo_url, no_op } => {
                write!(f, "{}: published to {repo_url}", self.model)?;
                if *no_op {
                    write!(f, " (no changes)")?;
                }
                Ok(())
            }
            ModelOutcome::Failed { stage, error } => {
                write!(f, "{}: failed while {stage}: {error}", self.model)
            }
        }
    }
}

/// Every model's outcome for one run, in catalog order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<ModelReport>,
    /// Whether `fail_fast` stopped the batch before the end of the catalog
    pub halted: bool,
}

impl BatchReport {
    pub fn failed(&self) -> impl Iterator<Item = &ModelReport> {
        self.reports.iter().filter(|r| r.is_failed())
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    #[must_use]
    pub fn is_all_published(&self) -> bool {
        !self.halted && self.failure_count() == 0
    }

    /// Whether every processed model failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.reports.is_empty() && self.failure_count() == self.reports.len()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Published {} of {} model(s){}",
            self.reports.len() - self.failure_count(),
            self.reports.len(),
            if self.halted { " (halted)" } else { "" }
        )?;
        for report in &self.reports {
            writeln!(f, "  {report}")?;
        }
        Ok(())
    }
}
