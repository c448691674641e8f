//! In-memory hub used by tests
//!
//! Models the remote service's observable behavior: per-repo file trees,
//! a linear commit history, tags pointing at commits, and the
//! already-exists / already-absent / no-change signals the engine must
//! treat as success. Tag creation fails when the tag exists, so tests
//! catch any reordering of the delete-then-create swap.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::api::{collect_files, matches_pattern, CommitOutcome, HubApi};
use crate::error::{PublishError, Result};

#[derive(Default)]
pub struct FakeRepo {
    pub files: BTreeMap<String, Vec<u8>>,
    pub commits: Vec<String>,
    /// Tag name to the head value it was created at
    pub tags: BTreeMap<String, usize>,
    pub create_calls: usize,
}

impl FakeRepo {
    pub fn head(&self) -> usize {
        self.commits.len()
    }
}

#[derive(Default)]
pub struct FakeHub {
    repos: RefCell<HashMap<String, FakeRepo>>,
    fail_uploads_for: RefCell<Option<String>>,
}

impl FakeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload into `repo_id` fail
    pub fn fail_uploads(&self, repo_id: &str) {
        *self.fail_uploads_for.borrow_mut() = Some(repo_id.to_string());
    }

    /// Pre-populate a file without counting a commit
    pub fn seed_file(&self, repo_id: &str, path: &str, content: &[u8]) {
        let mut repos = self.repos.borrow_mut();
        let repo = repos.entry(repo_id.to_string()).or_default();
        repo.files.insert(path.to_string(), content.to_vec());
    }

    pub fn inspect<R>(&self, repo_id: &str, f: impl FnOnce(&FakeRepo) -> R) -> R {
        let repos = self.repos.borrow();
        let repo = repos
            .get(repo_id)
            .unwrap_or_else(|| panic!("no such repo: {repo_id}"));
        f(repo)
    }

    pub fn repo_count(&self) -> usize {
        self.repos.borrow().len()
    }

    pub fn has_repo(&self, repo_id: &str) -> bool {
        self.repos.borrow().contains_key(repo_id)
    }
}

impl HubApi for FakeHub {
    fn create_repo(&self, repo_id: &str) -> Result<String> {
        let mut repos = self.repos.borrow_mut();
        let repo = repos.entry(repo_id.to_string()).or_default();
        repo.create_calls += 1;
        Ok(format!("fake://{repo_id}"))
    }

    fn get_file(&self, repo_id: &str, path: &str) -> Result<Option<Vec<u8>>> {
        let repos = self.repos.borrow();
        let repo = repos
            .get(repo_id)
            .ok_or_else(|| PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: "repository does not exist".into(),
            })?;
        Ok(repo.files.get(path).cloned())
    }

    fn put_file(
        &self,
        repo_id: &str,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<CommitOutcome> {
        let mut repos = self.repos.borrow_mut();
        let repo = repos
            .get_mut(repo_id)
            .ok_or_else(|| PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: "repository does not exist".into(),
            })?;

        if repo.files.get(path).map(Vec::as_slice) == Some(content) {
            return Ok(CommitOutcome::NoChanges);
        }
        repo.files.insert(path.to_string(), content.to_vec());
        repo.commits.push(message.to_string());
        Ok(CommitOutcome::Committed)
    }

    fn upload_folder(
        &self,
        repo_id: &str,
        local_dir: &Path,
        message: &str,
        lfs_patterns: &[&str],
    ) -> Result<CommitOutcome> {
        if self.fail_uploads_for.borrow().as_deref() == Some(repo_id) {
            return Err(PublishError::UploadFailed {
                path: repo_id.to_string(),
                message: "injected upload failure".into(),
            });
        }

        let files = collect_files(local_dir)?;
        let mut repos = self.repos.borrow_mut();
        let repo = repos
            .get_mut(repo_id)
            .ok_or_else(|| PublishError::RepoUnavailable {
                repo_id: repo_id.to_string(),
                message: "repository does not exist".into(),
            })?;

        let deletions: Vec<String> = repo
            .files
            .keys()
            .filter(|remote| {
                lfs_patterns.iter().any(|p| matches_pattern(p, remote))
                    && !files.iter().any(|(path, _)| &path == remote)
            })
            .cloned()
            .collect();

        let unchanged = deletions.is_empty()
            && files
                .iter()
                .all(|(path, content)| repo.files.get(path) == Some(content));
        if unchanged {
            return Ok(CommitOutcome::NoChanges);
        }

        for path in &deletions {
            repo.files.remove(path);
        }
        for (path, content) in files {
            repo.files.insert(path, content);
        }
        repo.commits.push(message.to_string());
        Ok(CommitOutcome::Committed)
    }

    fn list_tags(&self, repo_id: &str) -> Result<Vec<String>> {
        let repos = self.repos.borrow();
        Ok(repos
            .get(repo_id)
            .map(|repo| repo.tags.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn delete_tag(&self, repo_id: &str, tag: &str) -> Result<()> {
        let mut repos = self.repos.borrow_mut();
        if let Some(repo) = repos.get_mut(repo_id) {
            // Absent tags delete successfully.
            repo.tags.remove(tag);
        }
        Ok(())
    }

    fn create_tag(&self, repo_id: &str, tag: &str, _message: &str) -> Result<()> {
        let mut repos = self.repos.borrow_mut();
        let repo = repos
            .get_mut(repo_id)
            .ok_or_else(|| PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: "repository does not exist".into(),
            })?;
        if repo.tags.contains_key(tag) {
            return Err(PublishError::TagOperationFailed {
                tag: tag.to_string(),
                message: "tag already exists".into(),
            });
        }
        let head = repo.head();
        repo.tags.insert(tag.to_string(), head);
        Ok(())
    }
}
