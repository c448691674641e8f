//! The hosting-service interface the engine consumes

use std::path::Path;

use crate::error::Result;

/// Outcome of a commit-producing operation.
///
/// "Nothing changed" is a normal outcome, never an error: re-running a
/// publish against identical content must not abort the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created
    Committed,
    /// The upload matched the current revision; no commit was made
    NoChanges,
}

impl CommitOutcome {
    #[must_use]
    pub fn is_no_op(self) -> bool {
        matches!(self, Self::NoChanges)
    }
}

/// Operations the publishing engine needs from the remote hosting service.
///
/// Every operation treats the service's "already exists" / "already
/// absent" responses as success; idempotence under re-execution is the
/// contract, not an optimization.
pub trait HubApi {
    /// Create the repository if absent; return its URL either way.
    fn create_repo(&self, repo_id: &str) -> Result<String>;

    /// Fetch a file from the repository head; `Ok(None)` when absent.
    fn get_file(&self, repo_id: &str, path: &str) -> Result<Option<Vec<u8>>>;

    /// Commit a single file.
    fn put_file(
        &self,
        repo_id: &str,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<CommitOutcome>;

    /// Commit the contents of a local directory as one revision.
    ///
    /// Files matching one of `lfs_patterns` are stored through the
    /// service's large-file channel rather than inline; remote files
    /// matching a pattern that are not part of the new upload are removed
    /// in the same commit.
    fn upload_folder(
        &self,
        repo_id: &str,
        local_dir: &Path,
        message: &str,
        lfs_patterns: &[&str],
    ) -> Result<CommitOutcome>;

    /// List the names of the repository's tags.
    fn list_tags(&self, repo_id: &str) -> Result<Vec<String>>;

    /// Delete a tag; deleting an absent tag is success.
    fn delete_tag(&self, repo_id: &str, tag: &str) -> Result<()>;

    /// Create a tag pointing at the current head.
    fn create_tag(&self, repo_id: &str, tag: &str, message: &str) -> Result<()>;
}

/// `*.ext`-style pattern match used for LFS routing and stale-file
/// deletion.
pub(crate) fn matches_pattern(pattern: &str, path: &str) -> bool {
    match pattern.strip_prefix('*') {
        Some(suffix) => path.ends_with(suffix),
        None => path == pattern,
    }
}

/// Collect a directory tree as (repo path, bytes) pairs, sorted for
/// deterministic commit payloads.
pub(crate) fn collect_files(dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    fn walk(dir: &Path, prefix: &str, out: &mut Vec<(String, Vec<u8>)>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let repo_path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if entry.path().is_dir() {
                walk(&entry.path(), &repo_path, out)?;
            } else {
                out.push((repo_path, std::fs::read(entry.path())?));
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    walk(dir, "", &mut files)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}
