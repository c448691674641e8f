//! Repository state management
//!
//! Brings a remote repository to the state an upload requires: existing,
//! and with LFS tracking rules for the artifact's extensions. Both
//! operations are idempotent; a re-run against a ready repository makes
//! no remote writes.

use super::api::HubApi;
use crate::error::{PublishError, Result};

/// The line-oriented rule file holding LFS tracking configuration
pub const TRACKING_FILE: &str = ".gitattributes";

/// Attributes appended to a pattern to route it through LFS
pub const LFS_RULE_ATTRIBUTES: &str = "filter=lfs diff=lfs merge=lfs -text";

/// Create the repository if it does not exist yet; return its URL.
pub fn ensure_repo(api: &dyn HubApi, repo_id: &str) -> Result<String> {
    api.create_repo(repo_id)
}

/// Ensure `pattern` is routed through LFS, returning whether a rule had
/// to be added.
///
/// The rule update is its own isolated commit, separate from the artifact
/// upload, so an upload failure can never leave the tracking file
/// half-written. A repository with no tracking file yet starts from an
/// empty rule set; an unreadable or malformed file is fatal rather than
/// silently replaced.
pub fn ensure_tracked(api: &dyn HubApi, repo_id: &str, pattern: &str) -> Result<bool> {
    let raw = api.get_file(repo_id, TRACKING_FILE)?.unwrap_or_default();
    let existing = String::from_utf8(raw).map_err(|_| PublishError::ConfigCorrupt {
        repo_id: repo_id.to_string(),
        message: format!("{TRACKING_FILE} is not valid UTF-8"),
    })?;

    for line in existing.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let rule_pattern = fields.next();
        if fields.next().is_none() {
            return Err(PublishError::ConfigCorrupt {
                repo_id: repo_id.to_string(),
                message: format!("rule line without attributes: '{line}'"),
            });
        }
        if rule_pattern == Some(pattern) {
            return Ok(false);
        }
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("{pattern} {LFS_RULE_ATTRIBUTES}\n"));

    api.put_file(
        repo_id,
        TRACKING_FILE,
        updated.as_bytes(),
        "Update tracked files",
    )?;
    Ok(true)
}
