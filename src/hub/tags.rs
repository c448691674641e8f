//! Version tag lifecycle
//!
//! A version tag is replaced by delete-then-create, never updated in
//! place. The two steps must stay in this order: a crash between them
//! leaves only a missing tag, which the next run creates.

use super::api::HubApi;
use crate::error::Result;

/// Point `tag` at the repository's current head, replacing any existing
/// tag of that name.
pub fn retag(api: &dyn HubApi, repo_id: &str, tag: &str) -> Result<()> {
    let tags = api.list_tags(repo_id)?;
    if tags.iter().any(|t| t == tag) {
        api.delete_tag(repo_id, tag)?;
    }
    api.create_tag(
        repo_id,
        tag,
        &format!("Adding new version of models {tag}"),
    )
}
