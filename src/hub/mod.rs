//! Hub access layer
//!
//! [`HubApi`] is exactly the surface the publishing engine consumes from
//! the hosting service; [`HttpHubClient`] implements it against the
//! Hugging Face Hub REST API. Repository state and tag lifecycle logic sit
//! on top of the trait so they can be exercised against an in-memory hub.

mod api;
mod client;
mod repo;
mod tags;

#[cfg(test)]
pub(crate) mod fake;


pub use api::{CommitOutcome, HubApi};
pub use client::HttpHubClient;
pub use repo::{ensure_repo, ensure_tracked, LFS_RULE_ATTRIBUTES, TRACKING_FILE};
pub use tags::retag;
