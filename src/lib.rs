//! Keeps a GitHub draft release in sync with the pull requests merged into
//! a branch since its last published release.
//!
//! Pull request titles are read as conventional commits to pick the next
//! semantic version, and the branch's draft release is created or renamed
//! to match.

pub mod analyzer;
pub mod cli;
pub mod command;
pub mod config;
mod error;
pub mod forge;
pub mod orchestrator;
pub mod pager;
pub mod sources;

pub use error::{DraftkeeperError, Result};
pub use orchestrator::{
    Orchestrator, UpsertAction, UpsertedRelease, upsert_draft_release,
};
pub use sources::pull_requests::fetch_pull_requests;

#[cfg(test)]
pub mod test_helpers;
