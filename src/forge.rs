//! GitHub access for the release core.
//!
//! Pull request history is read through GraphQL, releases through REST. All
//! calls go through [`manager::ForgeManager`], which applies dry-run mode.

/// Remote repository configuration and paging defaults.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Dry-run aware wrapper around a forge implementation.
pub mod manager;

/// Request and response types shared by every forge.
pub mod request;

/// Common trait for forge platform abstraction.
pub mod traits;
