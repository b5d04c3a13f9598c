//! Remote state read by the release core: pull request history and the
//! release listing.

/// Lazy pull request traversal with the merge cutoff short-circuit.
pub mod pull_requests;

/// Latest draft and published release lookup.
pub mod releases;
