//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreateReleaseRequest, Page, PullRequest, PullRequestQuery,
            Release, ReleaseNotesRequest, UpdateReleaseRequest,
        },
    },
};

/// Remote operations the release core needs from a forge.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    /// Fetch one page of pull requests. Results are newest first.
    async fn query_pull_requests_page(
        &self,
        query: &PullRequestQuery,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<PullRequest>>;

    /// Fetch one page of releases, newest first, drafts included.
    async fn list_releases_page(
        &self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<Release>>;

    async fn create_release(&self, req: CreateReleaseRequest)
    -> Result<Release>;

    async fn update_release(&self, req: UpdateReleaseRequest)
    -> Result<Release>;

    async fn generate_release_notes(
        &self,
        req: ReleaseNotesRequest,
    ) -> Result<String>;
}
