//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreateReleaseRequest, Page, PullRequest, PullRequestQuery,
            Release, ReleaseNotesRequest, UpdateReleaseRequest,
        },
        traits::Forge,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ForgeOptions {
    pub dry_run: bool,
}

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
    options: ForgeOptions,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, options: ForgeOptions) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
            options,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn query_pull_requests_page(
        &self,
        query: &PullRequestQuery,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<PullRequest>> {
        debug!(
            "fetching pull request page: cursor: {:?}, page_size: {page_size}",
            cursor
        );
        self.forge
            .query_pull_requests_page(query, cursor, page_size)
            .await
    }

    pub async fn list_releases_page(
        &self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<Release>> {
        debug!(
            "fetching release page: cursor: {:?}, page_size: {page_size}",
            cursor
        );
        self.forge.list_releases_page(cursor, page_size).await
    }

    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        if self.options.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(Release {
                id: 0,
                tag_name: req.tag_name,
                name: req.name,
                body: req.body,
                target_commitish: req.target_commitish,
                is_draft: req.draft,
                published_at: None,
            });
        }

        self.forge.create_release(req).await
    }

    /// Rename an existing release. In dry-run mode the current release is
    /// echoed back with the new tag and name applied.
    pub async fn update_release(
        &self,
        current: &Release,
        req: UpdateReleaseRequest,
    ) -> Result<Release> {
        if self.options.dry_run {
            warn!("dry_run: would update release: req: {:#?}", req);
            return Ok(Release {
                tag_name: req.tag_name,
                name: req.name,
                ..current.clone()
            });
        }

        self.forge.update_release(req).await
    }

    pub async fn generate_release_notes(
        &self,
        req: ReleaseNotesRequest,
    ) -> Result<String> {
        self.forge.generate_release_notes(req).await
    }
}
