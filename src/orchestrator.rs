use derive_builder::Builder;
use log::*;
use serde::Serialize;
use std::rc::Rc;
use strum::Display;

use crate::{
    DraftkeeperError, Result,
    analyzer::{
        bump::bump_tag,
        impact::{VersionIncrement, infer_from_titles},
    },
    forge::{
        config::{DEFAULT_PAGE_SIZE, DEFAULT_RELEASE_PAGE_LIMIT, DEFAULT_TAG},
        manager::ForgeManager,
        request::{
            CreateReleaseRequest, IncomingPullRequests, PullRequest, Release,
            UpdateReleaseRequest,
        },
    },
    sources::{pull_requests::fetch_pull_requests, releases::ReleaseLookup},
};


/// What the upsert did to the draft release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
    None,
}

/// Outcome of a draft release upsert.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertedRelease {
    pub release: Option<Release>,
    pub action: UpsertAction,
    pub version: Option<String>,
    pub pull_request_count: usize,
    pub version_increment: VersionIncrement,
    pub last_release: Option<Release>,
    pub last_draft: Option<Release>,
    pub pull_request_titles: Vec<String>,
}

/// Remote state gathered before deciding what to do.
#[derive(Debug)]
struct ReleaseContext {
    last_draft: Option<Release>,
    last_release: Option<Release>,
    pull_requests: Vec<PullRequest>,
}

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub forge: Rc<ForgeManager>,
    pub branch: String,
    #[builder(default = "DEFAULT_TAG.to_string()")]
    pub default_tag: String,
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: usize,
    #[builder(default = "DEFAULT_RELEASE_PAGE_LIMIT")]
    pub release_page_limit: usize,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            DraftkeeperError::invalid_config(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Orchestrator::new(params)
    }
}

/// Upsert the draft release for `branch` with default paging.
pub async fn upsert_draft_release(
    forge: Rc<ForgeManager>,
    branch: &str,
    default_tag: &str,
) -> Result<UpsertedRelease> {
    Orchestrator::builder()
        .forge(forge)
        .branch(branch)
        .default_tag(default_tag)
        .build()?
        .upsert_draft_release()
        .await
}

/// Keeps the draft release of one branch in sync with the pull requests
/// merged since its last published release.
pub struct Orchestrator {
    forge: Rc<ForgeManager>,
    branch: String,
    default_tag: String,
    page_size: usize,
    release_page_limit: usize,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Result<Self> {
        if params.branch.is_empty() {
            return Err(DraftkeeperError::invalid_config("branch is required"));
        }

        if params.page_size == 0 {
            return Err(DraftkeeperError::invalid_config(
                "page size must be greater than 0",
            ));
        }

        Ok(Self {
            forge: params.forge,
            branch: params.branch,
            default_tag: params.default_tag,
            page_size: params.page_size,
            release_page_limit: params.release_page_limit,
        })
    }

    fn release_lookup(&self) -> ReleaseLookup<'_> {
        ReleaseLookup::new(&self.forge)
            .with_page_size(self.page_size)
            .with_page_limit(self.release_page_limit)
    }

    /// Latest draft and published releases for the branch, looked up one
    /// after the other.
    pub async fn current_releases(
        &self,
    ) -> Result<(Option<Release>, Option<Release>)> {
        let lookup = self.release_lookup();
        let last_draft = lookup.find_last_draft(&self.branch).await?;
        let last_release = lookup.find_last_published(&self.branch).await?;
        Ok((last_draft, last_release))
    }

    /// Create or update the branch's draft release from the pull requests
    /// merged since the last published release. Does nothing when there are
    /// none.
    pub async fn upsert_draft_release(&self) -> Result<UpsertedRelease> {
        let context = self.gather_context().await?;

        if context.pull_requests.is_empty() {
            info!(
                "no pull requests since last release on {}: nothing to do",
                self.branch
            );
            return Ok(UpsertedRelease {
                release: None,
                action: UpsertAction::None,
                version: None,
                pull_request_count: 0,
                version_increment: VersionIncrement::None,
                last_release: context.last_release,
                last_draft: context.last_draft,
                pull_request_titles: vec![],
            });
        }

        let titles = context
            .pull_requests
            .iter()
            .map(|pr| pr.title.clone())
            .collect::<Vec<String>>();

        let version_increment =
            infer_from_titles(titles.iter().map(String::as_str));

        let version = bump_tag(
            context.last_release.as_ref().map(|r| r.tag_name.as_str()),
            version_increment,
            &self.default_tag,
        )?;

        info!(
            "{} pull requests since last release: increment: {version_increment}, next version: {version}",
            titles.len()
        );

        let (release, action) = self
            .perform_upsert(&version, context.last_draft.as_ref())
            .await?;

        Ok(UpsertedRelease {
            release: Some(release),
            action,
            version: Some(version),
            pull_request_count: titles.len(),
            version_increment,
            last_release: context.last_release,
            last_draft: context.last_draft,
            pull_request_titles: titles,
        })
    }

    async fn gather_context(&self) -> Result<ReleaseContext> {
        let (last_draft, last_release) = self.current_releases().await?;

        let merged_since = last_release.as_ref().and_then(|r| r.published_at);

        let query = IncomingPullRequests {
            base_ref_name: self.branch.clone(),
            merged_since,
            page_size: self.page_size,
        };

        let pull_requests =
            fetch_pull_requests(&self.forge, query).collect().await?;

        Ok(ReleaseContext {
            last_draft,
            last_release,
            pull_requests,
        })
    }

    async fn perform_upsert(
        &self,
        version: &str,
        existing_draft: Option<&Release>,
    ) -> Result<(Release, UpsertAction)> {
        if let Some(draft) = existing_draft {
            info!("updating draft release {} to {version}", draft.tag_name);
            let release = self
                .forge
                .update_release(
                    draft,
                    UpdateReleaseRequest {
                        release_id: draft.id,
                        tag_name: version.to_string(),
                        name: version.to_string(),
                    },
                )
                .await?;
            return Ok((release, UpsertAction::Updated));
        }

        info!("creating draft release {version} on {}", self.branch);
        let release = self
            .forge
            .create_release(CreateReleaseRequest {
                tag_name: version.to_string(),
                target_commitish: self.branch.clone(),
                name: version.to_string(),
                body: "".to_string(),
                draft: true,
            })
            .await?;

        Ok((release, UpsertAction::Created))
    }
}
