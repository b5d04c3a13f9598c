use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::forge::config::DEFAULT_PAGE_SIZE;

/// One page of a cursor-paginated connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    /// Set by a consumer-side filter to stop paging after this page.
    pub halt: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            end_cursor: None,
            has_next_page: false,
            halt: false,
        }
    }
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        end_cursor: Option<String>,
        has_next_page: bool,
    ) -> Self {
        Self {
            items,
            end_cursor,
            has_next_page,
            halt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    Open,
    Merged,
}

/// Snapshot of a pull request as returned by the forge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub base_ref_name: String,
    pub state: PullRequestState,
    pub merged_at: Option<DateTime<Utc>>,
}

/// Snapshot of a release as returned by the forge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub target_commitish: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into))]
/// Pull requests merged (or waiting to merge) into a base branch.
pub struct IncomingPullRequests {
    pub base_ref_name: String,
    #[builder(default)]
    pub merged_since: Option<DateTime<Utc>>,
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into))]
/// Pull requests opened from a head branch.
pub struct OutgoingPullRequests {
    pub head_ref_name: String,
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: usize,
}

/// Shape of a pull request traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum PullRequestQuery {
    Incoming(IncomingPullRequests),
    Outgoing(OutgoingPullRequests),
}

impl PullRequestQuery {
    pub fn page_size(&self) -> usize {
        match self {
            PullRequestQuery::Incoming(params) => params.page_size,
            PullRequestQuery::Outgoing(params) => params.page_size,
        }
    }
}

impl From<IncomingPullRequests> for PullRequestQuery {
    fn from(params: IncomingPullRequests) -> Self {
        Self::Incoming(params)
    }
}

impl From<OutgoingPullRequests> for PullRequestQuery {
    fn from(params: OutgoingPullRequests) -> Self {
        Self::Outgoing(params)
    }
}

#[derive(Debug, Clone)]
/// Request to create a new release.
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
}

#[derive(Debug, Clone)]
/// Request to rename an existing release. The body is left untouched.
pub struct UpdateReleaseRequest {
    pub release_id: u64,
    pub tag_name: String,
    pub name: String,
}

#[derive(Debug, Clone)]
/// Request for the forge's auto-generated release notes.
pub struct ReleaseNotesRequest {
    pub tag_name: String,
    pub target_commitish: String,
    pub previous_tag_name: String,
}
