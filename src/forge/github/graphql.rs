use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::request::PullRequestState;

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

// GitHub cannot order pull requests by merge date. UPDATED_AT is the closest
// proxy, so an old merged pull request that gets new activity can sort first
// and end an incoming traversal at the merge cutoff early.
pub const PULL_REQUESTS_QUERY: &str = r#"
query GetPullRequests(
    $owner: String!
    $repo: String!
    $first: Int!
    $cursor: String
    $baseRefName: String
    $headRefName: String
) {
    repository(owner: $owner, name: $repo) {
        pullRequests(
            first: $first
            after: $cursor
            baseRefName: $baseRefName
            headRefName: $headRefName
            states: [OPEN, MERGED]
            orderBy: { field: UPDATED_AT, direction: DESC }
        ) {
            nodes {
                number
                title
                baseRefName
                state
                mergedAt
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
pub struct PullRequestNode {
    pub number: u64,
    pub title: String,
    #[serde(rename = "baseRefName")]
    pub base_ref_name: String,
    pub state: PullRequestState,
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestConnection {
    pub nodes: Vec<PullRequestNode>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsRepository {
    #[serde(rename = "pullRequests")]
    pub pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsData {
    pub repository: Option<PullRequestsRepository>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsResult {
    pub data: Option<PullRequestsData>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Serialize)]
pub struct PullRequestsQueryVariables {
    pub owner: String,
    pub repo: String,
    pub first: usize,
    pub cursor: Option<String>,
    #[serde(rename = "baseRefName")]
    pub base_ref_name: Option<String>,
    #[serde(rename = "headRefName")]
    pub head_ref_name: Option<String>,
}
