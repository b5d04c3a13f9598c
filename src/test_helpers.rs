//! Common test helper functions shared across test modules.
//!
//! Fixtures here stand in for the remote: staged pull requests and releases
//! are served page by page through [`page_of`], the same way the forge
//! returns them (newest first).
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::forge::{
    config::RemoteConfig,
    manager::{ForgeManager, ForgeOptions},
    request::{Page, PullRequest, PullRequestState, Release},
    traits::MockForge,
};

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "test-owner".to_string(),
        repo: "test-repo".to_string(),
        path: "test-owner/test-repo".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// MockForge with the remote config expectation already in place.
pub fn mock_forge() -> MockForge {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(create_test_remote_config);
    mock_forge
}

/// Wraps a mock forge in a non dry-run manager.
pub fn create_test_manager(mock_forge: MockForge) -> ForgeManager {
    ForgeManager::new(Box::new(mock_forge), ForgeOptions::default())
}

pub fn timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

/// Serves `items` as a connection where the cursor is the index of the next
/// item.
pub fn page_of<T: Clone>(
    items: &[T],
    cursor: Option<String>,
    page_size: usize,
) -> Page<T> {
    let start = cursor.map(|c| c.parse::<usize>().unwrap()).unwrap_or(0);
    let start = start.min(items.len());
    let end = (start + page_size).min(items.len());

    Page::new(
        items[start..end].to_vec(),
        Some(end.to_string()),
        end < items.len(),
    )
}

pub fn merged_pull_request(
    number: u64,
    title: &str,
    merged_at: &str,
) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        base_ref_name: "main".to_string(),
        state: PullRequestState::Merged,
        merged_at: Some(timestamp(merged_at)),
    }
}

pub fn open_pull_request(number: u64, title: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        base_ref_name: "main".to_string(),
        state: PullRequestState::Open,
        merged_at: None,
    }
}

/// `count` merged pull requests, newest first, one hour apart.
pub fn stage_pull_requests(count: u64) -> Vec<PullRequest> {
    let newest = timestamp("2026-01-31T00:00:00Z");
    (1..=count)
        .map(|number| PullRequest {
            number,
            title: format!("PR {number}"),
            base_ref_name: "main".to_string(),
            state: PullRequestState::Merged,
            merged_at: Some(
                newest - chrono::Duration::hours(number as i64),
            ),
        })
        .collect()
}

pub fn draft_release(id: u64, tag: &str, branch: &str) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        name: tag.to_string(),
        body: format!("draft notes for {tag}"),
        target_commitish: branch.to_string(),
        is_draft: true,
        published_at: None,
    }
}

pub fn published_release(
    id: u64,
    tag: &str,
    branch: &str,
    published_at: &str,
) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        name: tag.to_string(),
        body: format!("notes for {tag}"),
        target_commitish: branch.to_string(),
        is_draft: false,
        published_at: Some(timestamp(published_at)),
    }
}

/// Expect pull request pages to be served from `prs`, `times` times.
pub fn expect_pull_request_pages(
    mock_forge: &mut MockForge,
    prs: Vec<PullRequest>,
    times: usize,
) {
    mock_forge
        .expect_query_pull_requests_page()
        .times(times)
        .returning(move |_, cursor, page_size| {
            Ok(page_of(&prs, cursor, page_size))
        });
}

/// Expect release pages to be served from `releases`.
pub fn expect_release_pages(mock_forge: &mut MockForge, releases: Vec<Release>) {
    mock_forge
        .expect_list_releases_page()
        .returning(move |cursor, page_size| {
            Ok(page_of(&releases, cursor, page_size))
        });
}
