//! Pull request history as a lazy, cursor-paginated sequence.
use async_trait::async_trait;
use log::*;

use crate::{
    Result,
    forge::{
        manager::ForgeManager,
        request::{Page, PullRequest, PullRequestQuery},
    },
    pager::{CursorPager, PageFetcher},
};

/// Serves pages of one pull request query, applying the merge cutoff for
/// incoming queries.
pub struct PullRequestFetcher<'a> {
    forge: &'a ForgeManager,
    query: PullRequestQuery,
}

pub type PullRequestPager<'a> = CursorPager<PullRequestFetcher<'a>>;

/// Lazily traverse pull requests for `query`. Nothing is fetched until the
/// first item is requested.
pub fn fetch_pull_requests(
    forge: &ForgeManager,
    query: impl Into<PullRequestQuery>,
) -> PullRequestPager<'_> {
    let query = query.into();
    let page_size = query.page_size();
    CursorPager::new(PullRequestFetcher { forge, query }, page_size)
}

#[async_trait]
impl PageFetcher for PullRequestFetcher<'_> {
    type Item = PullRequest;

    async fn fetch_page(
        &mut self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<PullRequest>> {
        let page = self
            .forge
            .query_pull_requests_page(&self.query, cursor, page_size)
            .await?;

        match &self.query {
            PullRequestQuery::Incoming(params) => {
                Ok(apply_merge_cutoff(page, params.merged_since))
            }
            PullRequestQuery::Outgoing(_) => Ok(page),
        }
    }
}

/// Results arrive newest-merged first, so the first pull request merged
/// before `merged_since` ends the traversal: it and everything after it are
/// dropped and no further page is fetched. Unmerged pull requests always
/// pass.
fn apply_merge_cutoff(
    mut page: Page<PullRequest>,
    merged_since: Option<chrono::DateTime<chrono::Utc>>,
) -> Page<PullRequest> {
    let Some(since) = merged_since else {
        return page;
    };

    let stale = page
        .items
        .iter()
        .position(|pr| pr.merged_at.is_some_and(|merged| merged < since));

    if let Some(pos) = stale {
        debug!(
            "pull request #{} merged before {since}: stopping",
            page.items[pos].number
        );
        page.items.truncate(pos);
        page.halt = true;
    }

    page
}
