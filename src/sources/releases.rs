//! Lookup of the latest draft and published releases for a branch.
use async_trait::async_trait;
use log::*;

use crate::{
    DraftkeeperError, Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, DEFAULT_RELEASE_PAGE_LIMIT},
        manager::ForgeManager,
        request::{Page, Release},
    },
    pager::{CursorPager, PageFetcher},
};

struct ReleaseFetcher<'a> {
    forge: &'a ForgeManager,
}

#[async_trait]
impl PageFetcher for ReleaseFetcher<'_> {
    type Item = Release;

    async fn fetch_page(
        &mut self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<Release>> {
        self.forge.list_releases_page(cursor, page_size).await
    }
}

/// Scans the release listing, newest first. Every lookup is an independent
/// scan bounded by `page_limit` pages.
pub struct ReleaseLookup<'a> {
    forge: &'a ForgeManager,
    page_size: usize,
    page_limit: usize,
}

impl<'a> ReleaseLookup<'a> {
    pub fn new(forge: &'a ForgeManager) -> Self {
        Self {
            forge,
            page_size: DEFAULT_PAGE_SIZE,
            page_limit: DEFAULT_RELEASE_PAGE_LIMIT,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Most recent published release targeting `branch`.
    pub async fn find_last_published(
        &self,
        branch: &str,
    ) -> Result<Option<Release>> {
        let release = self
            .find_first("published", branch, |r| !r.is_draft)
            .await?;

        debug!(
            "last published release for {branch}: {:?}",
            release.as_ref().map(|r| &r.tag_name)
        );

        Ok(release)
    }

    /// Most recent draft release targeting `branch`.
    pub async fn find_last_draft(&self, branch: &str) -> Result<Option<Release>> {
        let release = self
            .find_first("draft", branch, |r| r.is_draft)
            .await?;

        debug!(
            "last draft release for {branch}: {:?}",
            release.as_ref().map(|r| &r.tag_name)
        );

        Ok(release)
    }

    /// First release of `kind` targeting `branch`. Running out of pages at
    /// the limit is an error, not an absent release.
    async fn find_first<P>(
        &self,
        kind: &str,
        branch: &str,
        predicate: P,
    ) -> Result<Option<Release>>
    where
        P: Fn(&Release) -> bool,
    {
        let fetcher = ReleaseFetcher { forge: self.forge };
        let mut pager = CursorPager::new(fetcher, self.page_size)
            .with_page_limit(self.page_limit);

        while let Some(release) = pager.next().await? {
            if release.target_commitish == branch && predicate(&release) {
                return Ok(Some(release));
            }
        }

        if pager.truncated() {
            return Err(DraftkeeperError::ReleaseScanLimit {
                kind: kind.to_string(),
                branch: branch.to_string(),
                page_limit: self.page_limit,
            });
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DraftkeeperError, test_helpers::*};

    fn staged_releases() -> Vec<Release> {
        vec![
            draft_release(6, "v2.1.0", "develop"),
            draft_release(5, "v1.3.0", "main"),
            published_release(4, "v2.0.0", "develop", "2026-01-09T00:00:00Z"),
            published_release(3, "v1.2.0", "main", "2026-01-08T00:00:00Z"),
            published_release(2, "v1.1.0", "main", "2026-01-01T00:00:00Z"),
        ]
    }

    #[tokio::test]
    async fn test_find_last_published_matches_branch() {
        let mut mock_forge = mock_forge();
        expect_release_pages(&mut mock_forge, staged_releases());
        let manager = create_test_manager(mock_forge);

        let release = ReleaseLookup::new(&manager)
            .find_last_published("main")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(release.id, 3);
        assert_eq!(release.tag_name, "v1.2.0");
        assert!(release.published_at.is_some());
    }

    #[tokio::test]
    async fn test_find_last_draft_matches_branch() {
        let mut mock_forge = mock_forge();
        expect_release_pages(&mut mock_forge, staged_releases());
        let manager = create_test_manager(mock_forge);

        let release = ReleaseLookup::new(&manager)
            .find_last_draft("main")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(release.id, 5);
        assert!(release.is_draft);
        assert!(release.published_at.is_none());
    }

    #[tokio::test]
    async fn test_lookup_returns_none_without_match() {
        let mut mock_forge = mock_forge();
        expect_release_pages(&mut mock_forge, staged_releases());
        let manager = create_test_manager(mock_forge);
        let lookup = ReleaseLookup::new(&manager);

        assert!(lookup.find_last_draft("feature").await.unwrap().is_none());
        assert!(lookup.find_last_published("feature").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_stops_scanning_at_first_match() {
        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_releases_page()
            .times(1)
            .returning(|cursor, page_size| {
                Ok(page_of(&staged_releases(), cursor, page_size))
            });
        let manager = create_test_manager(mock_forge);

        let release = ReleaseLookup::new(&manager)
            .with_page_size(2)
            .find_last_draft("main")
            .await
            .unwrap();

        assert_eq!(release.unwrap().id, 5);
    }

    #[tokio::test]
    async fn test_lookup_scans_across_pages() {
        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_releases_page()
            .times(2)
            .returning(|cursor, page_size| {
                Ok(page_of(&staged_releases(), cursor, page_size))
            });
        let manager = create_test_manager(mock_forge);

        let release = ReleaseLookup::new(&manager)
            .with_page_size(2)
            .find_last_published("main")
            .await
            .unwrap();

        assert_eq!(release.unwrap().tag_name, "v1.2.0");
    }

    #[tokio::test]
    async fn test_lookup_past_page_limit_is_an_error() {
        let mut releases = (10..40)
            .map(|id| draft_release(id, "v9.9.9", "other"))
            .collect::<Vec<Release>>();
        releases.push(published_release(1, "v1.0.0", "main", "2025-01-01T00:00:00Z"));

        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_releases_page()
            .times(3)
            .returning(move |cursor, page_size| {
                Ok(page_of(&releases, cursor, page_size))
            });
        let manager = create_test_manager(mock_forge);

        let err = ReleaseLookup::new(&manager)
            .with_page_size(10)
            .with_page_limit(3)
            .find_last_published("main")
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            DraftkeeperError::ReleaseScanLimit { branch, page_limit: 3, .. }
                if branch == "main"
        ));
        assert!(err.to_string().contains("no published release for main"));
    }

    #[tokio::test]
    async fn test_lookup_match_on_last_allowed_page() {
        let mut releases = (10..29)
            .map(|id| draft_release(id, "v9.9.9", "other"))
            .collect::<Vec<Release>>();
        releases.push(draft_release(5, "v1.3.0", "main"));
        releases.push(published_release(1, "v1.0.0", "main", "2025-01-01T00:00:00Z"));

        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_releases_page()
            .times(2)
            .returning(move |cursor, page_size| {
                Ok(page_of(&releases, cursor, page_size))
            });
        let manager = create_test_manager(mock_forge);

        let release = ReleaseLookup::new(&manager)
            .with_page_size(10)
            .with_page_limit(2)
            .find_last_draft("main")
            .await
            .unwrap();

        assert_eq!(release.unwrap().id, 5);
    }

    #[tokio::test]
    async fn test_lookup_propagates_forge_error() {
        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_releases_page()
            .times(1)
            .returning(|_, _| Err(DraftkeeperError::forge("Not Found")));
        let manager = create_test_manager(mock_forge);

        let err = ReleaseLookup::new(&manager)
            .find_last_draft("main")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not Found");
    }
}
