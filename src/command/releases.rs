//! Current releases command implementation.
use log::*;
use serde::Serialize;

use crate::{
    Result,
    command::common::print_json,
    config::Settings,
    forge::{manager::ForgeManager, request::Release},
    sources::releases::ReleaseLookup,
};

#[derive(Debug, Serialize)]
pub struct CurrentReleases {
    pub branch: String,
    pub last_draft: Option<Release>,
    pub last_release: Option<Release>,
}

/// Print the latest draft and published releases targeting `branch`.
pub async fn execute(
    forge: &ForgeManager,
    branch: &str,
    settings: &Settings,
) -> Result<CurrentReleases> {
    info!("looking up releases for {branch}");

    let lookup = ReleaseLookup::new(forge)
        .with_page_size(settings.page_size())
        .with_page_limit(settings.release_page_limit());

    let current = CurrentReleases {
        branch: branch.to_string(),
        last_draft: lookup.find_last_draft(branch).await?,
        last_release: lookup.find_last_published(branch).await?,
    };

    print_json(&current)?;

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn test_execute_reports_both_releases() {
        let mut mock_forge = mock_forge();
        expect_release_pages(
            &mut mock_forge,
            vec![
                draft_release(3, "v1.1.0", "main"),
                published_release(2, "v1.0.0", "main", "2026-01-01T00:00:00Z"),
            ],
        );
        let manager = create_test_manager(mock_forge);

        let current = execute(&manager, "main", &Settings::default())
            .await
            .unwrap();

        assert_eq!(current.branch, "main");
        assert_eq!(current.last_draft.unwrap().id, 3);
        assert_eq!(current.last_release.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_execute_fails_at_page_limit() {
        let mut mock_forge = mock_forge();
        let releases = (1..=10)
            .map(|id| published_release(id, "v0.0.1", "other", "2026-01-01T00:00:00Z"))
            .collect::<Vec<_>>();
        mock_forge
            .expect_list_releases_page()
            .times(2)
            .returning(move |cursor, page_size| {
                Ok(page_of(&releases, cursor, page_size))
            });
        let manager = create_test_manager(mock_forge);

        let settings = Settings {
            page_size: Some(2),
            release_page_limit: Some(2),
            ..Default::default()
        };

        let err = execute(&manager, "main", &settings).await.unwrap_err();

        assert!(matches!(
            err,
            crate::DraftkeeperError::ReleaseScanLimit { page_limit: 2, .. }
        ));
    }
}
