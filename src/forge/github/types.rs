use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::request::Release;

#[derive(Debug, Deserialize)]
pub struct GithubRelease {
    pub id: u64,
    pub tag_name: String,
    pub target_commitish: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<GithubRelease> for Release {
    fn from(release: GithubRelease) -> Self {
        Self {
            id: release.id,
            tag_name: release.tag_name,
            name: release.name.unwrap_or_default(),
            body: release.body.unwrap_or_default(),
            target_commitish: release.target_commitish,
            is_draft: release.draft,
            published_at: release.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListReleasesParams {
    pub per_page: usize,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateReleaseBody {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateReleaseBody {
    pub tag_name: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateNotesBody {
    pub tag_name: String,
    pub target_commitish: String,
    pub previous_tag_name: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedNotes {
    pub body: String,
}
