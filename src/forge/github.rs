//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, Page as OctoPage};
use secrecy::ExposeSecret;

use crate::{
    DraftkeeperError, Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreateReleaseRequest, Page, PullRequest, PullRequestQuery,
            Release, ReleaseNotesRequest, UpdateReleaseRequest,
        },
        traits::Forge,
    },
};

mod graphql;
mod types;

use graphql::{
    PULL_REQUESTS_QUERY, PullRequestsQueryVariables, PullRequestsResult,
};
use types::{
    CreateReleaseBody, GenerateNotesBody, GeneratedNotes, GithubRelease,
    ListReleasesParams, UpdateReleaseBody,
};

/// GitHub forge implementation using Octocrab: GraphQL for pull request
/// history and REST for releases.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_uri();
        let instance = Octocrab::builder()
            .personal_token(config.token.expose_secret().to_string())
            .base_uri(base_uri.clone())?
            .build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn releases_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.base_uri, self.config.owner, self.config.repo
        )
    }

    fn query_variables(
        &self,
        query: &PullRequestQuery,
        cursor: Option<String>,
        page_size: usize,
    ) -> PullRequestsQueryVariables {
        let (base_ref_name, head_ref_name) = match query {
            PullRequestQuery::Incoming(params) => {
                (Some(params.base_ref_name.clone()), None)
            }
            PullRequestQuery::Outgoing(params) => {
                (None, Some(params.head_ref_name.clone()))
            }
        };

        PullRequestsQueryVariables {
            owner: self.config.owner.clone(),
            repo: self.config.repo.clone(),
            first: page_size,
            cursor,
            base_ref_name,
            head_ref_name,
        }
    }
}

fn parse_page_cursor(cursor: Option<String>) -> Result<u32> {
    match cursor {
        None => Ok(1),
        Some(cursor) => cursor.parse::<u32>().map_err(|_| {
            DraftkeeperError::forge(format!("invalid release cursor: {cursor}"))
        }),
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn query_pull_requests_page(
        &self,
        query: &PullRequestQuery,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<PullRequest>> {
        let vars = self.query_variables(query, cursor, page_size);

        debug!("querying pull requests: {:?}", vars);

        let json = serde_json::json!({
          "query": PULL_REQUESTS_QUERY,
          "variables": vars,
        });

        let result: PullRequestsResult = self.instance.graphql(&json).await?;

        if let Some(errors) = result.errors
            && !errors.is_empty()
        {
            let msg = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<String>>()
                .join("; ");
            error!("pull request query failed: {msg}");
            return Err(DraftkeeperError::forge(msg));
        }

        let connection = result
            .data
            .and_then(|d| d.repository)
            .ok_or_else(|| {
                DraftkeeperError::forge(format!(
                    "repository not found: {}",
                    self.config.path
                ))
            })?
            .pull_requests;

        let items = connection
            .nodes
            .into_iter()
            .map(|n| PullRequest {
                number: n.number,
                title: n.title,
                base_ref_name: n.base_ref_name,
                state: n.state,
                merged_at: n.merged_at,
            })
            .collect::<Vec<PullRequest>>();

        Ok(Page::new(
            items,
            connection.page_info.end_cursor,
            connection.page_info.has_next_page,
        ))
    }

    async fn list_releases_page(
        &self,
        cursor: Option<String>,
        page_size: usize,
    ) -> Result<Page<Release>> {
        let page = parse_page_cursor(cursor)?;

        let params = ListReleasesParams {
            per_page: page_size,
            page,
        };

        debug!("listing releases: {:?}", params);

        let result: OctoPage<GithubRelease> = self
            .instance
            .get(self.releases_endpoint(), Some(&params))
            .await?;

        let has_next_page = result.next.is_some();
        let items = result
            .items
            .into_iter()
            .map(Release::from)
            .collect::<Vec<Release>>();

        Ok(Page::new(
            items,
            Some((page + 1).to_string()),
            has_next_page,
        ))
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        let body = CreateReleaseBody {
            tag_name: req.tag_name,
            target_commitish: req.target_commitish,
            name: req.name,
            body: req.body,
            draft: req.draft,
        };

        info!(
            "creating release {} targeting {}",
            body.tag_name, body.target_commitish
        );

        let release: GithubRelease = self
            .instance
            .post(self.releases_endpoint(), Some(&body))
            .await?;

        Ok(release.into())
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<Release> {
        let endpoint =
            format!("{}/{}", self.releases_endpoint(), req.release_id);

        let body = UpdateReleaseBody {
            tag_name: req.tag_name,
            name: req.name,
        };

        info!("updating release {} to {}", req.release_id, body.tag_name);

        let release: GithubRelease =
            self.instance.patch(endpoint, Some(&body)).await?;

        Ok(release.into())
    }

    async fn generate_release_notes(
        &self,
        req: ReleaseNotesRequest,
    ) -> Result<String> {
        let endpoint =
            format!("{}/generate-notes", self.releases_endpoint());

        let body = GenerateNotesBody {
            tag_name: req.tag_name,
            target_commitish: req.target_commitish,
            previous_tag_name: req.previous_tag_name,
        };

        let notes: GeneratedNotes =
            self.instance.post(endpoint, Some(&body)).await?;

        Ok(notes.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_cursor() {
        assert_eq!(parse_page_cursor(None).unwrap(), 1);
        assert_eq!(parse_page_cursor(Some("3".into())).unwrap(), 3);

        let err = parse_page_cursor(Some("abc".into())).unwrap_err();
        assert_eq!(err.to_string(), "invalid release cursor: abc");
    }

    #[test]
    fn test_github_release_conversion() {
        let json = serde_json::json!({
            "id": 7,
            "tag_name": "v1.0.0",
            "target_commitish": "main",
            "name": null,
            "body": "notes",
            "draft": true,
            "published_at": null
        });

        let release: Release =
            serde_json::from_value::<GithubRelease>(json).unwrap().into();

        assert_eq!(release.id, 7);
        assert_eq!(release.name, "");
        assert_eq!(release.body, "notes");
        assert!(release.is_draft);
        assert!(release.published_at.is_none());
    }

    #[test]
    fn test_pull_requests_result_surfaces_errors() {
        let json = serde_json::json!({
            "data": null,
            "errors": [{ "message": "Could not resolve to a Ref" }]
        });

        let result: PullRequestsResult = serde_json::from_value(json).unwrap();
        assert!(result.data.is_none());
        assert_eq!(
            result.errors.unwrap()[0].message,
            "Could not resolve to a Ref"
        );
    }
}
