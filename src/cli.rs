//! CLI argument parsing and GitHub remote configuration.
use clap::{Parser, Subcommand, ValueEnum};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    DraftkeeperError, Result,
    config::{DEFAULT_CONFIG_FILE, Settings},
    forge::config::RemoteConfig,
};

/// Global CLI arguments for forge configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, global = true)]
    /// Settings file. Defaults to draftkeeper.toml in the working directory.
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Items requested per page (1 to 100).
    pub page_size: Option<usize>,

    #[arg(long, global = true)]
    /// Maximum release pages scanned per lookup.
    pub release_page_limit: Option<usize>,

    #[arg(long, default_value_t = false, global = true)]
    /// Log what would be created or updated without changing anything.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Direction of a pull request traversal relative to a branch.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullDirection {
    /// Pull requests targeting the branch.
    Incoming,
    /// Pull requests opened from the branch.
    Outgoing,
}

/// Draft release subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or update the branch's draft release from the pull requests
    /// merged since its last published release.
    Upsert {
        /// Branch the draft release targets.
        branch: String,

        #[arg(long)]
        /// Tag used when the branch has never been released.
        default_tag: Option<String>,
    },

    /// Show the latest draft and published releases for a branch.
    Releases {
        /// Branch the releases target.
        branch: String,
    },

    /// List pull requests into or out of a branch, newest first.
    Pulls {
        #[arg(value_enum)]
        /// Which side of the branch to list.
        direction: PullDirection,

        /// Branch name.
        branch: String,

        #[arg(long)]
        /// Stop at pull requests merged before this RFC 3339 timestamp.
        merged_since: Option<String>,
    },

    /// Print GitHub's auto-generated notes for a tag.
    Notes {
        /// Tag the notes are generated for.
        tag: String,

        /// Branch or commit the tag points at.
        target: String,

        /// Previous tag the notes start from.
        previous_tag: String,
    },
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        if self.github_repo.is_empty() {
            return Err(DraftkeeperError::invalid_args(
                "must configure a remote with --github-repo",
            ));
        }

        get_github_remote(&self.github_repo, &self.github_token)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Settings given on the command line. These win over the settings file.
    pub fn settings_overrides(&self) -> Settings {
        let default_tag = match &self.command {
            Command::Upsert { default_tag, .. } => default_tag.clone(),
            _ => None,
        };

        Settings {
            default_tag,
            page_size: self.page_size,
            release_page_limit: self.release_page_limit,
        }
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(DraftkeeperError::InvalidRemoteUrl(
            "only http and https schemes are supported for repo urls".into(),
        )),
    }
}

/// First non-empty token: explicit argument, then the URL, then the
/// environment.
fn resolve_token(
    arg_token: &str,
    url_token: Option<String>,
    env_token: Option<String>,
) -> Option<String> {
    [Some(arg_token.to_string()), url_token, env_token]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
}

/// Configure GitHub remote with URL parsing and token resolution.
pub fn get_github_remote(
    github_repo: &str,
    github_token: &str,
) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let token =
        resolve_token(github_token, parsed.token, env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| {
                DraftkeeperError::AuthenticationError(
                    "must set github token".into(),
                )
            })?;

    let host = parsed.host.ok_or_else(|| {
        DraftkeeperError::InvalidRemoteUrl(
            "unable to parse host from github repo".into(),
        )
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        DraftkeeperError::InvalidRemoteUrl(
            "unable to parse owner from github repo".into(),
        )
    })?;

    let project_path = parsed
        .path
        .strip_prefix("/")
        .ok_or_else(|| {
            DraftkeeperError::InvalidRemoteUrl(
                "failed to process project path".into(),
            )
        })?
        .to_string();

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        token: SecretString::from(token),
    })
}
