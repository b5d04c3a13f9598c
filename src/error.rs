//! Error types for draftkeeper operations.

use thiserror::Error;

/// Main error type for draftkeeper operations.
#[derive(Error, Debug)]
pub enum DraftkeeperError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Forge errors keep the remote message untouched
    #[error("{0}")]
    ForgeError(String),

    #[error(
        "no {kind} release for {branch} within the first {page_limit} pages of releases: raise release_page_limit"
    )]
    ReleaseScanLimit {
        kind: String,
        branch: String,
        page_limit: usize,
    },

    #[error("Invalid git remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    // Network/API errors, classified but shown as the remote sent them
    #[error("{0}")]
    AuthenticationError(String),

    #[error("{0}")]
    RateLimitExceeded(String),

    // Version/parsing errors
    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using DraftkeeperError
pub type Result<T> = std::result::Result<T, DraftkeeperError>;

impl DraftkeeperError {
    /// Create a forge error carrying the remote message
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

impl From<std::io::Error> for DraftkeeperError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<octocrab::Error> for DraftkeeperError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                let message = source.message.clone();
                if message.to_lowercase().contains("rate limit") {
                    Self::RateLimitExceeded(message)
                } else if status == 401 || status == 403 {
                    Self::AuthenticationError(message)
                } else {
                    Self::ForgeError(message)
                }
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forge_error_displays_remote_message_verbatim() {
        let err = DraftkeeperError::forge("Rate limit exceeded");
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_classified_api_errors_display_remote_message_verbatim() {
        let msg = "API rate limit exceeded for user ID 1.";
        assert_eq!(DraftkeeperError::RateLimitExceeded(msg.into()).to_string(), msg);

        let msg = "Bad credentials";
        assert_eq!(
            DraftkeeperError::AuthenticationError(msg.into()).to_string(),
            msg
        );
    }

    #[test]
    fn test_error_display_formats() {
        let err = DraftkeeperError::invalid_config("page_size must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: page_size must be > 0"
        );

        let err = DraftkeeperError::invalid_args("unknown direction");
        assert_eq!(err.to_string(), "Invalid arguments: unknown direction");
    }

    #[test]
    fn test_from_conversions() {
        let semver_err = semver::Version::parse("invalid");
        assert!(semver_err.is_err());
        let err: DraftkeeperError = semver_err.unwrap_err().into();
        assert!(matches!(err, DraftkeeperError::InvalidVersion(_)));

        let toml_err = toml::from_str::<toml::Table>("= broken");
        let err: DraftkeeperError = toml_err.unwrap_err().into();
        assert!(matches!(err, DraftkeeperError::TomlParseError(_)));
    }
}
