//! Configuration for forge connections.
use secrecy::SecretString;

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Default number of release pages scanned before giving up.
pub const DEFAULT_RELEASE_PAGE_LIMIT: usize = 10;
/// Tag used when the branch has never been released.
pub const DEFAULT_TAG: &str = "v0.1.0";

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path.
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

impl RemoteConfig {
    /// Base URI of the REST and GraphQL API for this remote.
    pub fn api_base_uri(&self) -> String {
        format!("{}://api.{}", self.scheme, self.host)
    }
}
