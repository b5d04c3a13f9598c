//! Settings loading and parsing for `draftkeeper.toml` files.
//!
//! Every setting is optional. Values given on the command line are merged
//! over the file, and anything still unset falls back to the built-in
//! defaults.
use log::*;
use merge::Merge;
use serde::Deserialize;
use std::{io::ErrorKind, path::Path};

use crate::{
    DraftkeeperError, Result,
    forge::config::{DEFAULT_PAGE_SIZE, DEFAULT_RELEASE_PAGE_LIMIT, DEFAULT_TAG},
};

/// Default settings filename.
pub const DEFAULT_CONFIG_FILE: &str = "draftkeeper.toml";

/// Root settings structure for `draftkeeper.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Merge)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tag used when the branch has no published release yet.
    #[merge(strategy = merge::option::overwrite_none)]
    pub default_tag: Option<String>,
    /// Items requested per page from the forge (1 to 100).
    #[merge(strategy = merge::option::overwrite_none)]
    pub page_size: Option<usize>,
    /// Maximum release pages scanned per lookup.
    #[merge(strategy = merge::option::overwrite_none)]
    pub release_page_limit: Option<usize>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields empty settings.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                debug!("loading settings from {}", path.display());
                Self::parse(&content)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no settings file at {}: using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay `overrides` on these settings. Values set in `overrides` win.
    pub fn with_overrides(self, mut overrides: Settings) -> Result<Self> {
        overrides.merge(self);
        overrides.validate()?;
        Ok(overrides)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(page_size) = self.page_size
            && !(1..=100).contains(&page_size)
        {
            return Err(DraftkeeperError::invalid_config(format!(
                "page_size must be between 1 and 100, got {page_size}"
            )));
        }

        if self.release_page_limit == Some(0) {
            return Err(DraftkeeperError::invalid_config(
                "release_page_limit must be greater than 0",
            ));
        }

        if let Some(tag) = &self.default_tag
            && tag.trim().is_empty()
        {
            return Err(DraftkeeperError::invalid_config(
                "default_tag must not be empty",
            ));
        }

        Ok(())
    }

    pub fn default_tag(&self) -> String {
        self.default_tag
            .clone()
            .unwrap_or_else(|| DEFAULT_TAG.to_string())
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn release_page_limit(&self) -> usize {
        self.release_page_limit
            .unwrap_or(DEFAULT_RELEASE_PAGE_LIMIT)
    }
}
