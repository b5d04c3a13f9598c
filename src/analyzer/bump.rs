//! Next tag computation from the last published tag and an increment.
use log::*;
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::LazyLock;

use crate::{DraftkeeperError, Result, analyzer::impact::VersionIncrement};

/// Splits a tag into its non-numeric prefix and the version that follows.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<prefix>[^0-9]*)(?<version>[0-9].*)$").unwrap()
});

/// Compute the next tag. Without a prior tag the default tag is used as-is,
/// whatever the increment.
pub fn bump_tag(
    prior_tag: Option<&str>,
    increment: VersionIncrement,
    default_tag: &str,
) -> Result<String> {
    let Some(prior_tag) = prior_tag else {
        debug!("no prior release: using default tag {default_tag}");
        return Ok(default_tag.to_string());
    };

    if increment == VersionIncrement::None {
        return Ok(prior_tag.to_string());
    }

    let captures = TAG_REGEX.captures(prior_tag).ok_or_else(|| {
        DraftkeeperError::forge(format!(
            "release tag is not a semantic version: {prior_tag}"
        ))
    })?;

    let prefix = &captures["prefix"];
    let version = Version::parse(&captures["version"])?;
    let next = increment_version(&version, increment);

    debug!("bumping {prior_tag} by {increment}: {prefix}{next}");

    Ok(format!("{prefix}{next}"))
}

/// Apply `increment`. A prerelease graduates to its release when that
/// release already satisfies the increment (1.3.0-rc.1 + minor = 1.3.0).
pub fn increment_version(
    version: &Version,
    increment: VersionIncrement,
) -> Version {
    let mut next = version.clone();
    let prerelease = !version.pre.is_empty();
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;

    match increment {
        VersionIncrement::None => return version.clone(),
        VersionIncrement::Patch => {
            if !prerelease {
                next.patch += 1;
            }
        }
        VersionIncrement::Minor => {
            if !prerelease || version.patch != 0 {
                next.minor += 1;
            }
            next.patch = 0;
        }
        VersionIncrement::Major => {
            if !prerelease || version.minor != 0 || version.patch != 0 {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
        }
    }

    next
}
