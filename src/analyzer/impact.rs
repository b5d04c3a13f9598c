//! Semantic version impact of conventional-commit style titles.
use git_conventional::{Commit as ConventionalCommit, Type};
use serde::Serialize;
use strum::{Display, EnumString};

/// Which part of the version to increment, ordered by impact.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VersionIncrement {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

/// Classify a single title. Titles that are not conventional commits have no
/// impact.
pub fn classify(title: &str) -> VersionIncrement {
    let subject = title.trim().lines().next().unwrap_or_default();

    let Ok(commit) = ConventionalCommit::parse(subject) else {
        return VersionIncrement::None;
    };

    if commit.breaking() {
        return VersionIncrement::Major;
    }

    let kind = commit.type_();

    if kind == Type::FEAT {
        VersionIncrement::Minor
    } else if kind == Type::FIX || kind == Type::PERF {
        VersionIncrement::Patch
    } else {
        VersionIncrement::None
    }
}

/// Highest impact among `levels`, [`VersionIncrement::None`] when empty.
pub fn reduce<I>(levels: I) -> VersionIncrement
where
    I: IntoIterator<Item = VersionIncrement>,
{
    levels.into_iter().max().unwrap_or_default()
}

/// Highest impact among a set of titles.
pub fn infer_from_titles<'a, I>(titles: I) -> VersionIncrement
where
    I: IntoIterator<Item = &'a str>,
{
    reduce(titles.into_iter().map(classify))
}
