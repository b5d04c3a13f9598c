//! Draft release upsert command implementation.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    command::common::print_json,
    config::Settings,
    forge::manager::ForgeManager,
    orchestrator::{Orchestrator, UpsertAction, UpsertedRelease},
};

/// Create or update the draft release for `branch` and print the outcome.
pub async fn execute(
    forge: Rc<ForgeManager>,
    branch: &str,
    settings: &Settings,
) -> Result<UpsertedRelease> {
    let orchestrator = Orchestrator::builder()
        .forge(forge)
        .branch(branch)
        .default_tag(settings.default_tag())
        .page_size(settings.page_size())
        .release_page_limit(settings.release_page_limit())
        .build()?;

    let upserted = orchestrator.upsert_draft_release().await?;

    log_summary(branch, &upserted);
    print_json(&upserted)?;

    Ok(upserted)
}

fn log_summary(branch: &str, upserted: &UpsertedRelease) {
    match &upserted.last_release {
        Some(release) => info!(
            "last release on {branch}: {} ({})",
            release.tag_name,
            release
                .published_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default()
        ),
        None => info!("no published release on {branch}"),
    }

    match &upserted.last_draft {
        Some(draft) => info!("current draft on {branch}: {}", draft.tag_name),
        None => info!("no draft release on {branch}"),
    }

    for title in upserted.pull_request_titles.iter() {
        info!("  - {title}");
    }

    if upserted.action == UpsertAction::None {
        info!("draft release left untouched");
        return;
    }

    info!(
        "version increment: {}, next version: {}: draft {}",
        upserted.version_increment,
        upserted.version.as_deref().unwrap_or_default(),
        upserted.action
    );
}
