//! Release notes command implementation.
use log::*;

use crate::{
    Result,
    forge::{manager::ForgeManager, request::ReleaseNotesRequest},
};

/// Print GitHub's generated notes for `tag`, starting at `previous_tag`.
pub async fn execute(
    forge: &ForgeManager,
    tag: String,
    target: String,
    previous_tag: String,
) -> Result<String> {
    info!("generating release notes for {tag} since {previous_tag}");

    let notes = forge
        .generate_release_notes(ReleaseNotesRequest {
            tag_name: tag,
            target_commitish: target,
            previous_tag_name: previous_tag,
        })
        .await?;

    println!("{notes}");

    Ok(notes)
}
