//! Command execution for draftkeeper.
//!
//! Every command builds a [`ForgeManager`](crate::forge::manager::ForgeManager)
//! from the global arguments, runs against GitHub and prints its result as
//! JSON on stdout. Logs go to stderr so the output can be piped.
//!
//! - **upsert**: keep a branch's draft release in sync with merged pull
//!   requests (the CI entry point)
//! - **releases**: show the latest draft and published releases
//! - **pulls**: list pull requests into or out of a branch
//! - **notes**: GitHub's auto-generated release notes

use std::rc::Rc;

use crate::{
    Result,
    cli::{Args, Command},
};

/// Shared setup and output helpers.
pub mod common;

/// Auto-generated release notes pass-through.
pub mod notes;

/// Pull request listing.
pub mod pulls;

/// Latest draft and published releases.
pub mod releases;

/// Draft release create/update.
pub mod upsert;

/// Dispatch the parsed command.
pub async fn run(args: Args) -> Result<()> {
    let settings = common::load_settings(&args).await?;
    let forge = Rc::new(common::create_forge_manager(&args).await?);

    match args.command {
        Command::Upsert { branch, .. } => {
            upsert::execute(forge, &branch, &settings).await?;
        }
        Command::Releases { branch } => {
            releases::execute(&forge, &branch, &settings).await?;
        }
        Command::Pulls {
            direction,
            branch,
            merged_since,
        } => {
            let mut stdout = std::io::stdout();
            pulls::execute(
                &forge,
                direction,
                &branch,
                merged_since.as_deref(),
                &settings,
                &mut stdout,
            )
            .await?;
        }
        Command::Notes {
            tag,
            target,
            previous_tag,
        } => {
            notes::execute(&forge, tag, target, previous_tag).await?;
        }
    }

    Ok(())
}
