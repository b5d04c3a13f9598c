//! Common functionality shared between commands
use log::*;
use serde::Serialize;

use crate::{
    Result,
    cli::Args,
    config::Settings,
    forge::{
        github::Github,
        manager::{ForgeManager, ForgeOptions},
    },
};

/// Connect to the GitHub repository named on the command line.
pub async fn create_forge_manager(args: &Args) -> Result<ForgeManager> {
    let remote_config = args.get_remote()?;
    info!(
        "using github repository {}/{}",
        remote_config.owner, remote_config.repo
    );

    let github = Github::new(remote_config).await?;

    Ok(ForgeManager::new(
        Box::new(github),
        ForgeOptions {
            dry_run: args.dry_run,
        },
    ))
}

/// Settings file merged with command line overrides.
pub async fn load_settings(args: &Args) -> Result<Settings> {
    let file_settings = Settings::load(&args.config_path()).await?;
    let settings = file_settings.with_overrides(args.settings_overrides())?;
    debug!("resolved settings: {settings:?}");
    Ok(settings)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
