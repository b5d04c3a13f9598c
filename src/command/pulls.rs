//! Pull request listing command implementation.
use chrono::{DateTime, Utc};
use futures_util::{StreamExt, pin_mut};
use log::*;
use std::io::Write;

use crate::{
    Result,
    cli::PullDirection,
    config::Settings,
    forge::{
        manager::ForgeManager,
        request::{IncomingPullRequests, OutgoingPullRequests, PullRequestQuery},
    },
    sources::pull_requests::fetch_pull_requests,
};

/// Stream pull requests for `branch` to `out`, one JSON object per line.
/// Returns the number written.
pub async fn execute<W: Write>(
    forge: &ForgeManager,
    direction: PullDirection,
    branch: &str,
    merged_since: Option<&str>,
    settings: &Settings,
    out: &mut W,
) -> Result<usize> {
    let query = build_query(direction, branch, merged_since, settings)?;
    info!("listing pull requests: {query:?}");

    let stream = fetch_pull_requests(forge, query).into_stream();
    pin_mut!(stream);

    let mut count = 0;
    while let Some(pr) = stream.next().await {
        let pr = pr?;
        writeln!(out, "{}", serde_json::to_string(&pr)?)?;
        count += 1;
    }

    info!("listed {count} pull requests");

    Ok(count)
}

fn build_query(
    direction: PullDirection,
    branch: &str,
    merged_since: Option<&str>,
    settings: &Settings,
) -> Result<PullRequestQuery> {
    let query = match direction {
        PullDirection::Incoming => {
            let merged_since = merged_since
                .map(DateTime::parse_from_rfc3339)
                .transpose()?
                .map(|at| at.with_timezone(&Utc));

            PullRequestQuery::from(IncomingPullRequests {
                base_ref_name: branch.to_string(),
                merged_since,
                page_size: settings.page_size(),
            })
        }
        PullDirection::Outgoing => {
            if merged_since.is_some() {
                warn!("--merged-since only applies to incoming pull requests");
            }

            PullRequestQuery::from(OutgoingPullRequests {
                head_ref_name: branch.to_string(),
                page_size: settings.page_size(),
            })
        }
    };

    Ok(query)
}
