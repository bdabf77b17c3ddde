//! One-shot GitHub sync from the command line.

use std::sync::Arc;

use console::style;
use showcase::github::{GitHubApi, GitHubClient};
use showcase::sync::{RepoSyncStatus, SyncReport, sync_all};

use crate::config::Config;

/// Build the GitHub client for the configured account, if one is configured.
pub(crate) fn github_source(
    config: &Config,
) -> Result<Option<(Arc<dyn GitHubApi>, String)>, Box<dyn std::error::Error>> {
    let Some(owner) = config.github_username() else {
        return Ok(None);
    };
    let client = GitHubClient::new(config.github.token.as_deref())?;
    Ok(Some((Arc::new(client), owner.to_string())))
}

pub(crate) async fn handle_sync(
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (api, owner) = github_source(config)?
        .ok_or("No GitHub account configured; set github.username or SHOWCASE_GITHUB__USERNAME")?;

    let db = showcase::connect_and_migrate(database_url).await?;
    println!("Syncing repositories of {}...", style(&owner).cyan());

    let report = sync_all(&db, api.as_ref(), &owner).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SyncReport) {
    for detail in &report.details {
        match detail.status {
            RepoSyncStatus::Created => println!(
                "  {} {} ({} technologies)",
                style("+").green(),
                detail.repo,
                detail.technologies.unwrap_or_default()
            ),
            RepoSyncStatus::Updated => println!(
                "  {} {} ({} technologies)",
                style("~").yellow(),
                detail.repo,
                detail.technologies.unwrap_or_default()
            ),
            RepoSyncStatus::Error => println!(
                "  {} {}: {}",
                style("!").red(),
                detail.repo,
                detail.message.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!(
        "{} {} repositories: {} created, {} updated, {} errors",
        style("Synced").bold(),
        report.total,
        report.created,
        report.updated,
        report.errors
    );
}
