//! One-shot listing commands
//!
//! Print a page of repositories, a branch list or a commit list and exit.

use anyhow::{Context, Result, anyhow};
use colored::*;
use gitview_client::ClientError;
use gitview_core::domain::branch::{FALLBACK_BRANCH, pick_default_branch};
use tracing::debug;

use super::require_token;
use crate::config::Config;
use crate::render::{CommitView, PaginationView, StatsView};

/// List one page of repositories
pub async fn list_repositories(config: &Config, page: u32) -> Result<()> {
    let token = require_token(&config.token_store())?;
    let client = config.client()?;

    let result = client
        .list_repositories(&token, page, config.per_page)
        .await
        .context("Failed to load repositories")?;

    println!("{}", StatsView(result.stats));
    println!();

    if result.repositories.is_empty() {
        println!("{}", "No repositories on this page.".yellow());
    }
    for repo in &result.repositories {
        let badge = if repo.visibility.is_private() {
            "Private".purple()
        } else {
            "Public".green()
        };
        println!("  {} {}  {}", "▸".cyan(), repo.full_name().bold(), badge);
    }

    println!();
    if result.total_pages > 1 {
        println!(
            "{}",
            PaginationView {
                current: page,
                total: result.total_pages,
            }
        );
    }
    println!("Page {} of {}", page, result.total_pages);

    Ok(())
}

/// List branches of one repository
pub async fn list_branches(config: &Config, owner: &str, repo: &str) -> Result<()> {
    let token = require_token(&config.token_store())?;
    let client = config.client()?;

    let branches = client
        .list_branches(&token, owner, repo)
        .await
        .map_err(|e| repo_error(e, "branches", owner, repo))?;

    if branches.is_empty() {
        println!("{}", "No branches.".yellow());
        return Ok(());
    }

    let default = pick_default_branch(&branches);
    for branch in &branches {
        let marker = if Some(branch.name.as_str()) == default {
            "*".green()
        } else {
            " ".normal()
        };
        println!("{} {}  {}", marker, branch.name.bold(), branch.short_sha().dimmed());
    }

    Ok(())
}

/// List commits of one repository
///
/// Without `--branch`, uses the same default the explorer would pick.
pub async fn list_commits(
    config: &Config,
    owner: &str,
    repo: &str,
    branch: Option<String>,
) -> Result<()> {
    let token = require_token(&config.token_store())?;
    let client = config.client()?;

    let branch = match branch {
        Some(branch) => branch,
        None => {
            let branches = client
                .list_branches(&token, owner, repo)
                .await
                .map_err(|e| repo_error(e, "branches", owner, repo))?;
            pick_default_branch(&branches)
                .unwrap_or(FALLBACK_BRANCH)
                .to_string()
        }
    };
    debug!("Listing commits of {}/{} on {}", owner, repo, branch);

    let commits = client
        .list_commits(&token, owner, repo, &branch)
        .await
        .map_err(|e| repo_error(e, "commits", owner, repo))?;

    println!("{}", format!("{}/{} on {}", owner, repo, branch).bold());
    if commits.is_empty() {
        println!("  {}", "No commits.".yellow());
    }
    for commit in &commits {
        println!("  {}", CommitView(commit));
    }

    Ok(())
}

/// Error for a failed per-repository request
///
/// A 404 means the repository does not exist or the token cannot see it.
fn repo_error(err: ClientError, what: &str, owner: &str, repo: &str) -> anyhow::Error {
    if err.is_not_found() {
        anyhow!("Repository {}/{} not found or not accessible", owner, repo)
    } else {
        anyhow::Error::new(err).context(format!("Failed to load {} of {}/{}", what, owner, repo))
    }
}
