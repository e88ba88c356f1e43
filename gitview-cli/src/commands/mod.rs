//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod explore;
mod repos;

use anyhow::{Result, bail};
use clap::Subcommand;
use gitview_core::session::{Route, TokenStore, gate};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store a token, or print where to get one
    Login {
        /// Token handed out by the backend after installation
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the account the token belongs to
    Whoami,
    /// List one page of repositories
    Repos {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// List branches of a repository
    Branches {
        /// Owner login
        owner: String,
        /// Repository name
        repo: String,
    },
    /// List commits of a repository
    Commits {
        /// Owner login
        owner: String,
        /// Repository name
        repo: String,
        /// Branch (defaults to main, master, or the first branch)
        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Browse repositories interactively
    Explore,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Login { token } => auth::login(config, token),
        Commands::Logout => auth::logout(config),
        Commands::Whoami => auth::whoami(config).await,
        Commands::Repos { page } => repos::list_repositories(config, page).await,
        Commands::Branches { owner, repo } => repos::list_branches(config, &owner, &repo).await,
        Commands::Commits {
            owner,
            repo,
            branch,
        } => repos::list_commits(config, &owner, &repo, branch).await,
        Commands::Explore => explore::explore(config).await,
    }
}

/// Token for a gated command, or an error pointing at `login`
fn require_token(store: &dyn TokenStore) -> Result<String> {
    match (gate(Route::Dashboard, store), store.current_token()) {
        (Route::Dashboard, Some(token)) => Ok(token),
        _ => bail!("Not logged in. Run `gitview login` first."),
    }
}
