//! gitview CLI
//!
//! Command-line repository explorer for the gitview backend.

mod commands;
mod config;
mod driver;
mod render;
mod token_store;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use gitview_core::explorer::DEFAULT_PER_PAGE;
use token_store::FileTokenStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gitview")]
#[command(about = "Browse your repositories, branches and commits", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "GITVIEW_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// File holding the token (defaults to the user config directory)
    #[arg(long, env = "GITVIEW_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Repositories per page
    #[arg(long, env = "GITVIEW_PER_PAGE", default_value_t = DEFAULT_PER_PAGE)]
    per_page: u32,

    /// Request timeout in seconds
    #[arg(long, env = "GITVIEW_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitview=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let token_file = match cli.token_file {
        Some(path) => path,
        None => FileTokenStore::default_path()?,
    };

    let config = Config {
        api_url: cli.api_url,
        token_file,
        per_page: cli.per_page,
        timeout: cli.timeout_secs.map(Duration::from_secs),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
