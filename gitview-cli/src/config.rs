//! Configuration module
//!
//! Handles CLI configuration: backend URL, token location, page size and
//! request timeout.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use gitview_client::GitViewerClient;

use crate::token_store::FileTokenStore;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the gitview backend (e.g., "http://localhost:8000")
    pub api_url: String,

    /// File holding the credential token
    pub token_file: PathBuf,

    /// Repositories per page
    pub per_page: u32,

    /// Per-request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.per_page == 0 {
            anyhow::bail!("per_page must be greater than 0");
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the backend client
    pub fn client(&self) -> Result<GitViewerClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(GitViewerClient::with_client(&self.api_url, http))
    }

    /// Token store backed by `token_file`
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.token_file.clone())
    }
}
