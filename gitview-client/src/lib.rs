//! gitview HTTP Client
//!
//! A small, typed client for the gitview backend. The backend authenticates
//! every call with an opaque token passed as a `token` query parameter and
//! exposes the caller's repositories, branches and commits under `/auth`.
//!
//! # Example
//!
//! ```no_run
//! use gitview_client::GitViewerClient;
//!
//! #[tokio::main]
//! async fn main() -> gitview_client::Result<()> {
//!     let client = GitViewerClient::new("http://localhost:8000");
//!
//!     let page = client.list_repositories("ghs_token", 1, 6).await?;
//!     for repo in page.repositories {
//!         println!("{}", repo.full_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod branches;
mod commits;
mod repositories;
mod source;
mod user;

pub use error::{ClientError, Result};
pub use source::RepoSource;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the gitview backend API
///
/// Endpoints are grouped by resource:
/// - Repository listing with pagination and totals
/// - Branch listing per repository
/// - Commit listing per repository and branch
/// - The authenticated user's profile
#[derive(Debug, Clone)]
pub struct GitViewerClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GitViewerClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The backend origin (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use gitview_client::GitViewerClient;
    ///
    /// let client = GitViewerClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use gitview_client::GitViewerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GitViewerClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the user opens in a browser to install the app and obtain a token
    pub fn login_url(&self) -> String {
        self.endpoint("login")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} must not be empty", name)));
    }
    Ok(())
}
