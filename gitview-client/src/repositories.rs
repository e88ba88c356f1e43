//! Repository listing endpoint

use gitview_core::domain::page::RepoPage;
use gitview_core::dto::repository::{RepoListQuery, RepoListResponse};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{GitViewerClient, require};

impl GitViewerClient {
    /// List one page of the caller's repositories
    ///
    /// # Arguments
    /// * `token` - The caller's credential
    /// * `page` - 1-based page number
    /// * `per_page` - Page size
    ///
    /// # Returns
    /// The repositories on that page plus aggregate counts and page count
    pub async fn list_repositories(
        &self,
        token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<RepoPage> {
        require("token", token)?;
        if page == 0 || per_page == 0 {
            return Err(ClientError::InvalidRequest(
                "page and per_page must be at least 1".to_string(),
            ));
        }

        debug!("GET /auth/repos page={} per_page={}", page, per_page);
        let response = self
            .client
            .get(self.endpoint("repos"))
            .query(&RepoListQuery {
                token,
                page,
                per_page,
            })
            .send()
            .await?;

        let body: RepoListResponse = self.handle_response(response).await?;
        Ok(body.into())
    }
}
