//! Branch listing endpoint

use gitview_core::domain::branch::Branch;
use gitview_core::dto::branch::{BranchDto, BranchListQuery};
use tracing::debug;

use crate::error::Result;
use crate::{GitViewerClient, require};

impl GitViewerClient {
    /// List the branches of a repository
    ///
    /// # Arguments
    /// * `token` - The caller's credential
    /// * `owner` - Owner login
    /// * `repo` - Repository name
    pub async fn list_branches(&self, token: &str, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        require("token", token)?;
        require("owner", owner)?;
        require("repo", repo)?;

        debug!("GET /auth/branches {}/{}", owner, repo);
        let response = self
            .client
            .get(self.endpoint("branches"))
            .query(&BranchListQuery { token, owner, repo })
            .send()
            .await?;

        let body: Vec<BranchDto> = self.handle_response(response).await?;
        Ok(body.into_iter().map(Branch::from).collect())
    }
}
