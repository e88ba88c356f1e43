//! Repository data source seam
//!
//! The explorer driver only needs the three listing calls. Putting them
//! behind a trait lets tests swap the HTTP client for a scripted source.

use async_trait::async_trait;
use gitview_core::domain::branch::Branch;
use gitview_core::domain::commit::Commit;
use gitview_core::domain::page::RepoPage;

use crate::GitViewerClient;
use crate::error::Result;

/// Source of repository pages, branches and commits
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_repositories(&self, token: &str, page: u32, per_page: u32) -> Result<RepoPage>;

    async fn list_branches(&self, token: &str, owner: &str, repo: &str) -> Result<Vec<Branch>>;

    async fn list_commits(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<Commit>>;
}

#[async_trait]
impl RepoSource for GitViewerClient {
    async fn list_repositories(&self, token: &str, page: u32, per_page: u32) -> Result<RepoPage> {
        GitViewerClient::list_repositories(self, token, page, per_page).await
    }

    async fn list_branches(&self, token: &str, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        GitViewerClient::list_branches(self, token, owner, repo).await
    }

    async fn list_commits(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<Commit>> {
        GitViewerClient::list_commits(self, token, owner, repo, branch).await
    }
}
