//! Commit listing endpoint

use gitview_core::domain::commit::Commit;
use gitview_core::dto::commit::{CommitListQuery, commits_from_json};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{GitViewerClient, require};

impl GitViewerClient {
    /// List commits of a repository on a branch
    ///
    /// A body that is not a JSON array (the provider's error objects, `null`)
    /// yields an empty list instead of an error.
    ///
    /// # Arguments
    /// * `token` - The caller's credential
    /// * `owner` - Owner login
    /// * `repo` - Repository name
    /// * `branch` - Branch name
    pub async fn list_commits(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<Commit>> {
        require("token", token)?;
        require("owner", owner)?;
        require("repo", repo)?;
        require("branch", branch)?;

        debug!("GET /auth/commits {}/{}@{}", owner, repo, branch);
        let response = self
            .client
            .get(self.endpoint("commits"))
            .query(&CommitListQuery {
                token,
                owner,
                repo,
                branch,
            })
            .send()
            .await?;

        let body: JsonValue = self.handle_response(response).await?;
        commits_from_json(body)
            .map_err(|e| ClientError::ParseError(format!("Malformed commit list: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_commits_for_branch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/commits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("owner".into(), "octo".into()),
                Matcher::UrlEncoded("repo".into(), "gitview".into()),
                Matcher::UrlEncoded("branch".into(), "dev".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"sha": "c0ffee", "commit": {"message": "Add pagination\n\nDetails",
                     "author": {"name": "Ada", "email": "ada@example.com", "date": "2024-05-01T10:00:00Z"}}}]"#,
            )
            .create_async()
            .await;

        let client = GitViewerClient::new(server.url());
        let commits = client
            .list_commits("ghs_abc", "octo", "gitview", "dev")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].summary(), "Add pagination");
        assert_eq!(
            commits[0].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_null_body_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/commits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;

        let client = GitViewerClient::new(server.url());
        let commits = client
            .list_commits("ghs_abc", "octo", "gitview", "main")
            .await
            .unwrap();

        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn test_error_object_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/commits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Git Repository is empty."}"#)
            .create_async()
            .await;

        let client = GitViewerClient::new(server.url());
        let commits = client
            .list_commits("ghs_abc", "octo", "empty", "main")
            .await
            .unwrap();

        assert!(commits.is_empty());
    }
}
