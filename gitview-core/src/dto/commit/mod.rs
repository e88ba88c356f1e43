//! Commit DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::domain::commit::Commit;

/// Commit as returned by `GET /auth/commits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDto {
    #[serde(default)]
    pub sha: Option<String>,
    pub commit: CommitDetailDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetailDto {
    pub message: String,
    pub author: CommitAuthorDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthorDto {
    pub name: String,
    pub date: DateTime<Utc>,
}

impl From<CommitDto> for Commit {
    fn from(dto: CommitDto) -> Self {
        Commit {
            sha: dto.sha,
            message: dto.commit.message,
            author: dto.commit.author.name,
            timestamp: dto.commit.author.date,
        }
    }
}

/// Query string of `GET /auth/commits`
#[derive(Debug, Clone, Serialize)]
pub struct CommitListQuery<'a> {
    pub token: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
}

/// Decodes a commit list body
///
/// The endpoint forwards whatever the provider answered, which is an error
/// object (or `null`) for unknown branches and empty repositories. Anything
/// that is not an array decodes to an empty list. Malformed array items are
/// still an error.
pub fn commits_from_json(body: JsonValue) -> serde_json::Result<Vec<Commit>> {
    match body {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value::<CommitDto>(item).map(Commit::from))
            .collect(),
        other => {
            debug!("Commit list body is not an array ({}), using empty list", kind(&other));
            Ok(Vec::new())
        }
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
