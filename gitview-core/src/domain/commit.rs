//! Commit domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of an abbreviated sha
pub const SHORT_SHA_LEN: usize = 7;

/// Sha prefix used for display
///
/// Returns the whole string when it is shorter than [`SHORT_SHA_LEN`] or the
/// cut would not fall on a character boundary.
pub fn abbreviate_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}

/// A commit on some branch of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit sha, when the backend includes it
    pub sha: Option<String>,

    /// Full commit message
    pub message: String,

    /// Author display name
    pub author: String,

    /// Author timestamp
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Seven-character sha prefix, if a sha is known
    pub fn short_sha(&self) -> Option<&str> {
        self.sha.as_deref().map(abbreviate_sha)
    }
}
