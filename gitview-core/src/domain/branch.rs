//! Branch domain model and default-branch policy

use serde::{Deserialize, Serialize};

use super::commit::abbreviate_sha;

/// Branch used for commit requests until the real default is known
pub const FALLBACK_BRANCH: &str = "main";

/// Preferred default branch names, in priority order
const PREFERRED_DEFAULTS: [&str; 2] = ["main", "master"];

/// A branch of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name, unique within its repository
    pub name: String,

    /// Sha of the commit at the branch head
    pub head_sha: String,
}

impl Branch {
    /// Abbreviated head sha
    pub fn short_sha(&self) -> &str {
        abbreviate_sha(&self.head_sha)
    }
}

/// Picks the branch to select after a branch list arrives
///
/// `main` wins over `master`, which wins over whatever comes first.
/// Returns `None` for an empty list.
pub fn pick_default_branch(branches: &[Branch]) -> Option<&str> {
    PREFERRED_DEFAULTS
        .iter()
        .find_map(|preferred| {
            branches
                .iter()
                .find(|b| b.name == *preferred)
                .map(|b| b.name.as_str())
        })
        .or_else(|| branches.first().map(|b| b.name.as_str()))
}
