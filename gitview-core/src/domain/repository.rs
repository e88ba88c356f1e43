//! Repository domain model

use serde::{Deserialize, Serialize};

/// Identifier assigned by the hosting provider
pub type RepoId = u64;

/// A repository visible to the authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Provider identifier, unique within a page
    pub id: RepoId,

    /// Repository name (without the owner prefix)
    pub name: String,

    /// Whether the repository is public or private
    pub visibility: Visibility,

    /// Login of the owning user or organization
    pub owner: String,
}

impl Repository {
    /// `owner/name` form used in log lines and headings
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Visibility of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Maps the provider's `private` flag
    pub fn from_private_flag(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "Public"),
            Visibility::Private => write!(f, "Private"),
        }
    }
}
