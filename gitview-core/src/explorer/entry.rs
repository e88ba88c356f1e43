//! Per-repository view record

use crate::domain::branch::{Branch, FALLBACK_BRANCH};
use crate::domain::commit::Commit;
use crate::domain::repository::{RepoId, Repository, Visibility};

/// Everything the explorer knows about one repository
///
/// Caches survive page changes. `None` means never fetched; for commits an
/// empty list still counts as fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoEntry {
    pub id: RepoId,
    pub name: String,
    pub owner: String,
    pub visibility: Visibility,
    pub branches: Option<Vec<Branch>>,
    pub selected_branch: Option<String>,
    pub commits: Option<Vec<Commit>>,
    /// Branch the cached (or in-flight) commits belong to
    pub commits_branch: Option<String>,
    pub expanded: bool,
    pub branch_loading: bool,
    pub commit_loading: bool,
}

impl RepoEntry {
    pub fn new(repo: Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            owner: repo.owner,
            visibility: repo.visibility,
            branches: None,
            selected_branch: None,
            commits: None,
            commits_branch: None,
            expanded: false,
            branch_loading: false,
            commit_loading: false,
        }
    }

    /// Refreshes the provider-owned fields, keeping caches and flags
    pub fn refresh(&mut self, repo: Repository) {
        self.name = repo.name;
        self.owner = repo.owner;
        self.visibility = repo.visibility;
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn needs_branches(&self) -> bool {
        self.branches.as_ref().is_none_or(|b| b.is_empty())
    }

    pub fn needs_commits(&self) -> bool {
        self.commits.is_none()
    }

    /// Branch to request commits for right now
    pub fn commit_branch(&self) -> &str {
        self.selected_branch.as_deref().unwrap_or(FALLBACK_BRANCH)
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches
            .as_ref()
            .is_some_and(|branches| branches.iter().any(|b| b.name == name))
    }
}
