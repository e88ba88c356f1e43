//! Pagination summary

use serde::{Deserialize, Serialize};

use super::repository::Repository;

/// Aggregate repository counts across every page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub total: u64,
    pub public: u64,
    pub private: u64,
}

/// One page of repositories plus the totals reported with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPage {
    pub repositories: Vec<Repository>,
    pub stats: RepoStats,
    pub current_page: u32,
    /// Always at least 1, even for an empty account
    pub total_pages: u32,
}
