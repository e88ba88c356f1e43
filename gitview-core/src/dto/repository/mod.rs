//! Repository list DTOs

use serde::{Deserialize, Serialize};

use crate::domain::page::{RepoPage, RepoStats};
use crate::domain::repository::{Repository, Visibility};

/// Repository as returned inside the list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub private: bool,
    pub owner: OwnerDto,
}

/// Owner reference nested in a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerDto {
    pub login: String,
}

impl From<RepositoryDto> for Repository {
    fn from(dto: RepositoryDto) -> Self {
        Repository {
            id: dto.id,
            name: dto.name,
            visibility: Visibility::from_private_flag(dto.private),
            owner: dto.owner.login,
        }
    }
}

/// Paginated response of `GET /auth/repos`
///
/// Every field is optional on the wire; absent lists are empty, absent
/// counts are zero and an absent or zero page count means one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoListResponse {
    #[serde(default)]
    pub repos: Vec<RepositoryDto>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub public: u64,
    #[serde(default)]
    pub private: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl From<RepoListResponse> for RepoPage {
    fn from(dto: RepoListResponse) -> Self {
        RepoPage {
            repositories: dto.repos.into_iter().map(Repository::from).collect(),
            stats: RepoStats {
                total: dto.total,
                public: dto.public,
                private: dto.private,
            },
            current_page: dto.current_page.max(1),
            total_pages: dto.total_pages.max(1),
        }
    }
}

/// Query string of `GET /auth/repos`
#[derive(Debug, Clone, Serialize)]
pub struct RepoListQuery<'a> {
    pub token: &'a str,
    pub page: u32,
    pub per_page: u32,
}
