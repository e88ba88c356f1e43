//! Branch DTOs

use serde::{Deserialize, Serialize};

use crate::domain::branch::Branch;

/// Branch as returned by `GET /auth/branches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDto {
    pub name: String,
    pub commit: CommitRefDto,
}

/// Head commit reference nested in a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRefDto {
    pub sha: String,
}

impl From<BranchDto> for Branch {
    fn from(dto: BranchDto) -> Self {
        Branch {
            name: dto.name,
            head_sha: dto.commit.sha,
        }
    }
}

/// Query string of `GET /auth/branches`
#[derive(Debug, Clone, Serialize)]
pub struct BranchListQuery<'a> {
    pub token: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
}
