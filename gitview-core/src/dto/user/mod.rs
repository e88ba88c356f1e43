//! User DTOs

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Profile as returned by `GET /auth/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            login: dto.login,
            name: dto.name,
            bio: dto.bio,
            avatar_url: dto.avatar_url,
            html_url: dto.html_url,
        }
    }
}

/// Query string of `GET /auth/user`
#[derive(Debug, Clone, Serialize)]
pub struct UserQuery<'a> {
    pub token: &'a str,
}
