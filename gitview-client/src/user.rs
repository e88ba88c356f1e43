//! Authenticated user endpoint

use gitview_core::domain::user::User;
use gitview_core::dto::user::{UserDto, UserQuery};

use crate::error::Result;
use crate::{GitViewerClient, require};

impl GitViewerClient {
    /// Get the profile of the account the token belongs to
    pub async fn get_user(&self, token: &str) -> Result<User> {
        require("token", token)?;

        let response = self
            .client
            .get(self.endpoint("user"))
            .query(&UserQuery { token })
            .send()
            .await?;

        let body: UserDto = self.handle_response(response).await?;
        Ok(body.into())
    }
}
