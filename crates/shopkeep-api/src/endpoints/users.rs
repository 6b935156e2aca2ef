// User endpoints
//
// Role membership edits return the updated user so the caller can
// replace its cached copy in one step.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ResourceId, StatusToggle, User, UserDraft};

impl ApiClient {
    /// `GET /api/users`
    pub async fn list_users(&self, token: Option<&str>) -> Result<Vec<User>, Error> {
        debug!("listing users");
        self.get_list(token, "users", &[]).await
    }

    /// `GET /api/users/{id}`
    pub async fn get_user(&self, token: Option<&str>, id: ResourceId) -> Result<User, Error> {
        self.get(token, &format!("users/{id}")).await
    }

    /// `POST /api/users`
    pub async fn create_user(&self, token: Option<&str>, draft: &UserDraft) -> Result<User, Error> {
        debug!(username = %draft.username, "creating user");
        self.post(token, "users", draft).await
    }

    /// `PUT /api/users/{id}`
    pub async fn update_user(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &UserDraft,
    ) -> Result<User, Error> {
        debug!(id, "updating user");
        self.put(token, &format!("users/{id}"), draft).await
    }

    /// `DELETE /api/users/{id}`
    pub async fn delete_user(&self, token: Option<&str>, id: ResourceId) -> Result<(), Error> {
        debug!(id, "deleting user");
        self.delete(token, &format!("users/{id}")).await
    }

    /// `POST /api/users/{id}/roles/{roleId}` — grant a role; returns the
    /// updated user.
    pub async fn add_user_role(
        &self,
        token: Option<&str>,
        user_id: ResourceId,
        role_id: ResourceId,
    ) -> Result<User, Error> {
        debug!(user_id, role_id, "adding role to user");
        self.post_empty(token, &format!("users/{user_id}/roles/{role_id}"))
            .await
    }

    /// `DELETE /api/users/{id}/roles/{roleId}` — revoke a role; returns
    /// the updated user.
    pub async fn remove_user_role(
        &self,
        token: Option<&str>,
        user_id: ResourceId,
        role_id: ResourceId,
    ) -> Result<User, Error> {
        debug!(user_id, role_id, "removing role from user");
        self.delete_with_response(token, &format!("users/{user_id}/roles/{role_id}"))
            .await
    }

    /// `PATCH /api/users/{id}/status` — enable or disable the account.
    pub async fn set_user_status(
        &self,
        token: Option<&str>,
        user_id: ResourceId,
        enabled: bool,
    ) -> Result<User, Error> {
        debug!(user_id, enabled, "toggling user status");
        self.patch(
            token,
            &format!("users/{user_id}/status"),
            &StatusToggle { enabled },
        )
        .await
    }
}
