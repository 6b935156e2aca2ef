// Role endpoints
//
// Permission membership edits mirror the user/role shape: the edited
// role comes back with its permissions embedded.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ResourceId, Role, RoleDraft};

impl ApiClient {
    /// `GET /api/roles`
    pub async fn list_roles(&self, token: Option<&str>) -> Result<Vec<Role>, Error> {
        debug!("listing roles");
        self.get_list(token, "roles", &[]).await
    }

    /// `GET /api/roles/{id}`
    pub async fn get_role(&self, token: Option<&str>, id: ResourceId) -> Result<Role, Error> {
        self.get(token, &format!("roles/{id}")).await
    }

    /// `POST /api/roles`
    pub async fn create_role(&self, token: Option<&str>, draft: &RoleDraft) -> Result<Role, Error> {
        debug!(name = %draft.name, "creating role");
        self.post(token, "roles", draft).await
    }

    /// `PUT /api/roles/{id}`
    pub async fn update_role(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &RoleDraft,
    ) -> Result<Role, Error> {
        debug!(id, "updating role");
        self.put(token, &format!("roles/{id}"), draft).await
    }

    /// `DELETE /api/roles/{id}`
    pub async fn delete_role(&self, token: Option<&str>, id: ResourceId) -> Result<(), Error> {
        debug!(id, "deleting role");
        self.delete(token, &format!("roles/{id}")).await
    }

    /// `POST /api/roles/{id}/permissions/{permissionId}` — returns the
    /// updated role.
    pub async fn add_role_permission(
        &self,
        token: Option<&str>,
        role_id: ResourceId,
        permission_id: ResourceId,
    ) -> Result<Role, Error> {
        debug!(role_id, permission_id, "adding permission to role");
        self.post_empty(token, &format!("roles/{role_id}/permissions/{permission_id}"))
            .await
    }

    /// `DELETE /api/roles/{id}/permissions/{permissionId}` — returns the
    /// updated role.
    pub async fn remove_role_permission(
        &self,
        token: Option<&str>,
        role_id: ResourceId,
        permission_id: ResourceId,
    ) -> Result<Role, Error> {
        debug!(role_id, permission_id, "removing permission from role");
        self.delete_with_response(token, &format!("roles/{role_id}/permissions/{permission_id}"))
            .await
    }
}
