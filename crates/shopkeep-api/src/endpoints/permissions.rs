// Permission endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Permission, PermissionDraft, ResourceId};

impl ApiClient {
    /// `GET /api/permissions`
    pub async fn list_permissions(&self, token: Option<&str>) -> Result<Vec<Permission>, Error> {
        debug!("listing permissions");
        self.get_list(token, "permissions", &[]).await
    }

    /// `GET /api/permissions/{id}`
    pub async fn get_permission(
        &self,
        token: Option<&str>,
        id: ResourceId,
    ) -> Result<Permission, Error> {
        self.get(token, &format!("permissions/{id}")).await
    }

    /// `POST /api/permissions`
    pub async fn create_permission(
        &self,
        token: Option<&str>,
        draft: &PermissionDraft,
    ) -> Result<Permission, Error> {
        debug!(name = %draft.name, "creating permission");
        self.post(token, "permissions", draft).await
    }

    /// `PUT /api/permissions/{id}`
    pub async fn update_permission(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &PermissionDraft,
    ) -> Result<Permission, Error> {
        debug!(id, "updating permission");
        self.put(token, &format!("permissions/{id}"), draft).await
    }

    /// `DELETE /api/permissions/{id}`
    pub async fn delete_permission(
        &self,
        token: Option<&str>,
        id: ResourceId,
    ) -> Result<(), Error> {
        debug!(id, "deleting permission");
        self.delete(token, &format!("permissions/{id}")).await
    }
}
