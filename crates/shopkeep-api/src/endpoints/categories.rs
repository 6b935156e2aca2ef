// Category endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Category, CategoryDraft, ResourceId};

impl ApiClient {
    /// `GET /api/categories`
    pub async fn list_categories(&self, token: Option<&str>) -> Result<Vec<Category>, Error> {
        debug!("listing categories");
        self.get_list(token, "categories", &[]).await
    }

    /// `GET /api/categories/{id}`
    pub async fn get_category(
        &self,
        token: Option<&str>,
        id: ResourceId,
    ) -> Result<Category, Error> {
        self.get(token, &format!("categories/{id}")).await
    }

    /// `POST /api/categories`
    pub async fn create_category(
        &self,
        token: Option<&str>,
        draft: &CategoryDraft,
    ) -> Result<Category, Error> {
        debug!(name = %draft.name, "creating category");
        self.post(token, "categories", draft).await
    }

    /// `PUT /api/categories/{id}`
    pub async fn update_category(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &CategoryDraft,
    ) -> Result<Category, Error> {
        debug!(id, "updating category");
        self.put(token, &format!("categories/{id}"), draft).await
    }

    /// `DELETE /api/categories/{id}`
    pub async fn delete_category(&self, token: Option<&str>, id: ResourceId) -> Result<(), Error> {
        debug!(id, "deleting category");
        self.delete(token, &format!("categories/{id}")).await
    }
}
