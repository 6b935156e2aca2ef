// Tag endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ResourceId, Tag, TagDraft};

impl ApiClient {
    /// `GET /api/tags`
    pub async fn list_tags(&self, token: Option<&str>) -> Result<Vec<Tag>, Error> {
        debug!("listing tags");
        self.get_list(token, "tags", &[]).await
    }

    /// `GET /api/tags/{id}`
    pub async fn get_tag(&self, token: Option<&str>, id: ResourceId) -> Result<Tag, Error> {
        self.get(token, &format!("tags/{id}")).await
    }

    /// `POST /api/tags`
    pub async fn create_tag(&self, token: Option<&str>, draft: &TagDraft) -> Result<Tag, Error> {
        debug!(name = %draft.name, "creating tag");
        self.post(token, "tags", draft).await
    }

    /// `PUT /api/tags/{id}`
    pub async fn update_tag(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &TagDraft,
    ) -> Result<Tag, Error> {
        debug!(id, "updating tag");
        self.put(token, &format!("tags/{id}"), draft).await
    }

    /// `DELETE /api/tags/{id}`
    pub async fn delete_tag(&self, token: Option<&str>, id: ResourceId) -> Result<(), Error> {
        debug!(id, "deleting tag");
        self.delete(token, &format!("tags/{id}")).await
    }
}
