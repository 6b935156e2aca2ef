// Product endpoints
//
// Create and update canonically go over multipart form data: the
// structured fields travel as one JSON string under the `product` field
// and each image as its own `images` file part — the backend binds the
// form exactly this way. A pure-JSON body (no images) is accepted too
// and exposed as the `_json` variants.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ImageAttachment, Product, ProductDraft, ProductFilters, ResourceId};

/// Build the canonical multipart body: `product` = draft as a JSON
/// string, then one `images` part per attachment.
fn product_form(draft: &ProductDraft, images: &[ImageAttachment]) -> Result<Form, Error> {
    let product_json = serde_json::to_string(draft)?;
    let mut form = Form::new().text("product", product_json);
    for image in images {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        form = form.part("images", part);
    }
    Ok(form)
}

/// Image-only form for the standalone upload endpoint.
fn images_form(images: &[ImageAttachment]) -> Result<Form, Error> {
    let mut form = Form::new();
    for image in images {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        form = form.part("images", part);
    }
    Ok(form)
}

impl ApiClient {
    /// `GET /api/products`, with the optional filter query.
    pub async fn list_products(
        &self,
        token: Option<&str>,
        filters: &ProductFilters,
    ) -> Result<Vec<Product>, Error> {
        debug!("listing products");
        self.get_list(token, "products", &filters.query_params())
            .await
    }

    /// `GET /api/products/{id}`
    pub async fn get_product(&self, token: Option<&str>, id: ResourceId) -> Result<Product, Error> {
        self.get(token, &format!("products/{id}")).await
    }

    /// `POST /api/products` (multipart: `product` JSON string + `images` files)
    pub async fn create_product(
        &self,
        token: Option<&str>,
        draft: &ProductDraft,
        images: &[ImageAttachment],
    ) -> Result<Product, Error> {
        debug!(name = %draft.name, images = images.len(), "creating product");
        let form = product_form(draft, images)?;
        self.post_multipart(token, "products", form).await
    }

    /// `POST /api/products` with a plain JSON body (no images).
    pub async fn create_product_json(
        &self,
        token: Option<&str>,
        draft: &ProductDraft,
    ) -> Result<Product, Error> {
        debug!(name = %draft.name, "creating product (json)");
        self.post(token, "products", draft).await
    }

    /// `PUT /api/products/{id}` (multipart, same shape as create)
    pub async fn update_product(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &ProductDraft,
        images: &[ImageAttachment],
    ) -> Result<Product, Error> {
        debug!(id, images = images.len(), "updating product");
        let form = product_form(draft, images)?;
        self.put_multipart(token, &format!("products/{id}"), form)
            .await
    }

    /// `PUT /api/products/{id}` with a plain JSON body (no images).
    pub async fn update_product_json(
        &self,
        token: Option<&str>,
        id: ResourceId,
        draft: &ProductDraft,
    ) -> Result<Product, Error> {
        debug!(id, "updating product (json)");
        self.put(token, &format!("products/{id}"), draft).await
    }

    /// `POST /api/products/{id}/images` — attach images to an existing
    /// product. The response body is not part of the contract.
    pub async fn upload_product_images(
        &self,
        token: Option<&str>,
        id: ResourceId,
        images: &[ImageAttachment],
    ) -> Result<(), Error> {
        debug!(id, images = images.len(), "uploading product images");
        let form = images_form(images)?;
        self.post_multipart_no_content(token, &format!("products/{id}/images"), form)
            .await
    }

    /// `DELETE /api/products/{id}`
    pub async fn delete_product(&self, token: Option<&str>, id: ResourceId) -> Result<(), Error> {
        debug!(id, "deleting product");
        self.delete(token, &format!("products/{id}")).await
    }
}
