// Product store: catalog cache plus the active filter set.
//
// Filters live in their own channel so filter edits do not disturb the
// resource state. Submissions go over multipart even when no images are
// attached; the form shape is uniform either way.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{ImageAttachment, Product, ProductDraft, ProductFilters, ResourceId};

use super::lifecycle::ResourceState;
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ProductOp {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

pub type ProductState = ResourceState<Product, ProductOp>;

pub struct ProductStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<ProductState>,
    filters: watch::Sender<ProductFilters>,
}

impl ProductStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(ProductState::default());
        let (filters, _) = watch::channel(ProductFilters::default());
        Self {
            api,
            session,
            state,
            filters,
        }
    }

    pub fn current(&self) -> ProductState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductState> {
        self.state.subscribe()
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub fn filters(&self) -> ProductFilters {
        self.filters.borrow().clone()
    }

    pub fn subscribe_filters(&self) -> watch::Receiver<ProductFilters> {
        self.filters.subscribe()
    }

    /// Replace the active filter set. Does not refetch; callers decide
    /// when to call [`fetch_all`](Self::fetch_all) with the new set.
    pub fn set_filters(&self, filters: ProductFilters) {
        self.filters.send_replace(filters);
    }

    pub fn clear_filters(&self) {
        self.filters.send_replace(ProductFilters::default());
    }

    // ── Remote operations ────────────────────────────────────────────

    pub async fn fetch_all(&self, filters: &ProductFilters) -> Result<Vec<Product>, CoreError> {
        self.state.send_modify(|s| s.begin(ProductOp::List));
        let token = self.session.token();
        match self.api.list_products(token.as_deref(), filters).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(ProductOp::List, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(ProductOp::List, err)),
        }
    }

    /// Fetch with the store's own active filter set.
    pub async fn fetch_filtered(&self) -> Result<Vec<Product>, CoreError> {
        let filters = self.filters();
        self.fetch_all(&filters).await
    }

    pub async fn fetch_by_id(&self, id: ResourceId) -> Result<Product, CoreError> {
        self.state.send_modify(|s| s.begin(ProductOp::Detail));
        let token = self.session.token();
        match self.api.get_product(token.as_deref(), id).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_detail(ProductOp::Detail, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(ProductOp::Detail, err)),
        }
    }

    pub async fn create(
        &self,
        draft: &ProductDraft,
        images: &[ImageAttachment],
    ) -> Result<Product, CoreError> {
        self.state.send_modify(|s| s.begin(ProductOp::Create));
        let token = self.session.token();
        match self.api.create_product(token.as_deref(), draft, images).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_created(ProductOp::Create, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(ProductOp::Create, err)),
        }
    }

    pub async fn update(
        &self,
        id: ResourceId,
        draft: &ProductDraft,
        images: &[ImageAttachment],
    ) -> Result<Product, CoreError> {
        self.state.send_modify(|s| s.begin(ProductOp::Update));
        let token = self.session.token();
        match self
            .api
            .update_product(token.as_deref(), id, draft, images)
            .await
        {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_updated(ProductOp::Update, &item));
                Ok(item)
            }
            Err(err) => Err(self.fail(ProductOp::Update, err)),
        }
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(ProductOp::Delete));
        let token = self.session.token();
        match self.api.delete_product(token.as_deref(), id).await {
            Ok(()) => {
                self.state
                    .send_modify(|s| s.finish_deleted(ProductOp::Delete, id));
                Ok(())
            }
            Err(err) => Err(self.fail(ProductOp::Delete, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected(&self, item: Product) {
        self.state.send_modify(|s| s.set_selected(item));
    }

    pub fn clear_selected(&self) {
        self.state.send_modify(ResourceState::clear_selected);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(ResourceState::clear_error);
    }

    pub fn reset_ops(&self) {
        self.state.send_modify(ResourceState::reset_ops);
    }

    pub fn reset(&self) {
        self.state.send_replace(ProductState::default());
        self.filters.send_replace(ProductFilters::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: ProductOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail(op, message));
        core
    }

    fn fail_list(&self, op: ProductOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail_list(op, message));
        core
    }
}
