// Category store: CRUD cache for `/api/categories`.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{Category, CategoryDraft, ResourceId};

use super::lifecycle::ResourceState;
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum CategoryOp {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

pub type CategoryState = ResourceState<Category, CategoryOp>;

pub struct CategoryStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<CategoryState>,
}

impl CategoryStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(CategoryState::default());
        Self {
            api,
            session,
            state,
        }
    }

    pub fn current(&self) -> CategoryState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CategoryState> {
        self.state.subscribe()
    }

    // ── Remote operations ────────────────────────────────────────────

    pub async fn fetch_all(&self) -> Result<Vec<Category>, CoreError> {
        self.state.send_modify(|s| s.begin(CategoryOp::List));
        let token = self.session.token();
        match self.api.list_categories(token.as_deref()).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(CategoryOp::List, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(CategoryOp::List, err)),
        }
    }

    pub async fn fetch_by_id(&self, id: ResourceId) -> Result<Category, CoreError> {
        self.state.send_modify(|s| s.begin(CategoryOp::Detail));
        let token = self.session.token();
        match self.api.get_category(token.as_deref(), id).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_detail(CategoryOp::Detail, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(CategoryOp::Detail, err)),
        }
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<Category, CoreError> {
        self.state.send_modify(|s| s.begin(CategoryOp::Create));
        let token = self.session.token();
        match self.api.create_category(token.as_deref(), draft).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_created(CategoryOp::Create, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(CategoryOp::Create, err)),
        }
    }

    pub async fn update(&self, id: ResourceId, draft: &CategoryDraft) -> Result<Category, CoreError> {
        self.state.send_modify(|s| s.begin(CategoryOp::Update));
        let token = self.session.token();
        match self.api.update_category(token.as_deref(), id, draft).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_updated(CategoryOp::Update, &item));
                Ok(item)
            }
            Err(err) => Err(self.fail(CategoryOp::Update, err)),
        }
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(CategoryOp::Delete));
        let token = self.session.token();
        match self.api.delete_category(token.as_deref(), id).await {
            Ok(()) => {
                self.state
                    .send_modify(|s| s.finish_deleted(CategoryOp::Delete, id));
                Ok(())
            }
            Err(err) => Err(self.fail(CategoryOp::Delete, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected(&self, item: Category) {
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
        self.state.send_replace(CategoryState::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: CategoryOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail(op, message));
        core
    }

    fn fail_list(&self, op: CategoryOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail_list(op, message));
        core
    }
}
