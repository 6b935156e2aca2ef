// Tag store: CRUD cache for `/api/tags`.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{ResourceId, Tag, TagDraft};

use super::lifecycle::ResourceState;
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum TagOp {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

pub type TagState = ResourceState<Tag, TagOp>;

pub struct TagStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<TagState>,
}

impl TagStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(TagState::default());
        Self {
            api,
            session,
            state,
        }
    }

    pub fn current(&self) -> TagState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TagState> {
        self.state.subscribe()
    }

    // ── Remote operations ────────────────────────────────────────────

    pub async fn fetch_all(&self) -> Result<Vec<Tag>, CoreError> {
        self.state.send_modify(|s| s.begin(TagOp::List));
        let token = self.session.token();
        match self.api.list_tags(token.as_deref()).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(TagOp::List, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(TagOp::List, err)),
        }
    }

    pub async fn fetch_by_id(&self, id: ResourceId) -> Result<Tag, CoreError> {
        self.state.send_modify(|s| s.begin(TagOp::Detail));
        let token = self.session.token();
        match self.api.get_tag(token.as_deref(), id).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_detail(TagOp::Detail, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(TagOp::Detail, err)),
        }
    }

    pub async fn create(&self, draft: &TagDraft) -> Result<Tag, CoreError> {
        self.state.send_modify(|s| s.begin(TagOp::Create));
        let token = self.session.token();
        match self.api.create_tag(token.as_deref(), draft).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_created(TagOp::Create, item.clone()));
                Ok(item)
            }
            Err(err) => Err(self.fail(TagOp::Create, err)),
        }
    }

    pub async fn update(&self, id: ResourceId, draft: &TagDraft) -> Result<Tag, CoreError> {
        self.state.send_modify(|s| s.begin(TagOp::Update));
        let token = self.session.token();
        match self.api.update_tag(token.as_deref(), id, draft).await {
            Ok(item) => {
                self.state
                    .send_modify(|s| s.finish_updated(TagOp::Update, &item));
                Ok(item)
            }
            Err(err) => Err(self.fail(TagOp::Update, err)),
        }
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(TagOp::Delete));
        let token = self.session.token();
        match self.api.delete_tag(token.as_deref(), id).await {
            Ok(()) => {
                self.state
                    .send_modify(|s| s.finish_deleted(TagOp::Delete, id));
                Ok(())
            }
            Err(err) => Err(self.fail(TagOp::Delete, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected(&self, item: Tag) {
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
        self.state.send_replace(TagState::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: TagOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail(op, message));
        core
    }

    fn fail_list(&self, op: TagOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail_list(op, message));
        core
    }
}
