// User store.
//
// Role membership edits and the enable/disable toggle return the full
// updated user, applied with the relationship-edit transition: replace
// in place, refresh the selection only when it was the edited user.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{ResourceId, User, UserDraft};

use super::lifecycle::ResourceState;
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum UserOp {
    List,
    Detail,
    Create,
    Update,
    Delete,
    AddRole,
    RemoveRole,
    ToggleStatus,
}

pub type UserState = ResourceState<User, UserOp>;

pub struct UserStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<UserState>,
}

impl UserStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(UserState::default());
        Self {
            api,
            session,
            state,
        }
    }

    pub fn current(&self) -> UserState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }

    // ── Remote operations ────────────────────────────────────────────

    pub async fn fetch_all(&self) -> Result<Vec<User>, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::List));
        let token = self.session.token();
        match self.api.list_users(token.as_deref()).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(UserOp::List, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(UserOp::List, err)),
        }
    }

    pub async fn fetch_by_id(&self, id: ResourceId) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::Detail));
        let token = self.session.token();
        match self.api.get_user(token.as_deref(), id).await {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_detail(UserOp::Detail, user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::Detail, err)),
        }
    }

    pub async fn create(&self, draft: &UserDraft) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::Create));
        let token = self.session.token();
        match self.api.create_user(token.as_deref(), draft).await {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_created(UserOp::Create, user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::Create, err)),
        }
    }

    pub async fn update(&self, id: ResourceId, draft: &UserDraft) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::Update));
        let token = self.session.token();
        match self.api.update_user(token.as_deref(), id, draft).await {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_updated(UserOp::Update, &user));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::Update, err)),
        }
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::Delete));
        let token = self.session.token();
        match self.api.delete_user(token.as_deref(), id).await {
            Ok(()) => {
                self.state
                    .send_modify(|s| s.finish_deleted(UserOp::Delete, id));
                Ok(())
            }
            Err(err) => Err(self.fail(UserOp::Delete, err)),
        }
    }

    pub async fn add_role(
        &self,
        user_id: ResourceId,
        role_id: ResourceId,
    ) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::AddRole));
        let token = self.session.token();
        match self.api.add_user_role(token.as_deref(), user_id, role_id).await {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_refreshed(UserOp::AddRole, &user));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::AddRole, err)),
        }
    }

    pub async fn remove_role(
        &self,
        user_id: ResourceId,
        role_id: ResourceId,
    ) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::RemoveRole));
        let token = self.session.token();
        match self
            .api
            .remove_user_role(token.as_deref(), user_id, role_id)
            .await
        {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_refreshed(UserOp::RemoveRole, &user));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::RemoveRole, err)),
        }
    }

    pub async fn set_status(&self, user_id: ResourceId, enabled: bool) -> Result<User, CoreError> {
        self.state.send_modify(|s| s.begin(UserOp::ToggleStatus));
        let token = self.session.token();
        match self
            .api
            .set_user_status(token.as_deref(), user_id, enabled)
            .await
        {
            Ok(user) => {
                self.state
                    .send_modify(|s| s.finish_refreshed(UserOp::ToggleStatus, &user));
                Ok(user)
            }
            Err(err) => Err(self.fail(UserOp::ToggleStatus, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected(&self, user: User) {
        self.state.send_modify(|s| s.set_selected(user));
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
        self.state.send_replace(UserState::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: UserOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail(op, message));
        core
    }

    fn fail_list(&self, op: UserOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail_list(op, message));
        core
    }
}
