// Role store.
//
// Access control is managed as one unit: the store carries both the
// role collection and the permission catalog, each with its own
// selection, under a single operation flag set. State transitions are
// hand-written here because the shared shape assumes one collection.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{Permission, PermissionDraft, ResourceId, Role, RoleDraft};

use super::lifecycle::{Entity, OpFlags, replace_by_id};
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum RoleOp {
    Roles,
    RoleDetail,
    RoleCreate,
    RoleUpdate,
    RoleDelete,
    Permissions,
    PermissionDetail,
    PermissionCreate,
    PermissionUpdate,
    PermissionDelete,
    AddPermission,
    RemovePermission,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleState {
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub selected_role: Option<Role>,
    pub selected_permission: Option<Permission>,
    pub in_flight: OpFlags<RoleOp>,
    pub last_error: Option<String>,
}

impl RoleState {
    fn begin(&mut self, op: RoleOp) {
        self.in_flight.set(op, true);
        self.last_error = None;
    }

    fn fail(&mut self, op: RoleOp, message: String) {
        self.in_flight.set(op, false);
        self.last_error = Some(message);
    }

    /// Replace a role in place, refreshing the role selection only when
    /// it was the one edited.
    fn refresh_role(&mut self, op: RoleOp, role: &Role) {
        self.in_flight.set(op, false);
        replace_by_id(&mut self.roles, role);
        if self
            .selected_role
            .as_ref()
            .is_some_and(|s| s.id() == role.id())
        {
            self.selected_role = Some(role.clone());
        }
    }
}

pub struct RoleStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<RoleState>,
}

impl RoleStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(RoleState::default());
        Self {
            api,
            session,
            state,
        }
    }

    pub fn current(&self) -> RoleState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoleState> {
        self.state.subscribe()
    }

    // ── Roles ────────────────────────────────────────────────────────

    pub async fn fetch_roles(&self) -> Result<Vec<Role>, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::Roles));
        let token = self.session.token();
        match self.api.list_roles(token.as_deref()).await {
            Ok(roles) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::Roles, false);
                    s.roles = roles.clone();
                });
                Ok(roles)
            }
            Err(err) => Err(self.fail_with(RoleOp::Roles, err, |s| s.roles.clear())),
        }
    }

    pub async fn fetch_role(&self, id: ResourceId) -> Result<Role, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::RoleDetail));
        let token = self.session.token();
        match self.api.get_role(token.as_deref(), id).await {
            Ok(role) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::RoleDetail, false);
                    s.selected_role = Some(role.clone());
                });
                Ok(role)
            }
            Err(err) => Err(self.fail(RoleOp::RoleDetail, err)),
        }
    }

    pub async fn create_role(&self, draft: &RoleDraft) -> Result<Role, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::RoleCreate));
        let token = self.session.token();
        match self.api.create_role(token.as_deref(), draft).await {
            Ok(role) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::RoleCreate, false);
                    s.roles.push(role.clone());
                    s.selected_role = None;
                });
                Ok(role)
            }
            Err(err) => Err(self.fail(RoleOp::RoleCreate, err)),
        }
    }

    pub async fn update_role(&self, id: ResourceId, draft: &RoleDraft) -> Result<Role, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::RoleUpdate));
        let token = self.session.token();
        match self.api.update_role(token.as_deref(), id, draft).await {
            Ok(role) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::RoleUpdate, false);
                    replace_by_id(&mut s.roles, &role);
                    s.selected_role = None;
                });
                Ok(role)
            }
            Err(err) => Err(self.fail(RoleOp::RoleUpdate, err)),
        }
    }

    pub async fn delete_role(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::RoleDelete));
        let token = self.session.token();
        match self.api.delete_role(token.as_deref(), id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::RoleDelete, false);
                    s.roles.retain(|role| role.id != id);
                });
                Ok(())
            }
            Err(err) => Err(self.fail(RoleOp::RoleDelete, err)),
        }
    }

    // ── Permission catalog ───────────────────────────────────────────

    pub async fn fetch_permissions(&self) -> Result<Vec<Permission>, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::Permissions));
        let token = self.session.token();
        match self.api.list_permissions(token.as_deref()).await {
            Ok(permissions) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::Permissions, false);
                    s.permissions = permissions.clone();
                });
                Ok(permissions)
            }
            Err(err) => Err(self.fail_with(RoleOp::Permissions, err, |s| s.permissions.clear())),
        }
    }

    pub async fn fetch_permission(&self, id: ResourceId) -> Result<Permission, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::PermissionDetail));
        let token = self.session.token();
        match self.api.get_permission(token.as_deref(), id).await {
            Ok(permission) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::PermissionDetail, false);
                    s.selected_permission = Some(permission.clone());
                });
                Ok(permission)
            }
            Err(err) => Err(self.fail(RoleOp::PermissionDetail, err)),
        }
    }

    pub async fn create_permission(&self, draft: &PermissionDraft) -> Result<Permission, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::PermissionCreate));
        let token = self.session.token();
        match self.api.create_permission(token.as_deref(), draft).await {
            Ok(permission) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::PermissionCreate, false);
                    s.permissions.push(permission.clone());
                    s.selected_permission = None;
                });
                Ok(permission)
            }
            Err(err) => Err(self.fail(RoleOp::PermissionCreate, err)),
        }
    }

    pub async fn update_permission(
        &self,
        id: ResourceId,
        draft: &PermissionDraft,
    ) -> Result<Permission, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::PermissionUpdate));
        let token = self.session.token();
        match self.api.update_permission(token.as_deref(), id, draft).await {
            Ok(permission) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::PermissionUpdate, false);
                    replace_by_id(&mut s.permissions, &permission);
                    s.selected_permission = None;
                });
                Ok(permission)
            }
            Err(err) => Err(self.fail(RoleOp::PermissionUpdate, err)),
        }
    }

    pub async fn delete_permission(&self, id: ResourceId) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::PermissionDelete));
        let token = self.session.token();
        match self.api.delete_permission(token.as_deref(), id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.in_flight.set(RoleOp::PermissionDelete, false);
                    s.permissions.retain(|permission| permission.id != id);
                });
                Ok(())
            }
            Err(err) => Err(self.fail(RoleOp::PermissionDelete, err)),
        }
    }

    // ── Membership edits ─────────────────────────────────────────────

    pub async fn add_permission(
        &self,
        role_id: ResourceId,
        permission_id: ResourceId,
    ) -> Result<Role, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::AddPermission));
        let token = self.session.token();
        match self
            .api
            .add_role_permission(token.as_deref(), role_id, permission_id)
            .await
        {
            Ok(role) => {
                self.state
                    .send_modify(|s| s.refresh_role(RoleOp::AddPermission, &role));
                Ok(role)
            }
            Err(err) => Err(self.fail(RoleOp::AddPermission, err)),
        }
    }

    pub async fn remove_permission(
        &self,
        role_id: ResourceId,
        permission_id: ResourceId,
    ) -> Result<Role, CoreError> {
        self.state.send_modify(|s| s.begin(RoleOp::RemovePermission));
        let token = self.session.token();
        match self
            .api
            .remove_role_permission(token.as_deref(), role_id, permission_id)
            .await
        {
            Ok(role) => {
                self.state
                    .send_modify(|s| s.refresh_role(RoleOp::RemovePermission, &role));
                Ok(role)
            }
            Err(err) => Err(self.fail(RoleOp::RemovePermission, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected_role(&self, role: Role) {
        self.state.send_modify(|s| s.selected_role = Some(role));
    }

    pub fn clear_selected_role(&self) {
        self.state.send_modify(|s| s.selected_role = None);
    }

    pub fn set_selected_permission(&self, permission: Permission) {
        self.state
            .send_modify(|s| s.selected_permission = Some(permission));
    }

    pub fn clear_selected_permission(&self) {
        self.state.send_modify(|s| s.selected_permission = None);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.last_error = None);
    }

    pub fn reset_ops(&self) {
        self.state.send_modify(|s| s.in_flight.reset());
    }

    pub fn reset(&self) {
        self.state.send_replace(RoleState::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: RoleOp, err: shopkeep_api::Error) -> CoreError {
        self.fail_with(op, err, |_| {})
    }

    /// Record a failure, then apply `also` for list fetches that must
    /// drop their cached collection.
    fn fail_with(
        &self,
        op: RoleOp,
        err: shopkeep_api::Error,
        also: impl FnOnce(&mut RoleState),
    ) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| {
            s.fail(op, message);
            also(s);
        });
        core
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn permission(id: ResourceId, name: &str) -> Permission {
        Permission {
            id,
            name: name.into(),
            description: None,
        }
    }

    fn role(id: ResourceId, name: &str, permissions: Vec<Permission>) -> Role {
        Role {
            id,
            name: name.into(),
            description: None,
            permissions,
        }
    }

    #[test]
    fn refresh_role_updates_selection_only_when_it_matched() {
        let mut state = RoleState {
            roles: vec![role(1, "ADMIN", vec![]), role(2, "CLERK", vec![])],
            selected_role: Some(role(2, "CLERK", vec![])),
            ..RoleState::default()
        };

        let edited = role(2, "CLERK", vec![permission(7, "orders:read")]);
        state.refresh_role(RoleOp::AddPermission, &edited);
        assert_eq!(state.roles[1], edited);
        assert_eq!(state.selected_role, Some(edited.clone()));

        let other = role(1, "ADMIN", vec![permission(9, "users:write")]);
        state.refresh_role(RoleOp::RemovePermission, &other);
        assert_eq!(state.selected_role, Some(edited));
    }

    #[test]
    fn begin_clears_a_stale_error_across_both_collections() {
        let mut state = RoleState::default();
        state.fail(RoleOp::Permissions, "boom".into());
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        state.begin(RoleOp::RoleCreate);
        assert_eq!(state.last_error, None);
        assert!(state.in_flight.is_busy(RoleOp::RoleCreate));
    }
}
