// Order store.
//
// One items list backs both scopes: a user-orders fetch and the admin
// all-orders fetch each replace it wholesale, whichever ran last wins.
// Status updates use the relationship-edit transition so a selected
// order refreshes only when it was the one edited.

use std::sync::Arc;

use tokio::sync::watch;

use shopkeep_api::ApiClient;
use shopkeep_api::types::{Order, OrderStatus, ResourceId};

use super::lifecycle::ResourceState;
use crate::error::CoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum OrderOp {
    Place,
    UserOrders,
    AllOrders,
    Detail,
    UpdateStatus,
}

pub type OrderState = ResourceState<Order, OrderOp>;

pub struct OrderStore {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    state: watch::Sender<OrderState>,
}

impl OrderStore {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        let (state, _) = watch::channel(OrderState::default());
        Self {
            api,
            session,
            state,
        }
    }

    pub fn current(&self) -> OrderState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OrderState> {
        self.state.subscribe()
    }

    // ── Remote operations ────────────────────────────────────────────

    /// Place an order from the user's cart. The created order is
    /// appended and becomes the selection, ready for a confirmation
    /// view.
    pub async fn place(&self, user_id: ResourceId) -> Result<Order, CoreError> {
        self.state.send_modify(|s| s.begin(OrderOp::Place));
        let token = self.session.token();
        match self.api.place_order(token.as_deref(), user_id).await {
            Ok(order) => {
                self.state.send_modify(|s| {
                    s.finish_created(OrderOp::Place, order.clone());
                    s.set_selected(order.clone());
                });
                Ok(order)
            }
            Err(err) => Err(self.fail(OrderOp::Place, err)),
        }
    }

    pub async fn fetch_user_orders(&self, user_id: ResourceId) -> Result<Vec<Order>, CoreError> {
        self.state.send_modify(|s| s.begin(OrderOp::UserOrders));
        let token = self.session.token();
        match self.api.list_user_orders(token.as_deref(), user_id).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(OrderOp::UserOrders, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(OrderOp::UserOrders, err)),
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Order>, CoreError> {
        self.state.send_modify(|s| s.begin(OrderOp::AllOrders));
        let token = self.session.token();
        match self.api.list_all_orders(token.as_deref()).await {
            Ok(items) => {
                self.state
                    .send_modify(|s| s.finish_list(OrderOp::AllOrders, items.clone()));
                Ok(items)
            }
            Err(err) => Err(self.fail_list(OrderOp::AllOrders, err)),
        }
    }

    pub async fn fetch_by_id(
        &self,
        order_id: ResourceId,
        user_id: ResourceId,
    ) -> Result<Order, CoreError> {
        self.state.send_modify(|s| s.begin(OrderOp::Detail));
        let token = self.session.token();
        match self.api.get_order(token.as_deref(), order_id, user_id).await {
            Ok(order) => {
                self.state
                    .send_modify(|s| s.finish_detail(OrderOp::Detail, order.clone()));
                Ok(order)
            }
            Err(err) => Err(self.fail(OrderOp::Detail, err)),
        }
    }

    /// Move an order to a new status. Any status is forwarded; offering
    /// only legal next steps ([`OrderStatus::allowed_transitions`]) is
    /// the caller's job, and authority stays with the backend.
    pub async fn update_status(
        &self,
        order_id: ResourceId,
        status: OrderStatus,
    ) -> Result<Order, CoreError> {
        self.state.send_modify(|s| s.begin(OrderOp::UpdateStatus));
        let token = self.session.token();
        match self
            .api
            .update_order_status(token.as_deref(), order_id, status)
            .await
        {
            Ok(order) => {
                self.state
                    .send_modify(|s| s.finish_refreshed(OrderOp::UpdateStatus, &order));
                Ok(order)
            }
            Err(err) => Err(self.fail(OrderOp::UpdateStatus, err)),
        }
    }

    // ── Synchronous local operations ─────────────────────────────────

    pub fn set_selected(&self, order: Order) {
        self.state.send_modify(|s| s.set_selected(order));
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
        self.state.send_replace(OrderState::default());
    }

    // ── Failure recording ────────────────────────────────────────────

    fn fail(&self, op: OrderOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail(op, message));
        core
    }

    fn fail_list(&self, op: OrderOp, err: shopkeep_api::Error) -> CoreError {
        let core = CoreError::from(err);
        let message = core.to_string();
        self.state.send_modify(|s| s.fail_list(op, message));
        core
    }
}
