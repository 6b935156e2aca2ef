// Order endpoints
//
// Orders are user-scoped except for the admin-only `/orders/all` view.
// The status update travels as a query parameter, not a body.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Order, OrderStatus, ResourceId};

impl ApiClient {
    /// `POST /api/orders/place/{userId}` — place an order from the
    /// user's current cart. Empty body; the created order comes back.
    pub async fn place_order(&self, token: Option<&str>, user_id: ResourceId) -> Result<Order, Error> {
        debug!(user_id, "placing order");
        self.post_empty(token, &format!("orders/place/{user_id}"))
            .await
    }

    /// `GET /api/orders/user/{userId}`
    pub async fn list_user_orders(
        &self,
        token: Option<&str>,
        user_id: ResourceId,
    ) -> Result<Vec<Order>, Error> {
        debug!(user_id, "listing user orders");
        self.get_list(token, &format!("orders/user/{user_id}"), &[])
            .await
    }

    /// `GET /api/orders/{id}/user/{userId}`
    pub async fn get_order(
        &self,
        token: Option<&str>,
        order_id: ResourceId,
        user_id: ResourceId,
    ) -> Result<Order, Error> {
        self.get(token, &format!("orders/{order_id}/user/{user_id}"))
            .await
    }

    /// `GET /api/orders/all` (admin)
    pub async fn list_all_orders(&self, token: Option<&str>) -> Result<Vec<Order>, Error> {
        debug!("listing all orders");
        self.get_list(token, "orders/all", &[]).await
    }

    /// `PUT /api/orders/{id}/status?status=…` (admin)
    ///
    /// Forwards whatever status the caller chose; transition legality is
    /// a UI concern ([`OrderStatus::allowed_transitions`]) and backend
    /// authority.
    pub async fn update_order_status(
        &self,
        token: Option<&str>,
        order_id: ResourceId,
        status: OrderStatus,
    ) -> Result<Order, Error> {
        debug!(order_id, %status, "updating order status");
        self.put_query(
            token,
            &format!("orders/{order_id}/status"),
            &[("status", status.to_string())],
        )
        .await
    }
}
