// ── Resource stores and the root aggregator ──

pub mod lifecycle;

mod categories;
mod orders;
mod products;
mod roles;
mod tags;
mod users;

pub use categories::{CategoryOp, CategoryState, CategoryStore};
pub use orders::{OrderOp, OrderState, OrderStore};
pub use products::{ProductOp, ProductState, ProductStore};
pub use roles::{RoleOp, RoleState, RoleStore};
pub use tags::{TagOp, TagState, TagStore};
pub use users::{UserOp, UserState, UserStore};

use std::sync::Arc;

use tracing::debug;

use shopkeep_api::ApiClient;

use crate::session::{SessionPersistence, SessionStore};

/// The root of the state tree: one store per resource type plus the
/// session, all sharing one API client and one session store.
///
/// Constructing the aggregator rehydrates the session synchronously.
/// Run [`persistence_task`](Self::persistence_task) on the executor to
/// keep the persisted session copy current; without it, only
/// [`SessionStore::clear_session`] touches durable storage.
pub struct AppStore {
    pub auth: Arc<SessionStore>,
    pub categories: Arc<CategoryStore>,
    pub tags: Arc<TagStore>,
    pub products: Arc<ProductStore>,
    pub orders: Arc<OrderStore>,
    pub users: Arc<UserStore>,
    pub roles: Arc<RoleStore>,
}

impl AppStore {
    pub fn new(api: Arc<ApiClient>, persistence: Arc<dyn SessionPersistence>) -> Self {
        let auth = Arc::new(SessionStore::new(persistence));
        Self {
            categories: Arc::new(CategoryStore::new(Arc::clone(&api), Arc::clone(&auth))),
            tags: Arc::new(TagStore::new(Arc::clone(&api), Arc::clone(&auth))),
            products: Arc::new(ProductStore::new(Arc::clone(&api), Arc::clone(&auth))),
            orders: Arc::new(OrderStore::new(Arc::clone(&api), Arc::clone(&auth))),
            users: Arc::new(UserStore::new(Arc::clone(&api), Arc::clone(&auth))),
            roles: Arc::new(RoleStore::new(api, Arc::clone(&auth))),
            auth,
        }
    }

    /// Reset every store to its initial state, keeping only the session.
    /// Called on logout so the next login starts from a clean tree.
    pub fn reset_resources(&self) {
        self.categories.reset();
        self.tags.reset();
        self.products.reset();
        self.orders.reset();
        self.users.reset();
        self.roles.reset();
    }

    /// Re-persist the session after every state change anywhere in the
    /// tree. Runs until any store channel closes, which cannot happen
    /// while the `AppStore` owning every sender is alive.
    ///
    /// Persisting on every change rather than only on session changes
    /// matches the write-through contract: the durable copy can never
    /// lag the live one by more than one transition.
    pub async fn persistence_task(&self) {
        let mut auth_rx = self.auth.subscribe();
        let mut categories_rx = self.categories.subscribe();
        let mut tags_rx = self.tags.subscribe();
        let mut products_rx = self.products.subscribe();
        let mut orders_rx = self.orders.subscribe();
        let mut users_rx = self.users.subscribe();
        let mut roles_rx = self.roles.subscribe();

        loop {
            let changed = tokio::select! {
                r = auth_rx.changed() => r,
                r = categories_rx.changed() => r,
                r = tags_rx.changed() => r,
                r = products_rx.changed() => r,
                r = orders_rx.changed() => r,
                r = users_rx.changed() => r,
                r = roles_rx.changed() => r,
            };
            if changed.is_err() {
                debug!("state channel closed, stopping session persistence");
                break;
            }
            self.auth.persist_current();
        }
    }
}
