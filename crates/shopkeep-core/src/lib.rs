//! Client-side resource synchronization layer for the shopkeep admin.
//!
//! Sits between `shopkeep-api` and whatever renders the dashboard:
//!
//! - **[`AppStore`]** — the root aggregator. Composes one store per
//!   resource type plus the session store into a single addressable
//!   tree, seeds the session from persisted storage at construction,
//!   and vends [`AppStore::persistence_task`] — the one subscriber that
//!   re-persists the session after every state change in the tree.
//!
//! - **Resource stores** ([`store`]) — one per resource type (users,
//!   roles/permissions, products, categories, tags, orders). Each holds
//!   an ordered item cache, an optional selection, a fixed per-operation
//!   in-flight map, and the most recent failure message. Every remote
//!   operation runs the same started → succeeded | failed lifecycle,
//!   applied as atomic transitions on a `tokio::sync::watch` channel.
//!
//! - **[`SessionStore`]** ([`session`]) — the authentication token,
//!   identity, and granted permission set, rehydrated synchronously at
//!   startup through an injectable [`SessionPersistence`] backend.
//!
//! Stores never panic on remote failure and never leak transport errors
//! past their boundary: callers see the operation's returned `Result`
//! and the normalized `last_error` message, nothing else.

pub mod error;
pub mod session;
pub mod store;

pub use error::CoreError;
pub use session::{MemorySessionPersistence, Session, SessionPersistence, SessionStore};
pub use store::AppStore;
pub use store::lifecycle::{Entity, OpFlags, ResourceState};
pub use store::{
    CategoryOp, CategoryState, CategoryStore, OrderOp, OrderState, OrderStore, ProductOp,
    ProductState, ProductStore, RoleOp, RoleState, RoleStore, TagOp, TagState, TagStore, UserOp,
    UserState, UserStore,
};
