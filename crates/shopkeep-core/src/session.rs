// ── Session state and persistence ──
//
// One authenticated identity per process. The store rehydrates
// synchronously at startup and the root aggregator re-persists it after
// every state change; `clear_session` is the one transition with an
// external side effect baked in (it deletes the persisted copy itself).

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

use shopkeep_api::types::ResourceId;

/// The persisted session payload.
///
/// `permissions` is the canonical name for the granted capability set.
/// Unknown fields are rejected, so a stale payload written under an
/// older schema rehydrates as logged-out instead of half-parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    pub token: Option<String>,
    pub id: Option<ResourceId>,
    pub username: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Capability gating helper for the presentation layer. Purely
    /// cosmetic — the backend enforces authorization itself.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }
}

/// Durable storage backend for the session.
///
/// Injected rather than hard-wired so tests (and embedders) can swap in
/// an in-memory backend. Implementations log their own failures; none
/// of these calls may propagate errors into store transitions.
pub trait SessionPersistence: Send + Sync {
    /// Read the persisted session. `None` for absent or malformed.
    fn load(&self) -> Option<Session>;

    fn save(&self, session: &Session);

    /// Remove the persisted copy entirely — a subsequent [`load`]
    /// returns `None`, not an empty session.
    ///
    /// [`load`]: SessionPersistence::load
    fn clear(&self);
}

/// In-memory persistence for tests and ephemeral embedders.
#[derive(Default)]
pub struct MemorySessionPersistence {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionPersistence for MemorySessionPersistence {
    fn load(&self) -> Option<Session> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, session: &Session) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// Holder of the current authentication identity.
pub struct SessionStore {
    state: watch::Sender<Session>,
    persistence: Arc<dyn SessionPersistence>,
}

impl SessionStore {
    /// Create the store, rehydrating synchronously from persistence.
    /// Absent or malformed storage seeds a logged-out session.
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        let initial = persistence.load().unwrap_or_default();
        let (state, _) = watch::channel(initial);
        Self { state, persistence }
    }

    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The bearer token resource stores attach to every request.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    /// Replace all fields atomically from a login response.
    pub fn set_session(&self, session: Session) {
        info!(username = session.username.as_deref(), "session established");
        self.state.send_replace(session);
    }

    /// Reset to logged-out and delete the persisted copy.
    pub fn clear_session(&self) {
        info!("session cleared");
        self.state.send_replace(Session::default());
        self.persistence.clear();
    }

    /// Write the current session through the persistence backend, or
    /// drop the persisted copy when logged out. Called by the root
    /// aggregator's subscriber after every state change.
    pub(crate) fn persist_current(&self) {
        let session = self.state.borrow().clone();
        if session == Session::default() {
            self.persistence.clear();
        } else {
            self.persistence.save(&session);
        }
    }
}
