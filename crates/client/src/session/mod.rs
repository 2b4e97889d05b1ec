//! Session state
//!
//! The client's only mutable state: the current bearer token. The in-memory
//! copy is lazily hydrated from a [`TokenStore`] on first read, written
//! through on set, and removed from both places on clear. The token is only
//! ever replaced wholesale, so concurrent readers always observe a
//! consistent value.

mod store;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

pub use store::{KeyringTokenStore, MemoryTokenStore, TokenStore};

/// Process-wide session state owned by the client
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<String>>,
}

impl Session {
    /// Create a session over the given persistence backend.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store, token: RwLock::new(None) }
    }

    /// Current bearer token, loading from the store on first read
    ///
    /// Store failures are logged and treated as "no token": an unreadable
    /// backend must not fail an otherwise anonymous request.
    pub async fn token(&self) -> Option<String> {
        if let Some(token) = self.token.read().await.clone() {
            return Some(token);
        }

        let mut guard = self.token.write().await;
        if let Some(token) = guard.clone() {
            return Some(token);
        }
        match self.store.load().await {
            Ok(Some(token)) => {
                debug!("Session token hydrated from store");
                *guard = Some(token.clone());
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to load session token");
                None
            }
        }
    }

    /// Replace the token in memory and write it through to the store.
    pub async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
        if let Err(e) = self.store.save(token).await {
            warn!(error = %e, "Failed to persist session token");
        }
    }

    /// Clear the in-memory token and the persisted copy
    ///
    /// Always succeeds; a store failure is logged and the in-memory session
    /// is still reset.
    pub async fn clear(&self) {
        *self.token.write().await = None;
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted session token");
        }
    }

    /// Check whether a token is currently available.
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }
}
