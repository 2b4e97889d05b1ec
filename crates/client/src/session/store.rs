//! Token persistence backends
//!
//! The bearer token is the only value the client persists. [`TokenStore`]
//! abstracts where it lives so tests can substitute an in-memory store.

use std::sync::Mutex;

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

/// Keychain service name used for the persisted session token.
const DEFAULT_SERVICE: &str = "mobistore";
/// Fixed account key under which the token is stored.
const TOKEN_ACCOUNT: &str = "admin_token";

/// Trait for session-token persistence
///
/// This trait allows dependency injection and testing with mock stores.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted token, if any
    ///
    /// An absent token is `Ok(None)`, not an error.
    async fn load(&self) -> Result<Option<String>, String>;

    /// Persist the token, replacing any previous value
    async fn save(&self, token: &str) -> Result<(), String>;

    /// Remove the persisted token (idempotent)
    async fn clear(&self) -> Result<(), String>;
}

/// Token store backed by the platform keychain
///
/// macOS Keychain, Windows Credential Manager, or Linux Secret Service,
/// keyed by a fixed service/account pair.
pub struct KeyringTokenStore {
    service: String,
    account: String,
}

impl KeyringTokenStore {
    /// Create a store under the default service/account pair.
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE)
    }

    /// Create a store under a custom keychain service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self { service: service.into(), account: TOKEN_ACCOUNT.to_string() }
    }

    fn entry(&self) -> Result<Entry, String> {
        Entry::new(&self.service, &self.account)
            .map_err(|e| format!("Failed to open keychain entry: {e}"))
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn load(&self) -> Result<Option<String>, String> {
        match self.entry()?.get_password() {
            Ok(token) => {
                debug!(service = %self.service, "Session token loaded from keychain");
                Ok(Some(token))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(format!("Failed to read session token: {e}")),
        }
    }

    async fn save(&self, token: &str) -> Result<(), String> {
        self.entry()?
            .set_password(token)
            .map_err(|e| format!("Failed to store session token: {e}"))?;
        debug!(service = %self.service, "Session token stored in keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, "Session token cleared from keychain");
                Ok(())
            }
            Err(e) => Err(format!("Failed to delete session token: {e}")),
        }
    }
}

/// In-memory token store
///
/// Avoids platform keychain prompts and persists data only for the lifetime
/// of the store, making it ideal for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }

    /// Snapshot of the currently stored token.
    pub fn current(&self) -> Option<String> {
        self.token.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, String> {
        Ok(self.current())
    }

    async fn save(&self, token: &str) -> Result<(), String> {
        self.token
            .lock()
            .map(|mut guard| *guard = Some(token.to_string()))
            .map_err(|_| "token store poisoned".to_string())
    }

    async fn clear(&self) -> Result<(), String> {
        self.token
            .lock()
            .map(|mut guard| *guard = None)
            .map_err(|_| "token store poisoned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.save("jwt-abc").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("jwt-abc"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn seeded_store_exposes_token() {
        let store = MemoryTokenStore::with_token("jwt-seed");
        assert_eq!(store.current().as_deref(), Some("jwt-seed"));
    }
}
