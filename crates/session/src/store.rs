//! Token storage capability.
//!
//! The session token is process-wide external state owned by whatever
//! logged the user in. Everything in this workspace reaches it through the
//! [`TokenStore`] trait so the backing store can be swapped: the OS keychain
//! in production ([`KeyringTokenStore`]), plain memory in tests and in
//! embedders that manage secure storage themselves ([`MemoryTokenStore`]).

use parking_lot::RwLock;

use lw_domain::config::CredentialsConfig;
use lw_domain::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Get/set/delete access to the stored session token.
///
/// The token is never mutated in place, only replaced wholesale or deleted.
pub trait TokenStore: Send + Sync {
    /// The currently stored token, if any. An absent token is `Ok(None)`,
    /// not an error.
    fn get(&self) -> Result<Option<String>>;

    /// Replace the stored token.
    fn set(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Deleting an absent token is a no-op.
    fn delete(&self) -> Result<()>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// OS keychain implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Token storage in the platform credential store (macOS Keychain, Windows
/// Credential Manager, Linux Secret Service) via the `keyring` crate.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    account: String,
}

impl KeyringTokenStore {
    pub fn new(cfg: &CredentialsConfig) -> Self {
        Self {
            service: cfg.service.clone(),
            account: cfg.account.clone(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::Auth(format!("keyring get_password failed: {e}"))),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| Error::Auth(format!("keyring set_password failed: {e}")))
    }

    fn delete(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Error::Auth(format!("keyring delete failed: {e}"))),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// In-memory token storage. Used by tests and by hosts that already keep
/// the token in their own secure storage and only lend it to this library.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that starts out holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.token.read().clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_owned());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.set("tok-1").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-1"));

        store.set("tok-2").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("tok-2"));

        store.delete().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn memory_store_delete_is_idempotent() {
        let store = MemoryTokenStore::with_token("tok");
        store.delete().unwrap();
        store.delete().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }
}
