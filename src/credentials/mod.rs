//! Credential storage and the token manager built on top of it.
//!
//! The access/refresh token pair is persisted through a `CredentialStore`.
//! `TokenManager` is the single owner the rest of the crate talks to: it reads
//! tokens for header injection, persists reissued pairs, and clears everything
//! on logout, publishing each change to the `SessionStore`.

pub mod keychain;
pub mod memory;

pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::session::SessionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Keychain operation failed: {0}")]
    Keychain(String),
    #[error("Stored credentials are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::Keychain(err.to_string())
    }
}

/// Access/refresh token pair. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Durable key-value storage for the credential pair.
///
/// `save` and `clear` must be atomic: a concurrent `load` sees either the old
/// pair, the new pair, or nothing, never a mix.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, StoreError>;
    fn save(&self, credentials: &Credentials) -> Result<(), StoreError>;
    /// Idempotent.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Explicit owner of the stored credentials.
///
/// Built once at the composition root and shared by reference with the API
/// client. Store failures are logged and treated as "no credentials" on read.
pub struct TokenManager {
    store: Box<dyn CredentialStore>,
    session: Arc<SessionStore>,
}

impl TokenManager {
    /// Wrap `store`, syncing the session to whatever is already persisted.
    pub fn new(store: Box<dyn CredentialStore>, session: Arc<SessionStore>) -> Self {
        let manager = Self { store, session };
        if manager.is_authenticated() {
            manager.session.set_logged_in();
        }
        manager
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn load(&self) -> Option<Credentials> {
        match self.store.load() {
            Ok(credentials) => credentials,
            Err(e) => {
                log::warn!("Failed to read stored credentials: {}", e);
                None
            }
        }
    }

    /// Current access token, or an empty string when not logged in.
    pub fn access_token(&self) -> String {
        self.load()
            .map(|c| c.access_token.clone())
            .unwrap_or_default()
    }

    /// Current refresh token. `None` means a reissue is impossible.
    pub fn refresh_token(&self) -> Option<String> {
        self.load()
            .map(|c| c.refresh_token.clone())
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        !self.access_token().is_empty()
    }

    /// Persist a new pair and mark the session as logged in.
    pub fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        self.store.save(credentials)?;
        self.session.set_logged_in();
        Ok(())
    }

    /// Drop the stored pair and mark the session as logged out.
    ///
    /// The session is always notified, even if the store fails to clear.
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            log::error!("Failed to clear stored credentials: {}", e);
        }
        self.session.set_logged_out();
    }
}
