//! OS keychain credential store.
//!
//! Uses the `keyring` crate (apple-native on macOS, the platform secret
//! service elsewhere). The pair is stored as a single JSON entry so a save
//! replaces both tokens at once.

use keyring::Entry;

use super::{CredentialStore, Credentials, StoreError};

/// Fixed account name the credential pair is stored under.
const CREDENTIALS_ACCOUNT: &str = "session_credentials";

pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    /// Store entries under the given keychain service name.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, CREDENTIALS_ACCOUNT)?)
    }
}

impl CredentialStore for KeychainStore {
    /// Returns `None` if no entry exists (never logged in, or logged out).
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        match self.entry()?.get_password() {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let json = serde_json::to_string(credentials)?;
        self.entry()?.set_password(&json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // already gone
            Err(e) => Err(StoreError::from(e)),
        }
    }
}
