//! In-process credential store.
//!
//! Used for tests and for sessions that should not outlive the process.

use std::sync::RwLock;

use zeroize::Zeroize;

use super::{CredentialStore, Credentials, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryStore {
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(ref mut old) = *guard {
            old.zeroize();
        }
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(ref mut old) = *guard {
            old.zeroize();
        }
        *guard = None;
        Ok(())
    }
}
