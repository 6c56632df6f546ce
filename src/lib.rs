//! Client library for the campmarket camper-van marketplace backend.
//!
//! The composition root builds one `SessionStore`, one `TokenManager` over a
//! `CredentialStore`, and one `ApiClient`, then shares them:
//!
//! ```no_run
//! use std::sync::Arc;
//! use campmarket::{ApiClient, ClientConfig, KeychainStore, SessionStore, TokenManager};
//!
//! let config = ClientConfig::default();
//! let session = Arc::new(SessionStore::default());
//! let tokens = Arc::new(TokenManager::new(
//!     Box::new(KeychainStore::new(&config.keychain_service)),
//!     session.clone(),
//! ));
//! let client = Arc::new(ApiClient::new(&config, tokens));
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::ClientConfig;
pub use credentials::{CredentialStore, Credentials, KeychainStore, MemoryStore, TokenManager};
pub use session::{SessionState, SessionStore};
