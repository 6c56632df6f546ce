//! API client module for the marketplace backend.
//!
//! Provides the HTTP client with bearer-token injection and automatic token
//! reissue, the response envelope decoder, and typed wrappers for every
//! endpoint family.

pub mod auth;
pub mod categories;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod members;
pub mod products;
pub mod request;
pub mod transport;
pub mod types;


pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
