//! HTTP client with bearer-token injection and single-flight token reissue.
//!
//! Every call goes through `execute_raw`: attach the stored access token when
//! the endpoint needs one, send, and on a 401 reissue the token pair once and
//! retry once. `execute` adds envelope decoding on top.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::endpoints::Endpoint;
use super::envelope;
use super::error::{ApiError, ApiResult};
use super::request::RequestDescriptor;
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use super::types::{ReissueRequest, TokenResponse};
use crate::config::ClientConfig;
use crate::credentials::{Credentials, TokenManager};

/// Marketplace API client.
///
/// Share one instance (behind `Arc`) across all tasks: the refresh lock only
/// deduplicates reissues among callers of the same client.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    tokens: Arc<TokenManager>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Create a client talking to `config.base_url` over reqwest.
    pub fn new(config: &ClientConfig, tokens: Arc<TokenManager>) -> Self {
        Self::with_transport(
            &config.base_url,
            Arc::new(ReqwestTransport::new(config)),
            tokens,
        )
    }

    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Execute a request and decode the envelope payload as `T`.
    ///
    /// Auth failures that survive the refresh path (a 401 status, or an
    /// envelope reporting status 401) clear the stored credentials.
    pub async fn execute<T: DeserializeOwned + 'static>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> ApiResult<T> {
        let response = self.execute_raw(descriptor).await?;
        let result = envelope::decode(&response);

        if let Err(ref e) = result {
            if e.is_auth_error() {
                log::warn!(
                    "{} {} rejected as unauthenticated, clearing credentials",
                    descriptor.endpoint.method(),
                    descriptor.endpoint.path()
                );
                self.tokens.clear();
            } else {
                log::debug!(
                    "{} {} failed: {}",
                    descriptor.endpoint.method(),
                    descriptor.endpoint.path(),
                    e
                );
            }
        }

        result
    }

    /// Execute a request, returning the raw response after at most one
    /// reissue-and-retry. Only network failures are errors.
    pub async fn execute_raw(&self, descriptor: &RequestDescriptor) -> ApiResult<HttpResponse> {
        let bearer = self.bearer_for(descriptor);
        let response = self.send(descriptor, bearer.clone()).await?;

        if response.status != 401 || !descriptor.requires_auth {
            return Ok(response);
        }

        match self.refresh_after_unauthorized(bearer.as_deref()).await {
            Some(access_token) => {
                log::info!(
                    "Retrying {} {} with reissued access token",
                    descriptor.endpoint.method(),
                    descriptor.endpoint.path()
                );
                self.send(descriptor, Some(access_token)).await
            }
            None => Ok(response),
        }
    }

    fn bearer_for(&self, descriptor: &RequestDescriptor) -> Option<String> {
        if !descriptor.requires_auth {
            return None;
        }
        let token = self.tokens.access_token();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        bearer: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let request = HttpRequest {
            method: descriptor.endpoint.method(),
            url: format!("{}{}", self.base_url, descriptor.endpoint.path()),
            query: descriptor.query.clone(),
            bearer,
            body: descriptor.body.clone(),
        };

        match self.transport.send(&request).await {
            Ok(response) => {
                log::debug!("{} {} -> {}", request.method, request.url, response.status);
                Ok(response)
            }
            Err(e) => {
                log::warn!("{} {} failed: {}", request.method, request.url, e);
                Err(e)
            }
        }
    }

    /// Recover from a 401 on a request that carried `sent_token`.
    ///
    /// Returns the access token to retry with, or `None` when the request
    /// should fail with its original response. Holds the refresh lock for the
    /// whole reissue so concurrent 401s produce a single reissue call.
    async fn refresh_after_unauthorized(&self, sent_token: Option<&str>) -> Option<String> {
        self.tokens.refresh_token()?;

        let _guard = self.refresh_lock.lock().await;

        // Another request may have reissued while we waited for the lock.
        let current = self.tokens.access_token();
        if !current.is_empty() && sent_token != Some(current.as_str()) {
            log::debug!("Access token already reissued by a concurrent request");
            return Some(current);
        }

        // ...or failed to, and logged us out.
        let refresh_token = self.tokens.refresh_token()?;

        match self.reissue(&refresh_token).await {
            Ok(credentials) => match self.tokens.save(&credentials) {
                Ok(()) => {
                    log::info!("Access token reissued");
                    Some(credentials.access_token.clone())
                }
                Err(e) => {
                    log::error!("Failed to persist reissued credentials: {}", e);
                    self.tokens.clear();
                    None
                }
            },
            Err(e) => {
                log::warn!("Token reissue failed, logging out: {}", e);
                self.tokens.clear();
                None
            }
        }
    }

    /// Exchange `refresh_token` for a new credential pair.
    ///
    /// Does not touch the stored credentials. If the backend does not rotate
    /// the refresh token, the old one is carried over.
    pub async fn reissue(&self, refresh_token: &str) -> ApiResult<Credentials> {
        let descriptor = RequestDescriptor::new(Endpoint::Reissue).json(&ReissueRequest {
            refresh_token: refresh_token.to_string(),
        })?;

        let response = self.send(&descriptor, None).await?;
        let tokens: TokenResponse = envelope::decode(&response)?;

        if tokens.access_token.is_empty() {
            return Err(ApiError::Parse(
                "Reissue response has an empty access token".to_string(),
            ));
        }

        let refresh = tokens
            .refresh_token
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| refresh_token.to_string());
        Ok(Credentials::new(tokens.access_token.clone(), refresh))
    }
}
