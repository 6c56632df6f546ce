//! Authentication endpoints: login, signup, email verification, logout and
//! session restore.
//!
//! Login persists the returned token pair through the client's
//! `TokenManager`; logout always clears it, even when the server is
//! unreachable.

use super::client::ApiClient;
use super::endpoints::Endpoint;
use super::error::{ApiError, ApiResult};
use super::request::RequestDescriptor;
use super::types::{EmailSendRequest, EmailVerifyRequest, LoginRequest, SignupRequest, TokenResponse};
use crate::credentials::Credentials;

/// Log in with email and password and store the returned credentials.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<()> {
    log::info!("Logging in");

    let descriptor = RequestDescriptor::new(Endpoint::Login).json(&LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })?;

    let tokens: TokenResponse = client.execute(&descriptor).await?;
    let refresh_token = tokens
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Parse("Login response has no refresh token".to_string()))?;
    if tokens.access_token.is_empty() {
        return Err(ApiError::Parse(
            "Login response has an empty access token".to_string(),
        ));
    }

    client
        .tokens()
        .save(&Credentials::new(tokens.access_token, refresh_token))?;

    log::info!("Login complete");
    Ok(())
}

pub async fn signup(client: &ApiClient, request: &SignupRequest) -> ApiResult<()> {
    let descriptor = RequestDescriptor::new(Endpoint::Signup).json(request)?;
    client.execute(&descriptor).await
}

/// Ask the backend to email a verification code to `email`.
pub async fn send_verification_email(client: &ApiClient, email: &str) -> ApiResult<()> {
    let descriptor = RequestDescriptor::new(Endpoint::EmailSend).json(&EmailSendRequest {
        email: email.to_string(),
    })?;
    client.execute(&descriptor).await
}

pub async fn verify_email(client: &ApiClient, email: &str, code: &str) -> ApiResult<()> {
    let descriptor = RequestDescriptor::new(Endpoint::EmailVerify).json(&EmailVerifyRequest {
        email: email.to_string(),
        code: code.to_string(),
    })?;
    client.execute(&descriptor).await
}

/// Log out: invalidate the session server-side (best effort), then clear
/// local credentials.
pub async fn logout(client: &ApiClient) -> ApiResult<()> {
    log::info!("Logging out");

    if client.tokens().is_authenticated() {
        let descriptor = RequestDescriptor::new(Endpoint::Logout);
        if let Err(e) = client.execute::<()>(&descriptor).await {
            log::warn!("Logout request failed (will continue local cleanup): {}", e);
        }
    }

    client.tokens().clear();

    log::info!("Logout complete");
    Ok(())
}

/// Try to restore a session from a stored refresh token, e.g. on startup.
///
/// Returns `true` if a fresh token pair was obtained and stored. Network
/// failures leave the stored credentials alone; a rejected refresh token
/// clears them.
pub async fn restore_session(client: &ApiClient) -> ApiResult<bool> {
    let Some(refresh_token) = client.tokens().refresh_token() else {
        log::info!("No stored refresh token, session restore skipped");
        return Ok(false);
    };

    match client.reissue(&refresh_token).await {
        Ok(credentials) => {
            client.tokens().save(&credentials)?;
            log::info!("Session restored");
            Ok(true)
        }
        Err(e) if e.is_network_error() => {
            log::warn!("Session restore failed (network error): {}", e);
            Err(e)
        }
        Err(e) => {
            log::info!("Stored refresh token rejected, clearing credentials: {}", e);
            client.tokens().clear();
            Ok(false)
        }
    }
}
