//! Response envelope decoding and status classification.
//!
//! Every backend response is wrapped as `{status, success, message, data}`.
//! Some endpoint families omit `status`; both shapes decode into `Envelope`.
//! Decoding here is pure: credential side effects live in the client.

use std::any::TypeId;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use super::transport::HttpResponse;

/// Envelope with the payload left undecoded, so `success`/`message` are
/// read whatever shape `data` has.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: Option<u16>,
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl Envelope {
    /// Convert to a result. `http_status` stands in when the body has no `status`.
    pub fn into_result<T: DeserializeOwned + 'static>(self, http_status: u16) -> ApiResult<T> {
        if !self.success {
            let status = self.status.unwrap_or(http_status);
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Request failed ({})", status));
            return Err(ApiError::Rejected {
                status: Some(status),
                message,
            });
        }

        // Unit callers only care that the call succeeded; any echoed data is dropped.
        if TypeId::of::<T>() == TypeId::of::<()>() {
            return empty_payload();
        }

        match self.data {
            Some(data) => serde_json::from_value(data).map_err(ApiError::from),
            None => empty_payload(),
        }
    }
}

/// Payload for a response without `data`: only types that accept `null`
/// (`()`, `Option<_>`) succeed.
fn empty_payload<T: DeserializeOwned>() -> ApiResult<T> {
    serde_json::from_value(Value::Null)
        .map_err(|_| ApiError::Parse("Response is missing its data payload".to_string()))
}

/// Decode `response` as an envelope carrying `T`.
///
/// Falls back to classifying by HTTP status when the body is not an envelope.
pub fn decode<T: DeserializeOwned + 'static>(response: &HttpResponse) -> ApiResult<T> {
    if response.is_success() && response.body.iter().all(u8::is_ascii_whitespace) {
        return empty_payload();
    }

    match serde_json::from_slice::<Envelope>(&response.body) {
        Ok(envelope) => envelope.into_result(response.status),
        Err(e) => Err(classify_status(response.status, e.to_string())),
    }
}

/// Map a raw HTTP status to an error when the body could not be decoded.
pub fn classify_status(status: u16, parse_error: String) -> ApiError {
    let reason = || {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status")
            .to_string()
    };

    match status {
        200..=299 => ApiError::Parse(parse_error),
        401 => ApiError::AuthRequired,
        400..=499 => ApiError::Client {
            status,
            message: reason(),
        },
        500..=599 => ApiError::Server {
            status,
            message: reason(),
        },
        _ => ApiError::UnexpectedStatus(status),
    }
}
