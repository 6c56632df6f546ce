//! Error taxonomy for API calls.
//!
//! Every failure mode of `ApiClient::execute` lands in one of these variants;
//! `Display` is the uniform message shown to users.

use thiserror::Error;

use crate::credentials::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response whose body is not a valid envelope for the expected payload.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// 401 that could not be recovered by a token reissue.
    #[error("Authentication required, please log in again")]
    AuthRequired,

    #[error("Request failed ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Envelope with `success: false`.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// The request itself could not be built (body encoding, bad multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Credential storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP (or envelope) status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthRequired => Some(401),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Rejected { status, .. } => *status,
            ApiError::UnexpectedStatus(status) => Some(*status),
            ApiError::Network(_)
            | ApiError::Parse(_)
            | ApiError::InvalidRequest(_)
            | ApiError::Storage(_) => None,
        }
    }

    /// True when the caller should send the user back to login.
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::Rejected {
                status: Some(400),
                message: "Nickname already taken".into()
            }
            .to_string(),
            "Nickname already taken"
        );
        assert_eq!(
            ApiError::Server {
                status: 503,
                message: "Service Unavailable".into()
            }
            .to_string(),
            "Server error (503): Service Unavailable"
        );
    }

    #[test]
    fn test_auth_classification() {
        assert!(ApiError::AuthRequired.is_auth_error());
        assert!(ApiError::Rejected {
            status: Some(401),
            message: "expired".into()
        }
        .is_auth_error());
        assert!(!ApiError::Client {
            status: 403,
            message: "forbidden".into()
        }
        .is_auth_error());
        assert!(!ApiError::Network("connection refused".into()).is_auth_error());
        assert!(ApiError::Network("timed out".into()).is_network_error());
    }
}
