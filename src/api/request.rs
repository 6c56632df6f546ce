//! Request descriptors: what to call, with which query and body.
//!
//! A descriptor is plain data so the client can rebuild the HTTP request for
//! the single retry after a token reissue.

use serde::Serialize;

use super::endpoints::Endpoint;
use super::error::{ApiError, ApiResult};

/// One part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub file_name: Option<String>,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl MultipartPart {
    pub fn file(name: &str, file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            mime: Some(mime.to_string()),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub requires_auth: bool,
}

impl RequestDescriptor {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
            body: None,
            requires_auth: endpoint.requires_auth(),
        }
    }

    /// Serialize `body` to JSON now so encoding errors surface before sending.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode body: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_inherits_auth_flag() {
        assert!(!RequestDescriptor::new(Endpoint::Login).requires_auth);
        assert!(RequestDescriptor::new(Endpoint::MemberInfo).requires_auth);
    }

    #[test]
    fn test_json_body_and_query() {
        #[derive(Serialize)]
        struct Body {
            nickname: &'static str,
        }

        let descriptor = RequestDescriptor::new(Endpoint::ProductList)
            .query("page", 2)
            .query("keyword", "westfalia")
            .json(&Body { nickname: "roamer" })
            .unwrap();

        assert_eq!(
            descriptor.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("keyword".to_string(), "westfalia".to_string()),
            ]
        );
        assert_eq!(
            descriptor.body,
            Some(RequestBody::Json(serde_json::json!({ "nickname": "roamer" })))
        );
    }
}
