//! HTTP transport seam.
//!
//! `ApiClient` builds transport-neutral `HttpRequest`s and hands them to a
//! `Transport`. Production uses `ReqwestTransport`; tests substitute a
//! scripted mock.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};

use super::error::{ApiError, ApiResult};
use super::request::{MultipartPart, RequestBody};
use crate::config::ClientConfig;

/// A fully resolved request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Access token to send as `Authorization: Bearer`, if any.
    pub bearer: Option<String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Value of the `Authorization` header this request will carry.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Only connectivity problems are errors; any HTTP
    /// status, including 4xx/5xx, is a successful `HttpResponse`.
    async fn send(&self, request: &HttpRequest) -> ApiResult<HttpResponse>;
}

/// `reqwest`-backed transport with fixed connect, read and total timeouts.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

fn build_form(parts: &[MultipartPart]) -> ApiResult<Form> {
    let mut form = Form::new();
    for part in parts {
        let mut p = Part::bytes(part.bytes.clone());
        if let Some(ref file_name) = part.file_name {
            p = p.file_name(file_name.clone());
        }
        if let Some(ref mime) = part.mime {
            p = p
                .mime_str(mime)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid part mime type: {}", e)))?;
        }
        form = form.part(part.name.clone(), p);
    }
    Ok(form)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            Some(RequestBody::Json(ref value)) => builder.json(value),
            Some(RequestBody::Multipart(ref parts)) => builder.multipart(build_form(parts)?),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_value() {
        let mut request = HttpRequest {
            method: Method::GET,
            url: "http://localhost/members/me".into(),
            query: vec![],
            bearer: None,
            body: None,
        };
        assert_eq!(request.authorization(), None);

        request.bearer = Some("abc".into());
        assert_eq!(request.authorization().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![MultipartPart::file("image", "a.png", "not a mime", vec![1])];
        assert!(matches!(
            build_form(&parts),
            Err(ApiError::InvalidRequest(_))
        ));

        let parts = vec![MultipartPart::file("image", "a.png", "image/png", vec![1])];
        assert!(build_form(&parts).is_ok());
    }

    #[tokio::test]
    async fn test_request_timeout_bounds_stalled_peer() {
        // Accepts the connection and then never reads or answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        });

        let config = ClientConfig {
            request_timeout: std::time::Duration::from_millis(500),
            ..ClientConfig::default()
        };
        let transport = ReqwestTransport::new(&config);
        let request = HttpRequest {
            method: Method::PUT,
            url: format!("http://{}/members/me/image", addr),
            query: vec![],
            bearer: None,
            body: Some(RequestBody::Multipart(vec![MultipartPart::file(
                "image",
                "me.png",
                "image/png",
                vec![0; 1024],
            )])),
        };

        let started = std::time::Instant::now();
        let err = transport.send(&request).await.unwrap_err();
        assert!(err.is_network_error());
        assert!(started.elapsed() < std::time::Duration::from_secs(10));

        server.abort();
    }
}
