//! Transport boundary between the reconcilers and the Mist REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// HTTP methods used against the Mist API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Whether this method changes remote state.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Status and decoded body of one API call.
///
/// Empty bodies decode as `Value::Null`; bodies that are not valid JSON are
/// kept verbatim as `Value::String` so operators can still see them.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn decode(status: u16, text: String) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) => Value::String(text),
            }
        };
        Self { status, body }
    }
}

/// Something that can carry a request to the API and bring back a response.
///
/// Non-2xx statuses are not errors at this layer; callers decide which
/// statuses they expect.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse>;
}

/// Strip leading slashes so every path is relative to the base URL.
pub fn normalize_path(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// reqwest-backed transport with a fixed base URL and token header.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Token {}", api_token),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, normalize_path(path))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        let url = self.url(path);
        let mut request = self
            .client
            .request(method.into(), &url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let request_error = |source| ClientError::Request {
            method: method.to_string(),
            path: normalize_path(path).to_string(),
            source,
        };

        let response = request.send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(request_error)?;

        debug!(%method, path = normalize_path(path), status, "Mist API call");
        Ok(ApiResponse::decode(status, text))
    }
}
