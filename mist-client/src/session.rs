//! Authenticated API session.
//!
//! A session is built once per invocation. Construction issues a single
//! `GET self` probe; a `401` aborts before any reconciliation starts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::transport::{ApiResponse, HttpTransport, Method, Transport};

/// Default Mist cloud endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.mist.com/api/v1";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an HTTP-backed session.
#[derive(Clone)]
pub struct SessionConfig {
    pub base_url: String,
    pub api_token: String,
    pub org_id: String,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(api_token: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            org_id: org_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("org_id", &self.org_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Immutable handle passed by reference into every resolver and reconciler.
pub struct Session {
    transport: Arc<dyn Transport>,
    org_id: String,
}

impl Session {
    /// Build an HTTP transport from `config` and validate the token.
    pub async fn connect(config: SessionConfig) -> Result<Self> {
        info!(base_url = %config.base_url, org_id = %config.org_id, "Connecting to Mist API");
        let transport = HttpTransport::new(&config.base_url, &config.api_token, config.timeout)?;
        Self::with_transport(Arc::new(transport), config.org_id).await
    }

    /// Validate credentials over an arbitrary transport.
    pub async fn with_transport(
        transport: Arc<dyn Transport>,
        org_id: impl Into<String>,
    ) -> Result<Self> {
        let response = transport.send(Method::Get, "self", None).await?;
        if response.status == 401 {
            return Err(ClientError::Unauthorized);
        }
        debug!(status = response.status, "Credential probe complete");

        Ok(Self {
            transport,
            org_id: org_id.into(),
        })
    }

    /// Organization every org-scoped path is built from.
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        self.transport.send(method, path, body).await
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::Post, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Method::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::Delete, path, None).await
    }
}
