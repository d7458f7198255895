//! Shared test utilities for mist-reconcile integration tests.

use std::time::Duration;

use mist_client::{Session, SessionConfig};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ORG: &str = "o-1";
pub const TOKEN: &str = "test-token";

/// Mock Mist API with the credential probe already mounted.
pub struct MockMist {
    pub server: MockServer,
}

impl MockMist {
    /// Start a server that accepts the test token.
    pub async fn start() -> Self {
        Self::start_with_self_status(200).await
    }

    pub async fn start_with_self_status(status: u16) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/self"))
            .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "email": "ops@example.com"
            })))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            base_url: format!("{}/api/v1", self.server.uri()),
            timeout: Duration::from_secs(5),
            ..SessionConfig::new(TOKEN, ORG)
        }
    }

    pub async fn session(&self) -> Session {
        Session::connect(self.config())
            .await
            .expect("Failed to connect session")
    }

    /// Respond to `verb` on `/api/v1/{api_path}`, at most `times` times when given.
    pub async fn respond(&self, verb: &str, api_path: &str, status: u16, body: Value, times: Option<u64>) {
        let mock = Mock::given(method(verb))
            .and(path(format!("/api/v1/{api_path}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body));
        let mock = match times {
            Some(n) => mock.up_to_n_times(n),
            None => mock,
        };
        mock.mount(&self.server).await;
    }

    /// Method, path and JSON body of every non-GET request received.
    pub async fn mutations(&self) -> Vec<(String, String, Value)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() != "GET")
            .map(|r| {
                let body = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
                (r.method.to_string(), r.url.path().to_string(), body)
            })
            .collect()
    }
}
