//! Scripted in-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mist_client::{ApiResponse, Method, Session, Transport, normalize_path};
use serde_json::{Value, json};

/// One request seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    calls: Mutex<Vec<Call>>,
}

/// Answers requests from per-route response queues.
///
/// Responses queued for the same route are returned in order; the last one
/// repeats forever. Unrouted requests get a `404`, except `GET self`
/// which defaults to `200`.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Inner>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.inner
            .routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse::new(status, body));
        self
    }

    pub async fn session(&self, org_id: &str) -> Session {
        Session::with_transport(Arc::new(self.clone()), org_id)
            .await
            .unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method.is_mutating())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> mist_client::Result<ApiResponse> {
        let path = normalize_path(path).to_string();
        self.inner.calls.lock().unwrap().push(Call {
            method,
            path: path.clone(),
            body: body.cloned(),
        });

        let mut routes = self.inner.routes.lock().unwrap();
        let response = match routes.get_mut(&(method, path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| {
            if method == Method::Get && path == "self" {
                ApiResponse::new(200, json!({"email": "ops@example.com"}))
            } else {
                ApiResponse::new(404, json!({"detail": format!("no route for {method} {path}")}))
            }
        }))
    }
}
