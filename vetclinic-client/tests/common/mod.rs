//! In-process mock of the clinic backend.
//!
//! Every request is recorded. Responses are canned per method and path
//! (relative to `/api`); anything without a canned response gets a 404.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::Response,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Notify};

/// One request as seen by the backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: String,
    gate: Option<Arc<Notify>>,
}

#[derive(Debug, Default)]
struct MockState {
    responses: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

/// Running mock backend.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });
        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// Answers `method path` with `status` and a JSON body.
    pub fn json(&self, method: Method, path: &str, status: u16, body: &Value) {
        self.insert(method, path, status, Some("application/json"), body.to_string(), None);
    }

    /// Answers `method path` with `status` and a plain-text body.
    pub fn text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, Some("text/plain"), body.to_string(), None);
    }

    /// Answers with a raw body and an explicit content type.
    pub fn raw(&self, method: Method, path: &str, status: u16, content_type: &'static str, body: &str) {
        self.insert(method, path, status, Some(content_type), body.to_string(), None);
    }

    /// Like [`MockBackend::json`], but holds the response until `gate` is notified.
    pub fn json_gated(&self, method: Method, path: &str, status: u16, body: &Value, gate: Arc<Notify>) {
        self.insert(method, path, status, Some("application/json"), body.to_string(), Some(gate));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }

    fn insert(
        &self,
        method: Method,
        path: &str,
        status: u16,
        content_type: Option<&'static str>,
        body: String,
        gate: Option<Arc<Notify>>,
    ) {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type,
            body,
            gate,
        };
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), canned);
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api")
        .unwrap_or(uri.path())
        .to_string();
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers,
        body,
    });

    let canned = state.responses.lock().unwrap().get(&(method, path)).cloned();
    let Some(canned) = canned else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("no canned response"))
            .unwrap();
    };
    if let Some(gate) = &canned.gate {
        gate.notified().await;
    }

    let mut response = Response::builder().status(canned.status);
    if let Some(content_type) = canned.content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response.body(Body::from(canned.body)).unwrap()
}
