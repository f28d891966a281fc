#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use svgsmith_core::generation::Generator;
use svgsmith_core::service::{GenerativeService, ServiceError, ServiceRequest, ServiceResponse};
use tokio::sync::Semaphore;
use tower::ServiceExt;

use svgsmith_api::config::ServerConfig;
use svgsmith_api::router::build_app_router;
use svgsmith_api::state::AppState;

pub const TEST_MODEL: &str = "test-model";

/// Upload limit used by [`test_config`]; small so oversize tests stay cheap.
pub const TEST_MAX_IMAGE_BYTES: usize = 1024;

/// A generative service that replays scripted replies in order.
///
/// With a gate, each call waits for one permit before replying, which keeps
/// the studio in its loading state until the test releases it.
pub struct ScriptedService {
    replies: Mutex<VecDeque<Result<String, ServiceError>>>,
    requests: Mutex<Vec<ServiceRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedService {
    pub fn replying(replies: impl IntoIterator<Item = Result<String, ServiceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// A service with no scripted replies; any call fails.
    pub fn empty() -> Self {
        Self::replying(Vec::<Result<String, ServiceError>>::new())
    }

    /// A service whose first call returns `svg` wrapped in chatter.
    pub fn svg(svg: &str) -> Self {
        Self::replying([Ok(format!("Here you go:\n{svg}\nEnjoy!"))])
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeService for ScriptedService {
    fn model(&self) -> &str {
        TEST_MODEL
    }

    async fn generate(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Other("no scripted reply".into())));
        reply.map(|text| ServiceResponse { text })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_image_bytes: TEST_MAX_IMAGE_BYTES,
    }
}

/// Build the full application router around a scripted service.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(service: Arc<ScriptedService>) -> Router {
    let config = test_config();
    let generator = Generator::new(service);
    let state = AppState::new(config.clone(), generator);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

/// POST a single-file multipart body.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response {
    const BOUNDARY: &str = "svgsmith-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll `GET /api/v1/studio` until the state has `status`, returning the
/// snapshot.
pub async fn wait_for_status(app: &Router, status: &str) -> Value {
    for _ in 0..200 {
        let snapshot = body_json(get(app.clone(), "/api/v1/studio").await).await["data"].clone();
        if snapshot["state"]["status"] == status {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("studio never reached status '{status}'");
}

/// Smallest payload that passes as a PNG upload.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";
