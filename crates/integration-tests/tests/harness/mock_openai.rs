//! Mock `OpenAI` backend for integration tests
//!
//! Serves the chat completion and image generation endpoints with scripted
//! failures, plus a reference image route for the reachability probe.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Scripted behavior for a mock instance
#[derive(Default)]
pub struct MockBehavior {
    /// Chat completion text; five suggestions when unset
    pub completion: Option<String>,
    /// Fail every chat request with this status
    pub chat_failure: Option<StatusCode>,
    /// Fail the next image requests with these statuses, in order
    pub image_failures: Vec<StatusCode>,
    /// Delay before every image response
    pub image_delay: Option<Duration>,
}

/// Mock backend that returns predictable responses
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    completion: String,
    chat_failure: Option<StatusCode>,
    image_failures: Mutex<VecDeque<StatusCode>>,
    image_delay: Option<Duration>,
    chat_count: AtomicU32,
    image_count: AtomicU32,
    reference_count: AtomicU32,
    last_chat_request: Mutex<Option<Value>>,
}

const DEFAULT_COMPLETION: &str = "1. Textured crop with a low fade\n\
    2. Classic side part\n\
    3. Curly top with tapered sides\n\
    4. Shoulder-length layers\n\
    5. Slicked-back undercut";

impl MockOpenAi {
    /// Start a mock that answers every call successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockBehavior::default()).await
    }

    /// Start a mock with scripted behavior
    pub async fn start_with(behavior: MockBehavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            completion: behavior.completion.unwrap_or_else(|| DEFAULT_COMPLETION.to_owned()),
            chat_failure: behavior.chat_failure,
            image_failures: Mutex::new(behavior.image_failures.into()),
            image_delay: behavior.image_delay,
            chat_count: AtomicU32::new(0),
            image_count: AtomicU32::new(0),
            reference_count: AtomicU32::new(0),
            last_chat_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat))
            .route("/v1/images/generations", routing::post(handle_images))
            .route("/files/selfie.png", routing::get(handle_reference))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the `OpenAI` client, including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// A reference image URL that resolves
    pub fn reference_url(&self) -> String {
        format!("http://{}/files/selfie.png", self.addr)
    }

    /// A reference image URL that returns 404
    pub fn missing_reference_url(&self) -> String {
        format!("http://{}/files/missing.png", self.addr)
    }

    pub fn chat_count(&self) -> u32 {
        self.state.chat_count.load(Ordering::Relaxed)
    }

    pub fn image_count(&self) -> u32 {
        self.state.image_count.load(Ordering::Relaxed)
    }

    pub fn reference_count(&self) -> u32 {
        self.state.reference_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent chat completion request
    pub fn last_chat_request(&self) -> Option<Value> {
        self.state.last_chat_request.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-key")
}

fn error_response(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::TOO_MANY_REQUESTS => "Rate limit reached for requests",
        StatusCode::UNAUTHORIZED => "Incorrect API key provided",
        StatusCode::BAD_REQUEST => "Your request was rejected as a result of our safety system",
        _ => "The server had an error while processing your request",
    };

    (
        status,
        Json(json!({ "error": { "message": message, "type": "mock_error" } })),
    )
        .into_response()
}

async fn handle_chat(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.chat_count.fetch_add(1, Ordering::Relaxed);
    *state.last_chat_request.lock().unwrap() = Some(body);

    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED);
    }

    if let Some(status) = state.chat_failure {
        return error_response(status);
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": state.completion },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_images(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    let n = state.image_count.fetch_add(1, Ordering::Relaxed) + 1;

    if let Some(delay) = state.image_delay {
        tokio::time::sleep(delay).await;
    }

    if !authorized(&headers) {
        return error_response(StatusCode::UNAUTHORIZED);
    }

    let failure = state.image_failures.lock().unwrap().pop_front();
    if let Some(status) = failure {
        return error_response(status);
    }

    Json(json!({
        "created": 1_700_000_000,
        "data": [{ "url": format!("https://images.example.com/mock-{n}.png") }]
    }))
    .into_response()
}

async fn handle_reference(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.reference_count.fetch_add(1, Ordering::Relaxed);
    ([(header::CONTENT_TYPE, "image/png")], vec![0x89, b'P', b'N', b'G'])
}
