//! Stand-in for the ElevenLabs API, used by the router tests.
//!
//! Answers every `POST /v1/text-to-speech/{voice}/stream` with a canned status
//! and body, and records what it was sent.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

struct MockState {
    status: StatusCode,
    body: Vec<u8>,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct MockProvider {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start(status: StatusCode, body: Vec<u8>) -> Self {
        let state = Arc::new(MockState {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/text-to-speech/:voice/stream", post(handle_stream))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.state.seen.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.state.seen.lock().unwrap().last().cloned()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle_stream(
    State(state): State<Arc<MockState>>,
    Path(voice): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.seen.lock().unwrap().push(SeenRequest {
        path: format!("/v1/text-to-speech/{}/stream", voice),
        api_key: header_str("xi-api-key"),
        accept: header_str(header::ACCEPT.as_str()),
        content_type: header_str(header::CONTENT_TYPE.as_str()),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    (state.status, state.body.clone())
}
