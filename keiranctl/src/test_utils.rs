//! Test utilities for CLI testing
//!
//! Provides a mock sharing server that records what it receives, and a fake
//! transport for exercising the client without any network.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use keiran_core::KeiranError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::transport::{ApiRequest, RawResponse, Transport};

/// Canned reply for one endpoint
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// One multipart upload as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// Content-Type header of the request
    pub content_type: String,
    /// Filename declared on the `file` part
    pub file_name: Option<String>,
    /// Bytes of the `file` part
    pub contents: Vec<u8>,
    /// Value of the `long` field, if sent
    pub long: Option<String>,
    /// Names of all parts, in order
    pub fields: Vec<String>,
}

/// One shorten request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedShorten {
    pub content_type: String,
    pub body: serde_json::Value,
}

/// Mock server state
#[derive(Debug, Clone)]
pub struct MockServerState {
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    shortens: Arc<Mutex<Vec<RecordedShorten>>>,
    stats_queries: Arc<Mutex<Vec<Option<String>>>>,
    upload_reply: MockReply,
    shorten_reply: MockReply,
    stats_reply: MockReply,
    /// Wait this long before every reply
    delay: Duration,
}

impl Default for MockServerState {
    fn default() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            shortens: Arc::new(Mutex::new(Vec::new())),
            stats_queries: Arc::new(Mutex::new(Vec::new())),
            upload_reply: MockReply::ok(
                r#"{"message":"File uploaded","filename":"report.pdf","id":"f00d","url":"https://k.cc/f/f00d"}"#,
            ),
            shorten_reply: MockReply::ok(r#"{"short_url":"https://k.cc/ab12"}"#),
            stats_reply: MockReply::ok(r#"{"files":12,"urls":34}"#),
            delay: Duration::ZERO,
        }
    }
}

impl MockServerState {
    /// Uploads received so far
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// Shorten requests received so far
    pub fn shortens(&self) -> Vec<RecordedShorten> {
        self.shortens.lock().unwrap().clone()
    }

    /// `format` query parameter of each stats request
    pub fn stats_queries(&self) -> Vec<Option<String>> {
        self.stats_queries.lock().unwrap().clone()
    }
}

/// Mock server implementation
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a new mock server
    pub fn new() -> Self {
        Self {
            state: MockServerState::default(),
            port: 0, // Will be assigned when server starts
        }
    }

    pub fn with_upload_reply(mut self, reply: MockReply) -> Self {
        self.state.upload_reply = reply;
        self
    }

    pub fn with_shorten_reply(mut self, reply: MockReply) -> Self {
        self.state.shorten_reply = reply;
        self
    }

    pub fn with_stats_reply(mut self, reply: MockReply) -> Self {
        self.state.stats_reply = reply;
        self
    }

    /// Stall every reply by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.state.delay = delay;
        self
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/upload", post(upload_handler))
            .route("/shorten", post(shorten_handler))
            .route("/stats", get(stats_handler))
            .with_state(self.state.clone())
    }
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn upload_handler(
    State(state): State<MockServerState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> MockReply {
    let mut upload = RecordedUpload {
        content_type: content_type(&headers),
        file_name: None,
        contents: Vec::new(),
        long: None,
        fields: Vec::new(),
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => return MockReply::new(400, format!("bad multipart body: {}", e)),
        };

        match name.as_str() {
            "file" => {
                upload.file_name = file_name;
                upload.contents = data.to_vec();
            }
            "long" => upload.long = Some(String::from_utf8_lossy(&data).into_owned()),
            _ => {}
        }
        upload.fields.push(name);
    }

    state.uploads.lock().unwrap().push(upload);
    tokio::time::sleep(state.delay).await;
    state.upload_reply.clone()
}

async fn shorten_handler(
    State(state): State<MockServerState>,
    headers: HeaderMap,
    body: String,
) -> MockReply {
    let body = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(e) => return MockReply::new(400, format!("bad json: {}", e)),
    };

    state.shortens.lock().unwrap().push(RecordedShorten {
        content_type: content_type(&headers),
        body,
    });
    tokio::time::sleep(state.delay).await;
    state.shorten_reply.clone()
}

async fn stats_handler(
    State(state): State<MockServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> MockReply {
    state
        .stats_queries
        .lock()
        .unwrap()
        .push(query.get("format").cloned());
    tokio::time::sleep(state.delay).await;
    state.stats_reply.clone()
}

/// What a [`FakeTransport`] saw of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentRequest {
    Upload {
        file_name: String,
        length: Option<u64>,
        keep_long: bool,
    },
    Shorten {
        url: String,
        long: bool,
    },
    Stats,
}

/// Transport that answers every request with one canned reply
#[derive(Debug, Clone)]
pub struct FakeTransport {
    reply: std::result::Result<RawResponse, String>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl FakeTransport {
    /// Reply with `status` and `body`
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Ok(RawResponse {
                status,
                body: body.into(),
            }),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every request with a network error
    pub fn unreachable() -> Self {
        Self {
            reply: Err("connection refused".to_string()),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests sent so far
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> keiran_core::Result<RawResponse> {
        let seen = match request {
            ApiRequest::Upload(upload) => {
                upload.progress.advance(upload.progress.total());
                SentRequest::Upload {
                    file_name: upload.file_name,
                    length: upload.length,
                    keep_long: upload.keep_long,
                }
            }
            ApiRequest::Shorten(body) => SentRequest::Shorten {
                url: body.url,
                long: body.long,
            },
            ApiRequest::Stats => SentRequest::Stats,
        };
        self.sent.lock().unwrap().push(seen);

        self.reply.clone().map_err(KeiranError::Network)
    }
}
