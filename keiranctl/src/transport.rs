//! Request encoding and the HTTP sender behind it.
//!
//! [`ApiRequest`] describes one request in protocol terms. A [`Transport`]
//! turns it into bytes on the wire and hands back the raw status and body;
//! interpreting that reply is left to [`crate::client`].

use async_trait::async_trait;
use futures_util::TryStreamExt;
use keiran_core::api::{
    ShortenRequest, FILE_FIELD, LONG_FIELD, SHORTEN_PATH, STATS_PATH, UPLOAD_PATH,
};
use keiran_core::{KeiranError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::progress::UploadProgress;

/// An opened file ready to be streamed as the multipart `file` part.
#[derive(Debug)]
pub struct UploadRequest {
    /// Open handle; dropped (and closed) once the request completes
    pub file: File,
    /// Base name announced as the part's filename
    pub file_name: String,
    /// Size declared for the part; `None` streams it without a length
    pub length: Option<u64>,
    /// Add the `long=true` form field
    pub keep_long: bool,
    /// Observer for bytes handed to the connection
    pub progress: UploadProgress,
}

/// One request to the sharing service.
#[derive(Debug)]
pub enum ApiRequest {
    /// `POST /upload`, multipart form
    Upload(UploadRequest),
    /// `POST /shorten`, JSON body
    Shorten(ShortenRequest),
    /// `GET /stats?format=json`
    Stats,
}

impl ApiRequest {
    /// Path (and query) relative to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ApiRequest::Upload(_) => UPLOAD_PATH,
            ApiRequest::Shorten(_) => SHORTEN_PATH,
            ApiRequest::Stats => STATS_PATH,
        }
    }
}

/// Status and body of a reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to deliver an [`ApiRequest`] and collect the reply.
///
/// Implementations report transport failures as [`KeiranError::Network`]
/// and must not inspect the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// [`Transport`] over HTTP(S) using reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`.
    ///
    /// `upload_timeout` bounds the whole upload request. Shorten and stats
    /// requests run with the transport defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, upload_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("keiran/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KeiranError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_timeout,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

/// Build the multipart form for an upload.
///
/// The file is streamed from disk in chunks; every chunk is reported to the
/// progress observer as it is handed to the connection.
pub fn upload_form(upload: UploadRequest) -> Form {
    let UploadRequest {
        file,
        file_name,
        length,
        keep_long,
        progress,
    } = upload;

    let stream =
        ReaderStream::new(file).inspect_ok(move |chunk| progress.advance(chunk.len() as u64));
    let body = Body::wrap_stream(stream);
    let part = match length {
        Some(length) => Part::stream_with_length(body, length),
        None => Part::stream(body),
    }
    .file_name(file_name);

    let mut form = Form::new();
    if keep_long {
        form = form.text(LONG_FIELD, "true");
    }
    form.part(FILE_FIELD, part)
}

fn network_error(url: &str, err: reqwest::Error) -> KeiranError {
    if err.is_timeout() {
        KeiranError::Network(format!("Request to {} timed out", url))
    } else {
        KeiranError::Network(format!("Error sending request to {}: {}", url, err))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(&request);

        let builder = match request {
            ApiRequest::Upload(upload) => {
                debug!(
                    url = %url,
                    file_name = %upload.file_name,
                    bytes = ?upload.length,
                    long = upload.keep_long,
                    "Sending upload"
                );
                self.client
                    .post(&url)
                    .timeout(self.upload_timeout)
                    .multipart(upload_form(upload))
            }
            ApiRequest::Shorten(body) => {
                debug!(url = %url, long = body.long, "Sending shorten request");
                self.client.post(&url).json(&body)
            }
            ApiRequest::Stats => {
                debug!(url = %url, "Fetching stats");
                self.client.get(&url)
            }
        };

        let response = builder.send().await.map_err(|e| network_error(&url, e))?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let body = response
            .text()
            .await
            .map_err(|e| network_error(&url, e))?;

        Ok(RawResponse { status, body })
    }
}
