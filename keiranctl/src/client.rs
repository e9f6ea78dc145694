//! Client for the sharing service.
//!
//! Turns an [`Operation`] into one request, sends it through a
//! [`Transport`], and decodes the reply into a typed [`Outcome`].

use keiran_core::api::{ServerResponse, ShortenRequest, StatsResponse};
use keiran_core::{upload_file_name, KeiranError, Operation, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;
use tracing::{debug, info};

use crate::progress::UploadProgress;
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport, UploadRequest};

/// Decoded result of a successful operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Uploaded(ServerResponse),
    Shortened(ServerResponse),
    Stats(StatsResponse),
}

/// Client for the sharing service.
///
/// Every call performs exactly one request. Nothing is retried: a failure
/// is returned to the caller as the matching [`KeiranError`] variant.
///
/// # Examples
///
/// ```no_run
/// use keiranctl::client::KeiranClient;
/// use keiranctl::transport::HttpTransport;
/// use std::time::Duration;
///
/// # async fn example() -> keiran_core::Result<()> {
/// let transport = HttpTransport::new("https://keiran.cc", Duration::from_secs(300))?;
/// let client = KeiranClient::new(transport, false);
///
/// let stats = client.stats().await?;
/// println!("{} files, {} urls", stats.files, stats.urls);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KeiranClient<T: Transport = HttpTransport> {
    transport: T,
    show_progress: bool,
}

impl<T: Transport> KeiranClient<T> {
    /// Create a client sending through `transport`.
    ///
    /// `show_progress` draws an upload progress bar on stderr.
    pub fn new(transport: T, show_progress: bool) -> Self {
        Self {
            transport,
            show_progress,
        }
    }

    /// Run one resolved operation.
    pub async fn execute(&self, operation: &Operation) -> Result<Outcome> {
        debug!(operation = operation.name(), long = operation.keep_long(), "Executing");

        match operation {
            Operation::Upload { path, keep_long } => {
                self.upload(path, *keep_long).await.map(Outcome::Uploaded)
            }
            Operation::Shorten { url, keep_long } => {
                self.shorten(url, *keep_long).await.map(Outcome::Shortened)
            }
            Operation::Stats => self.stats().await.map(Outcome::Stats),
        }
    }

    /// Upload the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or its size cannot be read ([`KeiranError::File`])
    /// - The request cannot be delivered ([`KeiranError::Network`])
    /// - The server rejects the upload ([`KeiranError::Server`])
    /// - The reply is not the expected JSON ([`KeiranError::Protocol`])
    pub async fn upload(&self, path: &Path, keep_long: bool) -> Result<ServerResponse> {
        let file_error = |source| KeiranError::File {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).await.map_err(file_error)?;
        let metadata = file.metadata().await.map_err(file_error)?;
        if metadata.is_dir() {
            return Err(file_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }

        let file_name = upload_file_name(path).ok_or_else(|| {
            file_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;

        let length = declared_length(&metadata);
        let progress = UploadProgress::new(metadata.len(), self.show_progress);
        info!(file_name = %file_name, bytes = metadata.len(), "Uploading file");
        if length.is_none() {
            debug!("File size not trustworthy, streaming without a length");
        }

        let request = UploadRequest {
            file,
            file_name,
            length,
            keep_long,
            progress: progress.clone(),
        };

        // The file handle moves into the request and is closed when it is dropped
        let response = match self.transport.send(ApiRequest::Upload(request)).await {
            Ok(response) => {
                progress.finish();
                response
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };
        debug!(sent = progress.position(), "Upload body sent");

        decode(response)
    }

    /// Shorten `url`.
    ///
    /// The `long` field is always sent, `false` included.
    ///
    /// # Errors
    ///
    /// Returns [`KeiranError::Network`], [`KeiranError::Server`] or
    /// [`KeiranError::Protocol`] as for [`Self::upload`].
    pub async fn shorten(&self, url: &str, keep_long: bool) -> Result<ServerResponse> {
        let request = ShortenRequest {
            url: url.to_string(),
            long: keep_long,
        };

        let response = self.transport.send(ApiRequest::Shorten(request)).await?;
        decode(response)
    }

    /// Fetch aggregate service statistics.
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = self.transport.send(ApiRequest::Stats).await?;
        decode(response)
    }
}

/// Size to announce for the upload body.
///
/// Only regular files with a non-zero size report what a read will return.
/// Special files (procfs, sysfs, pipes) claim 0 or nothing meaningful and are
/// sent without a length.
pub fn declared_length(metadata: &std::fs::Metadata) -> Option<u64> {
    (metadata.is_file() && metadata.len() > 0).then(|| metadata.len())
}

/// Interpret a raw reply.
///
/// A non-success status yields [`KeiranError::Server`] carrying the body
/// verbatim; error bodies are never parsed. A success body that does not
/// decode as `R` yields [`KeiranError::Protocol`].
pub fn decode<R: DeserializeOwned>(response: RawResponse) -> Result<R> {
    if !response.is_success() {
        return Err(KeiranError::Server {
            status: response.status,
            body: response.body,
        });
    }

    Ok(serde_json::from_str(&response.body)?)
}
