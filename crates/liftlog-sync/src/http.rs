//! HTTP uploader for a document-style remote store.
//!
//! Each entry is written with `PUT {base_url}/entries/{id}` carrying the full
//! record, so a repeated upload replaces the same remote document. The entry
//! id doubles as the `Idempotency-Key`.

use std::time::Duration;

use liftlog_config::RemoteConfig;
use liftlog_core::entities::WorkoutLogEntry;

use crate::error::SyncError;
use crate::uploader::{RemoteUploader, UploadOutcome};

/// Header carrying the entry id on every upload.
pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// Longest response body kept in a rejection reason.
const MAX_REASON_BODY_CHARS: usize = 200;

/// Uploads entries to the configured remote endpoint.
pub struct HttpUploader {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpUploader {
    /// Build an uploader for `remote`, giving up on a request after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if no base URL is configured, or
    /// `SyncError::Http` if the HTTP client cannot be built.
    pub fn new(remote: &RemoteConfig, timeout: Duration) -> Result<Self, SyncError> {
        if !remote.is_configured() {
            return Err(liftlog_config::ConfigError::NotConfigured {
                section: "remote".to_string(),
            }
            .into());
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("liftlog/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: remote.trimmed_base_url().to_string(),
            auth_token: remote.bearer_token().map(str::to_string),
        })
    }

    fn entry_url(&self, id: &str) -> String {
        format!("{}/entries/{id}", self.base_url)
    }
}

impl RemoteUploader for HttpUploader {
    async fn upload(&self, entry: &WorkoutLogEntry) -> UploadOutcome {
        let mut request = self
            .http
            .put(self.entry_url(&entry.id))
            .header(IDEMPOTENCY_KEY, entry.id.as_str())
            .json(entry);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(resp) => classify_response(resp).await,
            Err(e) => classify_transport_error(&e),
        }
    }
}

/// Map an HTTP response to an outcome.
///
/// Any 2xx is an acceptance. Any other status means the remote store answered
/// and did not store the record.
async fn classify_response(resp: reqwest::Response) -> UploadOutcome {
    let status = resp.status();
    if status.is_success() {
        return UploadOutcome::Accepted;
    }
    let body = resp.text().await.unwrap_or_default();
    let body: String = body.trim().chars().take(MAX_REASON_BODY_CHARS).collect();
    if body.is_empty() {
        UploadOutcome::Rejected(format!("HTTP {}", status.as_u16()))
    } else {
        UploadOutcome::Rejected(format!("HTTP {}: {body}", status.as_u16()))
    }
}

/// Map a transport error to an outcome.
fn classify_transport_error(e: &reqwest::Error) -> UploadOutcome {
    if e.is_timeout() {
        UploadOutcome::Timeout
    } else {
        UploadOutcome::Unreachable(e.to_string())
    }
}
