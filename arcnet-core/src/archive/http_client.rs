//! HTTP transport for remote SRS archives, with retry and backoff.
//!
//! Retries cover transport-level hiccups only (timeouts, refused connections,
//! 429/502/503/504). Once the transport gives up, the archive reports the
//! failure and the caller decides what to do with it.

use backoff::{future::retry_notify, ExponentialBackoff};
use reqwest::{Client, Method, Response, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{ArcnetError, Result};

/// Configuration for the archive HTTP client.
#[derive(Debug, Clone)]
pub struct ArchiveHttpConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient errors.
    pub max_retries: u32,
    /// Initial retry interval.
    pub initial_interval: Duration,
    /// Maximum retry interval.
    pub max_interval: Duration,
}

/// HTTP client shared by remote archives.
pub struct ArchiveHttpClient {
    client: Client,
    config: ArchiveHttpConfig,
}

impl ArchiveHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ArchiveHttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("arcnet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ArcnetError::ArchiveError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Whether a resource exists, probed with `HEAD`.
    pub async fn exists(&self, url: &str) -> Result<bool> {
        self.send(Method::HEAD, url)
            .await
            .map(|response| response.is_some())
            .map_err(|reason| ArcnetError::ArchiveError(format!("Probe of {url} failed: {reason}")))
    }

    /// Fetch a resource body as text. A 404 here means the resource vanished
    /// after it was listed.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let download_error = |reason: String| ArcnetError::ReportDownload {
            locator: url.to_string(),
            reason,
        };

        let response = self
            .send(Method::GET, url)
            .await
            .map_err(download_error)?
            .ok_or_else(|| ArcnetError::ReportMissing {
                locator: url.to_string(),
            })?;

        response
            .text()
            .await
            .map_err(|e| download_error(format!("Failed to read body: {e}")))
    }

    /// Send a request with retry. `Ok(None)` means the server answered 404.
    async fn send(&self, method: Method, url: &str) -> std::result::Result<Option<Response>, String> {
        retry_notify(
            self.build_backoff(),
            || {
                let method = method.clone();
                async move { self.send_once(method, url).await }
            },
            |err: String, duration: Duration| {
                warn!(
                    error = %err,
                    retry_after_ms = duration.as_millis() as u64,
                    "Retry scheduled"
                );
            },
        )
        .await
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
    ) -> std::result::Result<Option<Response>, backoff::Error<String>> {
        let start = Instant::now();

        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| {
                let latency_ms = start.elapsed().as_millis();
                if is_transient_error(&e) {
                    warn!(error = %e, latency_ms = latency_ms as u64, "Transient error, will retry");
                    backoff::Error::transient(format!("Transient error (will retry): {e}"))
                } else {
                    warn!(error = %e, latency_ms = latency_ms as u64, "Permanent error, aborting");
                    backoff::Error::permanent(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis();
        debug!(status = %status, latency_ms = latency_ms as u64, "Received HTTP response");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let err = format!("Archive returned status: {status}");
            return if is_transient_status(status) {
                warn!(status = %status, latency_ms = latency_ms as u64, "Transient HTTP status, will retry");
                Err(backoff::Error::transient(err))
            } else {
                warn!(status = %status, latency_ms = latency_ms as u64, "Permanent HTTP error");
                Err(backoff::Error::permanent(err))
            };
        }

        Ok(Some(response))
    }

    fn build_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.config.initial_interval,
            max_interval: self.config.max_interval,
            max_elapsed_time: Some(self.config.timeout * self.config.max_retries),
            ..Default::default()
        }
    }
}

/// Check if a reqwest error is transient and should be retried.
pub fn is_transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Check if an HTTP status code indicates a transient error.
pub fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
            | StatusCode::BAD_GATEWAY
    )
}
