use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// HTTP client for upstream document fetches.
///
/// No timeout and no retries unless configured; a slow upstream holds the
/// calling task for as long as reqwest lets it.
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>, max_retries: u32) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            max_retries,
        }
    }

    /// Fetch a document body as text, retrying with exponential backoff when
    /// `max_retries` is non-zero
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &str) -> Result<String, AppError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.fetch_body(url).await {
                Ok(body) => {
                    info!(url = %url, attempt = attempt.saturating_add(1), bytes = body.len(), "Request successful");
                    return Ok(body);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let backoff = backoff_for(attempt);
                        warn!(
                            url = %url,
                            attempt = attempt.saturating_add(1),
                            backoff_ms = backoff.as_millis(),
                            "Request failed, retrying with exponential backoff"
                        );
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        error!(url = %url, attempts = self.max_retries.saturating_add(1), "Upstream request failed");
        Err(last_error.unwrap_or_else(|| AppError::internal("Unknown error after retries")))
    }

    async fn fetch_body(&self, url: &str) -> Result<String, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::timeout(format!("Request to {} timed out", url))
            } else {
                AppError::NetworkError(e)
            }
        })?;

        // The body is searched regardless of status; error pages simply fail extraction.
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned non-success status");
        }

        response.text().await.map_err(AppError::NetworkError)
    }
}

/// 100ms doubled per attempt, saturating for very large retry counts
fn backoff_for(attempt: u32) -> Duration {
    Duration::from_millis(2_u64.saturating_pow(attempt).saturating_mul(100))
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(None, 0)
    }
}
