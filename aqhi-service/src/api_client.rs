use crate::cache::FileCache;
use common::errors::AppError;
use common::http_client::HttpClient;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Fetches the AQHI JavaScript data files and pulls out the JSON array
/// literals assigned to known variables.
pub struct AqhiClient {
    http_client: HttpClient,
    cache: Arc<FileCache>,
    cache_ttl: Duration,
}

impl AqhiClient {
    pub fn new(http_client: HttpClient, cache: Arc<FileCache>, cache_ttl: Duration) -> Self {
        Self {
            http_client,
            cache,
            cache_ttl,
        }
    }

    /// Look up `var <variable> = [...];` in the document at `url`.
    ///
    /// A fresh cached copy short-circuits the network. On success the raw
    /// matched text, not a re-serialization, is written back to the cache.
    #[instrument(skip(self, extractor), fields(url = %url, variable = %extractor.variable()))]
    pub async fn fetch_and_extract(
        &self,
        url: &str,
        extractor: &VariableExtractor,
    ) -> Result<Vec<Value>, AppError> {
        let variable = extractor.variable();
        let cache_key = format!("{}{}", url, variable);

        if let Some(cached) = self.cache.get(&cache_key, self.cache_ttl).await {
            match serde_json::from_slice::<Vec<Value>>(&cached) {
                Ok(records) => {
                    info!(variable = %variable, "Cache hit");
                    return Ok(records);
                }
                Err(e) => warn!(variable = %variable, error = %e, "Cached entry unreadable, refetching"),
            }
        }

        info!(url = %url, variable = %variable, "Fetching AQHI document");
        let body = self.http_client.get_text(url).await?;

        let Some(raw) = extractor.extract(&body) else {
            error!(variable = %variable, body = %body, "Variable assignment not found in response body");
            return Err(AppError::extraction(variable));
        };

        let records: Vec<Value> = serde_json::from_str(raw).map_err(|e| {
            error!(variable = %variable, json = %raw, error = %e, "Failed to parse extracted JSON");
            AppError::ParseError(e)
        })?;

        self.cache.set(&cache_key, raw.as_bytes()).await;

        Ok(records)
    }
}

/// Locates the array literal in `var <variable> = [...];`. The match is
/// non-greedy and may span lines, so it ends at the first `];`.
pub struct VariableExtractor {
    variable: String,
    pattern: Regex,
}

impl VariableExtractor {
    pub fn new(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        let pattern = Regex::new(&format!(r"(?s)var {} = (\[.+?\]);", regex::escape(&variable)))
            .expect("escaped variable name always forms a valid pattern");
        Self { variable, pattern }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn extract<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
