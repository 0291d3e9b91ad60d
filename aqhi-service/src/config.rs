use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLLUTANT_URL: &str = "https://www.aqhi.gov.hk/js/data/past_24_pollutant.js";
pub const DEFAULT_FORECAST_URL: &str = "https://www.aqhi.gov.hk/js/data/forecast_aqhi.js";
pub const MAX_HTTP_RETRIES: u32 = 10;

pub struct Config {
    pub port: u16,
    pub pollutant_url: String,
    pub forecast_url: String,
    pub cache_ttl_seconds: u64,
    pub cache_dir: PathBuf,
    pub http_timeout: Option<Duration>,
    pub http_max_retries: u32,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            pollutant_url: env::var("AQHI_POLLUTANT_URL")
                .unwrap_or_else(|_| DEFAULT_POLLUTANT_URL.to_string()),
            forecast_url: env::var("AQHI_FORECAST_URL")
                .unwrap_or_else(|_| DEFAULT_FORECAST_URL.to_string()),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // 5 minutes default
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            http_timeout: env::var("HTTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            http_max_retries: env::var("HTTP_MAX_RETRIES")
                .ok()
                .and_then(|r| r.parse::<u32>().ok())
                .map(|r| r.min(MAX_HTTP_RETRIES))
                .unwrap_or(0),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        }
    }
}
