//! Radio Browser HTTP client.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::domain::CountryCode;

use super::StationDirectory;
use super::error::DirectoryError;

/// Default base URL for the Radio Browser JSON API.
pub const DEFAULT_BASE_URL: &str = "https://de1.api.radio-browser.info/json";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest error body kept in `DirectoryError::Api`.
const MAX_ERROR_BODY: usize = 500;

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL for the API, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sent as `User-Agent`; Radio Browser asks clients to identify themselves
    pub user_agent: String,
}

impl DirectoryConfig {
    /// Create a config pointing at the public Radio Browser mirror.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("radio-server/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Radio Browser directory.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a new directory client.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and decode the body as a JSON array of untyped records.
    async fn get_records(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, DirectoryError> {
        debug!(url, "requesting directory");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
        })
    }
}

impl StationDirectory for DirectoryClient {
    async fn fetch_countries(&self) -> Result<Vec<Value>, DirectoryError> {
        let url = format!("{}/countries", self.base_url);
        self.get_records(&url, &[]).await
    }

    async fn fetch_stations(
        &self,
        country: CountryCode,
        limit: u16,
    ) -> Result<Vec<Value>, DirectoryError> {
        let url = format!(
            "{}/stations/bycountrycodeexact/{}",
            self.base_url,
            country.as_str()
        );
        self.get_records(
            &url,
            &[
                ("hidebroken", "true".to_string()),
                ("order", "clickcount".to_string()),
                ("reverse", "true".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}
