//! Directory client error types.

/// Errors that can occur when talking to the upstream directory.
///
/// Any of these means the upstream is unavailable for this request; the
/// aggregation service never retries, it falls back.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed (connection, DNS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Configured `User-Agent` is not a valid header value
    #[error("invalid user agent: {0}")]
    InvalidUserAgent(#[from] reqwest::header::InvalidHeaderValue),

    /// Response body was not a JSON array
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
