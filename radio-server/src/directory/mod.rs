//! Radio Browser directory client.
//!
//! This module provides an HTTP client for the Radio Browser API, the
//! upstream source of countries and stations.
//!
//! Key characteristics:
//! - Records are returned as untyped JSON so that one malformed entry can
//!   be skipped without failing the whole response
//! - Every request is bounded by a timeout; there are no retries

mod client;
mod error;
mod types;

use std::future::Future;

use serde_json::Value;

use crate::domain::CountryCode;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DirectoryClient, DirectoryConfig};
pub use error::DirectoryError;
pub use types::{RawCountry, RawStation};

/// Read operations against the upstream directory.
///
/// This abstraction allows the aggregation service to be tested with mock data.
pub trait StationDirectory: Send + Sync {
    /// List every country known to the directory.
    fn fetch_countries(&self) -> impl Future<Output = Result<Vec<Value>, DirectoryError>> + Send;

    /// List up to `limit` working stations for a country, most clicked first.
    fn fetch_stations(
        &self,
        country: CountryCode,
        limit: u16,
    ) -> impl Future<Output = Result<Vec<Value>, DirectoryError>> + Send;
}
