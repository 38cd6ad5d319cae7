//! Aggregation service: the single entry point for country and station
//! listings.
//!
//! Reads go through the [`ResponseCache`]; on a miss the upstream directory
//! is queried, the raw records are validated one by one, transformed and
//! stored. Both public operations are total: an unavailable upstream yields
//! the static fallback country list or an empty station list, never an
//! error.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheConfig, CacheKey, ResponseCache};
use crate::directory::{
    DirectoryClient, DirectoryConfig, DirectoryError, RawCountry, RawStation, StationDirectory,
};
use crate::domain::{Country, CountryCode, RadioStation, RecordShapeError};
use crate::transform::transform_station;

/// Countries with fewer stations than this are left out of the listing.
pub const MIN_COUNTRY_STATIONS: u32 = 10;

/// Maximum number of countries in the listing.
pub const MAX_COUNTRIES: usize = 50;

/// Station limit used when the caller does not give a usable one.
pub const DEFAULT_STATION_LIMIT: u16 = 50;

/// Largest station limit a caller may request.
pub const MAX_STATION_LIMIT: u16 = 100;

/// Configuration for [`RadioService::open`].
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub directory: DirectoryConfig,
    pub cache: CacheConfig,
}

/// Records that survived validation, and how many did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    pub kept: Vec<T>,
    pub skipped: usize,
}

/// Convert each raw record, skipping (and logging) the ones that fail.
///
/// `kind` names the record type in log lines.
pub fn fold_records<T>(
    records: Vec<Value>,
    kind: &'static str,
    mut convert: impl FnMut(Value) -> Result<T, RecordShapeError>,
) -> Batch<T> {
    let mut batch = Batch {
        kept: Vec::with_capacity(records.len()),
        skipped: 0,
    };

    for record in records {
        match convert(record) {
            Ok(item) => batch.kept.push(item),
            Err(e) => {
                warn!(kind, reason = %e, "skipping invalid record");
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// Decode and validate one element of the countries array.
pub fn country_from_record(record: Value) -> Result<Country, RecordShapeError> {
    let raw = RawCountry::decode(record)?;
    let code = CountryCode::parse_normalized(&raw.iso_3166_1)?;
    Ok(Country::new(code, raw.name, raw.stationcount))
}

/// Decode, validate and transform one element of the stations array.
pub fn station_from_record(record: Value) -> Result<RadioStation, RecordShapeError> {
    RawStation::decode(record).map(transform_station)
}

/// Keep countries with enough stations, busiest first, at most
/// [`MAX_COUNTRIES`].
pub fn rank_countries(mut countries: Vec<Country>) -> Vec<Country> {
    countries.retain(|c| c.station_count >= MIN_COUNTRY_STATIONS);
    countries.sort_by(|a, b| b.station_count.cmp(&a.station_count));
    countries.truncate(MAX_COUNTRIES);
    countries
}

/// Approximate listing served while the directory is unreachable.
pub fn fallback_countries() -> Vec<Country> {
    [
        ("US", "United States", 12000),
        ("GB", "United Kingdom", 8000),
        ("DE", "Germany", 6000),
        ("FR", "France", 5000),
        ("CA", "Canada", 4000),
        ("AU", "Australia", 3000),
        ("IT", "Italy", 2500),
        ("ES", "Spain", 2000),
        ("NL", "Netherlands", 1800),
        ("BR", "Brazil", 1500),
    ]
    .into_iter()
    .filter_map(|(code, name, count)| {
        CountryCode::parse(code)
            .ok()
            .map(|code| Country::new(code, name, count))
    })
    .collect()
}

/// Read-through caching front for the station directory.
///
/// Construct one per process and share it by reference (e.g. in an `Arc`).
pub struct RadioService<D = DirectoryClient> {
    directory: D,
    cache: ResponseCache,
}

impl RadioService<DirectoryClient> {
    /// Build the HTTP client and cache.
    pub fn open(config: ServiceConfig) -> Result<Self, DirectoryError> {
        let client = DirectoryClient::new(config.directory)?;
        info!(
            base_url = client.base_url(),
            ttl_secs = config.cache.ttl.as_secs(),
            max_entries = config.cache.max_capacity,
            "radio service opened"
        );
        Ok(Self::with_directory(client, &config.cache))
    }
}

impl<D: StationDirectory> RadioService<D> {
    /// Create a service over any directory implementation.
    pub fn with_directory(directory: D, cache_config: &CacheConfig) -> Self {
        Self {
            directory,
            cache: ResponseCache::new(cache_config),
        }
    }

    /// Countries with stations, busiest first.
    ///
    /// Falls back to [`fallback_countries`] (uncached) if the directory
    /// cannot be reached.
    pub async fn get_countries(&self) -> Arc<Vec<Country>> {
        if let Some(cached) = self.cache.get_countries().await {
            debug!(key = %CacheKey::Countries, "cache hit");
            return cached;
        }

        let records = match self.directory.fetch_countries().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "failed to fetch countries, serving fallback list");
                return Arc::new(fallback_countries());
            }
        };

        let batch = fold_records(records, "country", country_from_record);
        let countries = Arc::new(rank_countries(batch.kept));
        info!(
            countries = countries.len(),
            skipped = batch.skipped,
            "fetched countries"
        );

        self.cache.insert_countries(countries.clone()).await;
        countries
    }

    /// Up to `limit` stations for `country`, most clicked first.
    ///
    /// The caller is expected to have clamped `limit` to
    /// `1..=MAX_STATION_LIMIT`. Returns an empty list (uncached) if the
    /// directory cannot be reached.
    pub async fn get_stations_by_country(
        &self,
        country: CountryCode,
        limit: u16,
    ) -> Arc<Vec<RadioStation>> {
        if let Some(cached) = self.cache.get_stations(country, limit).await {
            let key = CacheKey::Stations { country, limit };
            debug!(%key, "cache hit");
            return cached;
        }

        let records = match self.directory.fetch_stations(country, limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(%country, error = %e, "failed to fetch stations");
                return Arc::new(Vec::new());
            }
        };

        let batch = fold_records(records, "station", station_from_record);
        let stations = Arc::new(batch.kept);
        info!(
            %country,
            limit,
            stations = stations.len(),
            skipped = batch.skipped,
            "fetched stations"
        );

        self.cache
            .insert_stations(country, limit, stations.clone())
            .await;
        stations
    }

    /// Access the underlying directory for operations that bypass cache.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Whether `key` currently has a live cache entry.
    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Shut the service down, releasing the directory's connection pool.
    pub fn close(self) {
        info!(cached = self.cache.entry_count(), "radio service closed");
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
