//! In-process TTL cache for aggregated directory responses.
//!
//! The cache holds final, already-processed lists: a hit is returned
//! verbatim. There are two key families, the singleton country listing and
//! one station listing per (country, limit) pair requested.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;

use crate::domain::{Country, CountryCode, RadioStation};

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default maximum number of cached entries.
pub const DEFAULT_MAX_CAPACITY: u64 = 100;

/// Cache key. Renders as `countries` or `stations_{code}_{limit}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Countries,
    Stations { country: CountryCode, limit: u16 },
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Countries => f.write_str("countries"),
            CacheKey::Stations { country, limit } => write!(f, "stations_{country}_{limit}"),
        }
    }
}

/// Cached value; the variant always matches the key family.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Countries(Arc<Vec<Country>>),
    Stations(Arc<Vec<RadioStation>>),
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// TTL cache for aggregated responses.
///
/// Safe to share between tasks; concurrent inserts for the same key are
/// last-writer-wins.
pub struct ResponseCache {
    entries: MokaCache<CacheKey, CacheEntry>,
}

impl ResponseCache {
    /// Create a new cache with the given configuration.
    ///
    /// Over capacity, the least recently used entry goes first, which for
    /// entries that are never re-read means the oldest inserted.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { entries }
    }

    /// Get the cached country listing.
    pub async fn get_countries(&self) -> Option<Arc<Vec<Country>>> {
        match self.entries.get(&CacheKey::Countries).await {
            Some(CacheEntry::Countries(countries)) => Some(countries),
            _ => None,
        }
    }

    /// Store the country listing.
    pub async fn insert_countries(&self, countries: Arc<Vec<Country>>) {
        self.entries
            .insert(CacheKey::Countries, CacheEntry::Countries(countries))
            .await;
    }

    /// Get a cached station listing.
    pub async fn get_stations(
        &self,
        country: CountryCode,
        limit: u16,
    ) -> Option<Arc<Vec<RadioStation>>> {
        match self.entries.get(&CacheKey::Stations { country, limit }).await {
            Some(CacheEntry::Stations(stations)) => Some(stations),
            _ => None,
        }
    }

    /// Store a station listing.
    pub async fn insert_stations(
        &self,
        country: CountryCode,
        limit: u16,
        stations: Arc<Vec<RadioStation>>,
    ) {
        self.entries
            .insert(
                CacheKey::Stations { country, limit },
                CacheEntry::Stations(stations),
            )
            .await;
    }

    /// Whether a live entry exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get cache statistics (for monitoring).
    ///
    /// Approximate until pending maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply pending evictions so `entry_count` is exact.
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
