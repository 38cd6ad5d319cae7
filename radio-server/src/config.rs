//! Process configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::cache::{CacheConfig, DEFAULT_MAX_CAPACITY, DEFAULT_TTL};
use crate::directory::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DirectoryConfig};
use crate::service::ServiceConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub service: ServiceConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `8001` |
    /// | `RADIO_BROWSER_BASE_URL` | public de1 mirror |
    /// | `RADIO_BROWSER_TIMEOUT_SECS` | `30` |
    /// | `CACHE_TTL_SECS` | `3600` |
    /// | `CACHE_MAX_ENTRIES` | `100` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse_or(&lookup, "PORT", 8001)?;

        let base_url = lookup("RADIO_BROWSER_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "RADIO_BROWSER_BASE_URL must be an http(s) URL, got {base_url}"
            )));
        }
        let timeout_secs: u64 =
            parse_or(&lookup, "RADIO_BROWSER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        let ttl_secs: u64 = parse_or(&lookup, "CACHE_TTL_SECS", DEFAULT_TTL.as_secs())?;
        let max_capacity: u64 = parse_or(&lookup, "CACHE_MAX_ENTRIES", DEFAULT_MAX_CAPACITY)?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            service: ServiceConfig {
                directory: DirectoryConfig::new()
                    .with_base_url(base_url)
                    .with_timeout(timeout_secs),
                cache: CacheConfig::default()
                    .with_ttl(Duration::from_secs(ttl_secs))
                    .with_max_capacity(max_capacity),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Message(format!("{key} has an invalid value: {value}"))),
        None => Ok(default),
    }
}
