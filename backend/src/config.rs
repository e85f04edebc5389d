//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from `DIRECTORY_GATEWAY_*` environment variables, CLI flags or
//! a configuration file. Every field is optional; accessors fall back to the
//! defaults below. Zero or non-finite tuning values, and retry multipliers
//! below one, are treated as missing.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{DEFAULT_SNAPSHOT_TTL, RetryPolicy};

/// Upstream employee endpoint used when none is configured.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8112/api/v1/employee";
/// Listener address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8111";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings that cannot be repaired by falling back to a default.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The upstream base URL does not parse.
    #[error("invalid upstream base url {value:?}: {source}")]
    InvalidUpstreamUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The bind address does not parse.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration for the gateway process.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY_GATEWAY")]
pub struct GatewaySettings {
    /// Base URL of the upstream employee endpoint.
    pub upstream_base_url: Option<String>,
    /// TCP connect timeout for upstream calls, in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// Whole-request timeout for upstream calls, in milliseconds.
    pub read_timeout_ms: Option<u64>,
    /// Total attempts per upstream call, including the first.
    pub retry_max_attempts: Option<u32>,
    /// Wait before the first retry, in milliseconds.
    pub retry_initial_delay_ms: Option<u64>,
    /// Growth factor between consecutive waits.
    pub retry_multiplier: Option<f64>,
    /// Cap on any single wait, in milliseconds.
    pub retry_max_delay_ms: Option<u64>,
    /// Retry hint returned once retries are exhausted, in seconds.
    pub retry_after_secs: Option<u64>,
    /// Snapshot freshness window, in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Address the HTTP listener binds to.
    pub bind_addr: Option<String>,
}

fn positive(value: Option<u64>) -> Option<u64> {
    value.filter(|raw| *raw > 0)
}

fn millis_or(value: Option<u64>, fallback: Duration) -> Duration {
    positive(value).map_or(fallback, Duration::from_millis)
}

fn secs_or(value: Option<u64>, fallback: Duration) -> Duration {
    positive(value).map_or(fallback, Duration::from_secs)
}

impl GatewaySettings {
    /// Parsed upstream base URL.
    pub fn upstream_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .upstream_base_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_UPSTREAM_BASE_URL);
        Url::parse(raw.trim()).map_err(|source| SettingsError::InvalidUpstreamUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self
            .bind_addr
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Upstream connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        millis_or(self.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Whole-request timeout for upstream calls.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        millis_or(self.read_timeout_ms, DEFAULT_READ_TIMEOUT)
    }

    /// Freshness window of the employee snapshot.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        secs_or(self.cache_ttl_secs, DEFAULT_SNAPSHOT_TTL)
    }

    /// Retry policy assembled from the retry settings.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_attempts: self
                .retry_max_attempts
                .filter(|attempts| *attempts > 0)
                .unwrap_or(defaults.max_attempts),
            initial_delay: millis_or(self.retry_initial_delay_ms, defaults.initial_delay),
            multiplier: self
                .retry_multiplier
                .filter(|multiplier| multiplier.is_finite() && *multiplier >= 1.0)
                .unwrap_or(defaults.multiplier),
            max_delay: millis_or(self.retry_max_delay_ms, defaults.max_delay),
            retry_after: secs_or(self.retry_after_secs, defaults.retry_after),
        }
    }
}
