//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use directory_gateway::config::{GatewaySettings, SettingsError};
use directory_gateway::domain::RetryPolicy;
use directory_gateway::outbound::directory::DirectoryHttpTimeouts;
use url::Url;

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: Url,
    pub(crate) timeouts: DirectoryHttpTimeouts,
    pub(crate) retry_policy: RetryPolicy,
    pub(crate) cache_ttl: Duration,
}

impl ServerConfig {
    /// Resolve loaded settings, applying defaults for missing values.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the upstream URL or bind address does
    /// not parse.
    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            upstream: settings.upstream_base_url()?,
            timeouts: DirectoryHttpTimeouts {
                connect: settings.connect_timeout(),
                read: settings.read_timeout(),
            },
            retry_policy: settings.retry_policy(),
            cache_ttl: settings.cache_ttl(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
