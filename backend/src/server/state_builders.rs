//! Wiring of the directory stack behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use directory_gateway::domain::{EmployeeDirectoryService, RetryingDirectoryClient, SnapshotCache};
use directory_gateway::inbound::http::state::HttpState;
use directory_gateway::outbound::directory::HttpDirectorySource;

use super::ServerConfig;

/// Build the upstream adapter, retry decorator, snapshot cache and service.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let source = HttpDirectorySource::new(config.upstream.clone(), config.timeouts)
        .map_err(|e| std::io::Error::other(format!("directory client setup failed: {e}")))?;
    let client = RetryingDirectoryClient::new(Arc::new(source), config.retry_policy.clone());
    let cache = SnapshotCache::new(config.cache_ttl, Arc::new(DefaultClock));
    info!(
        upstream = %config.upstream,
        max_attempts = config.retry_policy.max_attempts,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "directory stack configured"
    );
    let service = EmployeeDirectoryService::new(client, cache);
    Ok(web::Data::new(HttpState::new(Arc::new(service))))
}
