//! Gateway entry-point: loads configuration, wires the directory stack and
//! serves the REST endpoints.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use directory_gateway::config::GatewaySettings;
use directory_gateway::inbound::http::health::HealthState;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
    info!(bind_addr = %config.bind_addr(), "starting directory gateway");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
