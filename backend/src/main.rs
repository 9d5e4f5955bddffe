//! Backend entry-point: loads configuration, wires adapters and serves the API.

mod server;

use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hostelops::config::{AppSettings, BuildMode, RuntimeConfig};
use hostelops::inbound::http::health::HealthState;
use ortho_config::OrthoConfig;

use server::{ServerConfig, build_ports, create_server};

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

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(|e| {
        error!(error = %e, "failed to load settings");
        std::io::Error::other(e)
    })?;
    let config = RuntimeConfig::from_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(|e| {
            error!(error = %e, "invalid configuration");
            std::io::Error::other(e)
        })?;
    info!(
        bind_addr = %config.bind_addr,
        token_fingerprint = %config.token_fingerprint(),
        "starting HostelOps backend"
    );

    let ports = build_ports(&config).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(config.bind_addr, ports))?;
    server.await
}
