//! Backend entry-point: loads settings, prepares the store, serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::bootstrap::{ServerSettings, connect_backend, seed_board_on_startup};
use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server, drain, shutdown_signal};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let backend = connect_backend(&settings)
        .await
        .map_err(std::io::Error::other)?;
    if let Some(outcome) = seed_board_on_startup(settings.seed_on_startup, &backend)
        .await
        .map_err(std::io::Error::other)?
    {
        info!(
            users_created = outcome.users_created,
            post_created = outcome.post_created,
            "startup seeding finished"
        );
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr).with_permissive_cors(settings.cors_permissive);
    let server = create_server(health_state.clone(), backend.http_state(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(&health_state, handle).await,
            Err(e) => warn!(error = %e, "shutdown signal listener failed"),
        }
    });
    info!(%bind_addr, "board server listening");
    server.await
}
