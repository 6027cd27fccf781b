//! Board server entry-point: loads settings, prepares the store and serves the
//! REST API with health probes and OpenAPI docs.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use board::inbound::http::health::HealthState;
use board::outbound::persistence::{DbPool, run_pending_migrations};
use board::settings::BoardSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BoardSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;

    let config = ServerConfig::new(settings.bind_addr()?).with_hash_cost(settings.hash_cost());
    let config = match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                run_pending_migrations(pool_config.database_url())
                    .await
                    .map_err(io::Error::other)?;
            }
            let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
            config.with_db_pool(pool)
        }
        None => {
            warn!("BOARD_DATABASE_URL is not set; using the in-memory store");
            config
        }
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_metrics());

    info!(bind_addr = %config.bind_addr(), "starting board server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
