//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

use actix_web::{web, HttpServer};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{build_app, build_states, ServerConfig};

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

    let config = ServerConfig::parse();

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.db_max_connections),
    )
    .await
    .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;

    let (auth_state, recipe_state) = build_states(&pool);
    let auth_state = web::Data::new(auth_state);
    let recipe_state = web::Data::new(recipe_state);
    let health_state = web::Data::new(HealthState::new());

    // Clone for server factory so the readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            auth_state.clone(),
            recipe_state.clone(),
            server_health_state.clone(),
        )
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "server listening");
    server.run().await
}
