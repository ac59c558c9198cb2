//! Backend entry-point: loads settings, applies migrations and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloodbank::inbound::http::health::HealthState;
use bloodbank::inbound::http::token_config::{
    BuildMode, fingerprint::secret_fingerprint, token_settings_from_env,
};
use bloodbank::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerSettings, build_http_state, create_server};

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

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

    let settings = ServerSettings::load().map_err(startup_error)?;
    let bind_addr = settings.bind_addr().map_err(startup_error)?;
    let database_url = settings.database_url().map_err(startup_error)?.to_owned();
    let max_connections = settings.db_max_connections().map_err(startup_error)?;

    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(startup_error)?;
    if tokens.ephemeral {
        warn!("using an ephemeral token secret; tokens will not survive a restart");
    }
    info!(
        fingerprint = %secret_fingerprint(&tokens.secret),
        ttl_hours = tokens.ttl.num_hours(),
        "token signing configured"
    );

    if settings.run_migrations {
        run_pending_migrations(database_url.clone())
            .await
            .map_err(startup_error)?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(startup_error)?;

    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(&pool, &tokens);
    let server = create_server(health_state, http_state, bind_addr)?;
    info!(%bind_addr, "listening");
    server.await
}
