//! AdoptMe server entry-point.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use adoptme::config::{AppSettings, Environment};
use adoptme::inbound::http::health::HealthState;
use adoptme::inbound::http::session_config::fingerprint::KeyFingerprint;
use adoptme::inbound::http::session_config::{BuildMode, session_settings_from_env};
use adoptme::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server};

fn init_tracing(environment: Environment) {
    let builder = fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    let result = if environment.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

async fn connect(database_url: &str) -> io::Result<DbPool> {
    run_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|error| io::Error::other(error.to_string()))?;
    let environment = settings.environment().map_err(io::Error::other)?;
    init_tracing(environment);

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %KeyFingerprint::of(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(session, bind_addr, settings.uploads_dir().to_path_buf())
        .with_mock_seed(settings.mock_seed)
        .with_detailed_access_log(environment.is_production());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(database_url).await?);
    }

    info!(%environment, "starting AdoptMe");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    // Actix drains connections on the same signal; fail the probes first.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
        }
    });
    server.await
}
