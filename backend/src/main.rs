//! Backend entry-point: loads settings, prepares the record store and serves
//! the REST API, health probes and (in debug builds) OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::eyre;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use salad_backend::inbound::http::health::HealthState;
use salad_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use salad_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations_blocking};
use salad_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?.to_owned();

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;

    if settings.migrate_on_start {
        let applied = run_migrations_blocking(database_url.clone()).await?;
        info!(count = applied.len(), "record store schema up to date");
    }
    let db_pool = DbPool::new(PoolConfig::new(database_url)).await?;

    let config = ServerConfig::new(session, bind_addr, db_pool);
    info!(bind_addr = %config.bind_addr(), "starting server");
    let server = create_server(web::Data::new(HealthState::new()), config)?;
    server.await?;
    Ok(())
}
