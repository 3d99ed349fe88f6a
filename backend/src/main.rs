//! Service entry-point: loads settings, prepares the store and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use builders::bootstrap::AppSettings;
use builders::inbound::http::health::HealthState;
use builders::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use builders::outbound::security::{BuildMode, token_settings_from_env};

use server::{ServerConfig, create_server};

async fn prepare_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;
    info!(applied, "database schema up to date");
    DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .wrap_err("failed to build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = AppSettings::load_from_iter(args).map_err(|err| eyre!("{err}"))?;
    let bind_addr = settings.bind_addr()?;
    let admin = settings.admin_credentials()?;

    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    info!(fingerprint = %tokens.fingerprint(), issuer = %tokens.issuer, "token key loaded");

    let mut config = ServerConfig::new(bind_addr, tokens);
    if let Some((login, password)) = admin {
        config = config.with_admin(login, password);
    }
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = prepare_pool(url, settings.pool_max_size()).await?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database_url configured; using the in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state.clone(), config).await?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("HTTP server stopped with an error")
}
