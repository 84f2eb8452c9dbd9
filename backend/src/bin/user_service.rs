//! User service entry-point: loads settings, prepares the store, and serves
//! the user registry.

use std::env;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::warn;

use taskmanager::config::UserServiceSettings;
use taskmanager::inbound::http::health::HealthState;
use taskmanager::outbound::persistence::{DbPool, PoolConfig, Schema, run_migrations};
use taskmanager::server::{ServerConfig, USER_SERVICE_NAME, create_user_server};
use taskmanager::telemetry::init_tracing;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = UserServiceSettings::load_from_iter(env::args_os())
        .wrap_err("failed to load user service settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    match settings.database_url() {
        Some(url) => {
            run_migrations(url, Schema::Users)
                .await
                .wrap_err("failed to migrate user database")?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections),
            )
            .await
            .wrap_err("failed to connect to user database")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("USER_SERVICE_DATABASE_URL unset; users are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new(USER_SERVICE_NAME));
    create_user_server(health_state, config)?.await?;
    Ok(())
}
