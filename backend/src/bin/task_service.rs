//! Task service entry-point: loads settings, prepares the store and the user
//! directory client, and serves the task registry.

use std::env;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use taskmanager::config::TaskServiceSettings;
use taskmanager::inbound::http::health::HealthState;
use taskmanager::outbound::persistence::{DbPool, PoolConfig, Schema, run_migrations};
use taskmanager::outbound::user_directory::HttpUserDirectory;
use taskmanager::server::{
    ServerConfig, TASK_SERVICE_NAME, TaskServerConfig, create_task_server,
};
use taskmanager::telemetry::init_tracing;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = TaskServiceSettings::load_from_iter(env::args_os())
        .wrap_err("failed to load task service settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    match settings.database_url() {
        Some(url) => {
            run_migrations(url, Schema::Tasks)
                .await
                .wrap_err("failed to migrate task database")?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections),
            )
            .await
            .wrap_err("failed to connect to task database")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("TASK_SERVICE_DATABASE_URL unset; tasks are kept in memory"),
    }

    let user_service_url = settings.user_service_url()?;
    let timeout = settings.user_service_timeout();
    info!(%user_service_url, ?timeout, "validating assignees against user service");
    let directory = HttpUserDirectory::new(user_service_url, timeout)
        .wrap_err("failed to build user service client")?;

    let health_state = web::Data::new(HealthState::new(TASK_SERVICE_NAME));
    create_task_server(
        health_state,
        TaskServerConfig::new(config, Arc::new(directory)),
    )?
    .await?;
    Ok(())
}
