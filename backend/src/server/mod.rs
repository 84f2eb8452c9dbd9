//! HTTP server assembly for the user and task services.
//!
//! Both services share the same middleware, extractor configuration, and
//! health probes; they differ only in the state and routes they register.

mod config;
mod state_builders;

pub use config::{ServerConfig, TaskServerConfig};

use state_builders::{build_task_state, build_user_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{TaskApiDoc, UserApiDoc};
use crate::inbound::http::extractors::{json_config, path_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{TaskHttpState, UserHttpState};
use crate::inbound::http::{tasks, users};

/// Service name reported by the user service's probes.
pub const USER_SERVICE_NAME: &str = "user-service";
/// Service name reported by the task service's probes.
pub const TASK_SERVICE_NAME: &str = "task-service";

/// Shared wiring: tracing, extractor error handlers, and health probes.
fn base_app(
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(ready)
        .service(live)
}

/// Build the user service application.
pub fn user_app(
    health_state: web::Data<HealthState>,
    state: web::Data<UserHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = base_app(health_state)
        .app_data(state)
        .service(web::scope("/api/v1").configure(users::configure));

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", UserApiDoc::openapi()));

    app
}

/// Build the task service application.
pub fn task_app(
    health_state: web::Data<HealthState>,
    state: web::Data<TaskHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = base_app(health_state)
        .app_data(state)
        .service(web::scope("/api/v1").configure(tasks::configure));

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", TaskApiDoc::openapi()));

    app
}

/// Start the user service and mark it ready once the listener is bound.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn create_user_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let state = build_user_state(&config);
    let addr = config.bind_addr();
    let persistent = config.has_db_pool();
    let ServerConfig {
        bind_addr,
        listener,
        db_pool: _,
    } = config;

    let http = HttpServer::new(move || user_app(server_health_state.clone(), state.clone()));
    let server = match listener {
        Some(listener) => http.listen(listener)?,
        None => http.bind(bind_addr)?,
    }
    .run();

    info!(%addr, persistent, "user service listening");
    health_state.mark_ready();
    Ok(server)
}

/// Start the task service and mark it ready once the listener is bound.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn create_task_server(
    health_state: web::Data<HealthState>,
    config: TaskServerConfig,
) -> std::io::Result<Server> {
    let TaskServerConfig { server, directory } = config;
    let server_health_state = health_state.clone();
    let state = build_task_state(&server, directory);
    let addr = server.bind_addr();
    let persistent = server.has_db_pool();

    let ServerConfig {
        bind_addr,
        listener,
        db_pool: _,
    } = server;

    let http = HttpServer::new(move || task_app(server_health_state.clone(), state.clone()));
    let server = match listener {
        Some(listener) => http.listen(listener)?,
        None => http.bind(bind_addr)?,
    }
    .run();

    info!(%addr, persistent, "task service listening");
    health_state.mark_ready();
    Ok(server)
}
