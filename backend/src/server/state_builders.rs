//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{TaskRepository, UserDirectory, UserRepository};
use crate::domain::{TaskService, UserService};
use crate::inbound::http::state::{TaskHttpState, UserHttpState};
use crate::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DieselTaskRepository, DieselUserRepository};

use super::ServerConfig;

// Each builder picks the Diesel adapter when a pool is configured and the
// in-memory one otherwise.

pub(super) fn build_user_state(config: &ServerConfig) -> web::Data<UserHttpState> {
    let users: Arc<dyn UserRepository> = match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => Arc::new(InMemoryUserRepository::default()),
    };
    web::Data::new(UserHttpState::new(Arc::new(UserService::new(users))))
}

pub(super) fn build_task_state(
    config: &ServerConfig,
    directory: Arc<dyn UserDirectory>,
) -> web::Data<TaskHttpState> {
    let tasks: Arc<dyn TaskRepository> = match &config.db_pool {
        Some(pool) => Arc::new(DieselTaskRepository::new(pool.clone())),
        None => Arc::new(InMemoryTaskRepository::default()),
    };
    web::Data::new(TaskHttpState::new(Arc::new(TaskService::new(
        tasks, directory,
    ))))
}
