//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row models and
//! domain records; row structs (`models.rs`) and table definitions
//! (`schema.rs`) never leave this module. Connections come from a `bb8` pool
//! through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use taskmanager::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tasks")).await?;
//! let repo = DieselTaskRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, Schema, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
