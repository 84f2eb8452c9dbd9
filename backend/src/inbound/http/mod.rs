//! HTTP inbound adapter exposing the registry REST endpoints.

pub mod error;
pub mod extractors;
pub mod health;
pub mod state;
pub mod tasks;
pub mod users;

pub use error::ApiResult;
