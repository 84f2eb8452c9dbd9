//! Service settings loaded via OrthoConfig.
//!
//! Each service reads its own prefixed environment variables, command-line
//! flags, and optional configuration file. Absent values take the defaults
//! declared on each field.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_USER_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_TASK_BIND_ADDR: &str = "0.0.0.0:8082";
const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8081";
const DEFAULT_USER_SERVICE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// A configured value could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid user service url {value}: {message}")]
    UserServiceUrl { value: String, message: String },
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, SettingsError> {
    value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
        value: value.to_owned(),
        message: err.to_string(),
    })
}

/// Settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct UserServiceSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_USER_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL connection string. Records stay in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl UserServiceSettings {
    /// Parse the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(&self.bind_addr)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

/// Settings for the task service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASK_SERVICE")]
pub struct TaskServiceSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_TASK_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL connection string. Records stay in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
    /// Base URL of the user service consulted for assignee validation.
    #[ortho_config(default = String::from(DEFAULT_USER_SERVICE_URL))]
    pub user_service_url: String,
    /// Per-request timeout for assignee lookups, in milliseconds.
    #[ortho_config(default = DEFAULT_USER_SERVICE_TIMEOUT_MS)]
    pub user_service_timeout_ms: u64,
}

impl TaskServiceSettings {
    /// Parse the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(&self.bind_addr)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Parse the user service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UserServiceUrl`] when the value does not parse.
    pub fn user_service_url(&self) -> Result<Url, SettingsError> {
        Url::parse(&self.user_service_url).map_err(|err| SettingsError::UserServiceUrl {
            value: self.user_service_url.clone(),
            message: err.to_string(),
        })
    }

    pub fn user_service_timeout(&self) -> Duration {
        Duration::from_millis(self.user_service_timeout_ms)
    }
}
