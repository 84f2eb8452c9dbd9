//! HTTP server configuration object and helpers.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use crate::domain::ports::UserDirectory;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating either service's HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) listener: Option<TcpListener>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that binds to `bind_addr` and keeps records
    /// in memory until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            listener: None,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the repository adapters.
    ///
    /// Without one the server falls back to in-memory repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Serve on an already bound listener instead of binding `bind_addr`.
    #[must_use]
    pub fn with_listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok())
            .unwrap_or(self.bind_addr)
    }

    #[must_use]
    pub fn has_db_pool(&self) -> bool {
        self.db_pool.is_some()
    }
}

/// Task service configuration: the common server settings plus the user
/// directory consulted for assignee validation.
pub struct TaskServerConfig {
    pub(crate) server: ServerConfig,
    pub(crate) directory: Arc<dyn UserDirectory>,
}

impl TaskServerConfig {
    #[must_use]
    pub fn new(server: ServerConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self { server, directory }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.server.bind_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_in_memory_repositories() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 8081)));
        assert!(!config.has_db_pool());
        assert_eq!(config.bind_addr().port(), 8081);
    }

    #[rstest]
    fn listener_address_takes_precedence() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        let config =
            ServerConfig::new(SocketAddr::from(([0, 0, 0, 0], 8082))).with_listener(listener);
        assert_eq!(config.bind_addr().port(), port);
    }
}
