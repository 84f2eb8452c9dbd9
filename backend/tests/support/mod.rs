//! Shared helpers for running both services on ephemeral ports.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each test file pulls this module in with `mod support;`.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::web;
use reqwest::Url;

use taskmanager::inbound::http::health::HealthState;
use taskmanager::outbound::user_directory::HttpUserDirectory;
use taskmanager::server::{
    ServerConfig, TASK_SERVICE_NAME, TaskServerConfig, USER_SERVICE_NAME, create_task_server,
    create_user_server,
};

/// A service running in the background for the lifetime of a test.
pub struct RunningService {
    pub base_url: Url,
    handle: ServerHandle,
}

impl RunningService {
    /// Build an absolute URL for `path` on this service.
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("valid path")
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn ephemeral_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    (listener, addr)
}

fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/")).expect("valid base url")
}

/// Start an in-memory user service.
pub fn spawn_user_service() -> RunningService {
    let (listener, addr) = ephemeral_listener();
    let config = ServerConfig::new(addr).with_listener(listener);
    let health = web::Data::new(HealthState::new(USER_SERVICE_NAME));
    let server = create_user_server(health, config).expect("user service starts");
    let handle = server.handle();
    actix_rt::spawn(server);
    RunningService {
        base_url: base_url(addr),
        handle,
    }
}

/// Start an in-memory task service validating assignees against
/// `user_service_url`.
pub fn spawn_task_service(user_service_url: Url) -> RunningService {
    let directory = HttpUserDirectory::new(user_service_url, Duration::from_secs(2))
        .expect("directory client builds");
    let (listener, addr) = ephemeral_listener();
    let config = TaskServerConfig::new(
        ServerConfig::new(addr).with_listener(listener),
        Arc::new(directory),
    );
    let health = web::Data::new(HealthState::new(TASK_SERVICE_NAME));
    let server = create_task_server(health, config).expect("task service starts");
    let handle = server.handle();
    actix_rt::spawn(server);
    RunningService {
        base_url: base_url(addr),
        handle,
    }
}

/// An address nothing is listening on.
pub fn unreachable_url() -> Url {
    let (listener, addr) = ephemeral_listener();
    drop(listener);
    base_url(addr)
}
