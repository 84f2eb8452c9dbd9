//! Shared HTTP adapter state.
//!
//! Handlers receive these through `actix_web::web::Data` and depend only on
//! the driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TaskRegistry, UserRegistry};

/// Dependencies of the user service handlers.
#[derive(Clone)]
pub struct UserHttpState {
    pub users: Arc<dyn UserRegistry>,
}

impl UserHttpState {
    pub fn new(users: Arc<dyn UserRegistry>) -> Self {
        Self { users }
    }
}

/// Dependencies of the task service handlers.
#[derive(Clone)]
pub struct TaskHttpState {
    pub tasks: Arc<dyn TaskRegistry>,
}

impl TaskHttpState {
    pub fn new(tasks: Arc<dyn TaskRegistry>) -> Self {
        Self { tasks }
    }
}
