//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UserDirectory`]) are implemented by
//! outbound adapters. Driving ports (`*Registry`) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod task_registry;
mod task_repository;
mod user_directory;
mod user_registry;
mod user_repository;

#[cfg(test)]
pub use task_registry::MockTaskRegistry;
pub use task_registry::TaskRegistry;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::UserRegistry;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
