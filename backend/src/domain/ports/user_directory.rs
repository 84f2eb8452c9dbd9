//! Port for confirming that a user exists in the remote user registry.

use async_trait::async_trait;

use crate::domain::ExternalId;

use super::define_port_error;

define_port_error! {
    /// Reasons a remote existence check did not confirm the user.
    pub enum UserDirectoryError {
        /// The registry answered that no such user exists.
        NotFound => "user not found in directory",
        /// The registry answered with an unexpected status.
        Rejected { status: u16 } => "user directory rejected the lookup with status {status}",
        /// No answer arrived within the configured timeout.
        Timeout { message: String } => "user directory timed out: {message}",
        /// The request could not be delivered or the answer could not be read.
        Transport { message: String } => "user directory transport failed: {message}",
    }
}

/// Remote lookup of users by external identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Succeed only when the registry positively confirms the user exists.
    async fn ensure_user_exists(&self, user: &ExternalId) -> Result<(), UserDirectoryError>;
}

/// Directory that confirms every user. Used where no remote registry is
/// reachable, such as handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn ensure_user_exists(&self, _user: &ExternalId) -> Result<(), UserDirectoryError> {
        Ok(())
    }
}
