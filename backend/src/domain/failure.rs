//! Registry failure taxonomy and its translation into problem descriptions.

use std::fmt;

use tracing::error;

use super::error::Error;
use super::identity::ExternalId;
use super::validation::FieldErrors;

/// Client-facing detail for store outages; the cause is only logged.
pub const STORE_UNAVAILABLE_DETAIL: &str = "The service is temporarily unavailable";

/// Resource kind a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Task,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Task => "Task",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a registry operation can fail with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryFailure {
    #[error("{kind} not found with uuid {external_id}")]
    NotFound {
        kind: ResourceKind,
        external_id: ExternalId,
    },
    #[error("Assigned user with uuid {assignee} could not be validated")]
    AssigneeInvalid { assignee: ExternalId },
    #[error("{0}")]
    InvalidPayload(FieldErrors),
    #[error("Email {email} is already registered")]
    DuplicateEmail { email: String },
    #[error("{kind} store unavailable: {message}")]
    StoreUnavailable { kind: ResourceKind, message: String },
    #[error("{kind} registry failure: {message}")]
    Unhandled { kind: ResourceKind, message: String },
}

impl RegistryFailure {
    pub fn not_found(kind: ResourceKind, external_id: ExternalId) -> Self {
        Self::NotFound { kind, external_id }
    }
}

impl From<RegistryFailure> for Error {
    fn from(failure: RegistryFailure) -> Self {
        let detail = failure.to_string();
        match failure {
            RegistryFailure::NotFound { kind, .. } => {
                Error::not_found(detail).with_title(format!("{kind} Not Found"))
            }
            RegistryFailure::AssigneeInvalid { .. } => {
                Error::invalid_request(detail).with_title("Assigned User Not Valid")
            }
            RegistryFailure::InvalidPayload(errors) => Error::invalid_request(detail)
                .with_title("Method Argument Not Valid")
                .with_details(errors.to_details()),
            RegistryFailure::DuplicateEmail { .. } => {
                Error::conflict(detail).with_title("Email Already Registered")
            }
            RegistryFailure::StoreUnavailable { .. } => {
                error!(%detail, "registry store unavailable");
                Error::service_unavailable(STORE_UNAVAILABLE_DETAIL)
            }
            RegistryFailure::Unhandled { .. } => {
                error!(%detail, "unhandled registry failure");
                Error::internal(detail)
            }
        }
    }
}
