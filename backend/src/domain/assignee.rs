//! Write-time validation of task assignees against the user registry.

use std::sync::Arc;

use tracing::warn;

use super::identity::ExternalId;
use super::ports::{UserDirectory, UserDirectoryError};

/// The assignee could not be confirmed.
///
/// Not-found, rejected, timed-out, and unreachable lookups all collapse
/// into this one failure; the distinct cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("assigned user with uuid {assignee} could not be validated")]
pub struct AssigneeValidationFailure {
    pub assignee: ExternalId,
}

/// Confirms assignees with a [`UserDirectory`].
pub struct AssigneeValidator<D: ?Sized> {
    directory: Arc<D>,
}

impl<D: ?Sized> Clone for AssigneeValidator<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D> AssigneeValidator<D>
where
    D: UserDirectory + ?Sized,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Succeed trivially for no assignee; otherwise require the directory to
    /// confirm the user. No retries are attempted.
    pub async fn validate_assignee(
        &self,
        assignee: Option<ExternalId>,
    ) -> Result<(), AssigneeValidationFailure> {
        let Some(assignee) = assignee else {
            return Ok(());
        };
        self.directory
            .ensure_user_exists(&assignee)
            .await
            .map_err(|error| {
                let cause = match &error {
                    UserDirectoryError::NotFound => "not_found",
                    UserDirectoryError::Rejected { .. } => "rejected",
                    UserDirectoryError::Timeout { .. } => "timeout",
                    UserDirectoryError::Transport { .. } => "unreachable",
                };
                warn!(%assignee, cause, %error, "assignee validation failed");
                AssigneeValidationFailure { assignee }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserDirectory;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn absent_assignee_skips_remote_call() {
        let mut directory = MockUserDirectory::new();
        directory.expect_ensure_user_exists().times(0);
        let validator = AssigneeValidator::new(Arc::new(directory));
        validator
            .validate_assignee(None)
            .await
            .expect("no assignee is valid");
    }

    #[rstest]
    #[tokio::test]
    async fn confirmed_assignee_passes() {
        let assignee = ExternalId::generate();
        let mut directory = MockUserDirectory::new();
        directory
            .expect_ensure_user_exists()
            .withf(move |id| *id == assignee)
            .times(1)
            .return_once(|_| Ok(()));
        let validator = AssigneeValidator::new(Arc::new(directory));
        validator
            .validate_assignee(Some(assignee))
            .await
            .expect("confirmed");
    }

    #[rstest]
    #[case(UserDirectoryError::not_found())]
    #[case(UserDirectoryError::rejected(500_u16))]
    #[case(UserDirectoryError::timeout("5s elapsed"))]
    #[case(UserDirectoryError::transport("connection refused"))]
    #[tokio::test]
    async fn every_lookup_failure_collapses(#[case] failure: UserDirectoryError) {
        let assignee = ExternalId::generate();
        let mut directory = MockUserDirectory::new();
        directory
            .expect_ensure_user_exists()
            .times(1)
            .return_once(move |_| Err(failure));
        let validator = AssigneeValidator::new(Arc::new(directory));
        let err = validator
            .validate_assignee(Some(assignee))
            .await
            .expect_err("lookup failed");
        assert_eq!(err, AssigneeValidationFailure { assignee });
    }
}
