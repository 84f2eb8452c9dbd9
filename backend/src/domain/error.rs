//! Transport-agnostic problem descriptions.
//!
//! Every failure that leaves a service is an [`Error`]: a stable
//! [`ErrorCode`], a short title classifying the failure, and a human-readable
//! detail. Inbound adapters decide how the payload and status are rendered.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The addressed record does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// A dependency of the service is temporarily unavailable.
    ServiceUnavailable,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Title used when no failure-specific title is supplied.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::InternalError => "Internal Server Error",
        }
    }
}

/// Problem description surfaced to clients.
///
/// Construction captures the current [`TraceId`] when one is in scope.
///
/// # Examples
/// ```
/// use taskmanager::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Task not found with uuid 42").with_title("Task Not Found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.title(), "Task Not Found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    title: String,
    detail: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Build an error with the code's default title.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            title: code.default_title().to_owned(),
            detail: detail.into(),
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Replace the title classifying the failure.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach an explicit trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Short classification of the failure.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Structured supplementary details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, detail)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, detail)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, detail)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, detail)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("x"), ErrorCode::InvalidRequest, "Bad Request")]
    #[case(Error::not_found("x"), ErrorCode::NotFound, "Not Found")]
    #[case(Error::conflict("x"), ErrorCode::Conflict, "Conflict")]
    #[case(
        Error::service_unavailable("x"),
        ErrorCode::ServiceUnavailable,
        "Service Unavailable"
    )]
    #[case(Error::internal("x"), ErrorCode::InternalError, "Internal Server Error")]
    fn constructors_set_code_and_default_title(
        #[case] error: Error,
        #[case] code: ErrorCode,
        #[case] title: &str,
    ) {
        assert_eq!(error.code(), code);
        assert_eq!(error.title(), title);
        assert_eq!(error.detail(), "x");
    }

    #[test]
    fn builders_override_title_and_attach_details() {
        let error = Error::invalid_request("bad")
            .with_title("Method Argument Not Valid")
            .with_details(json!({ "fields": [] }))
            .with_trace_id("abc");
        assert_eq!(error.title(), "Method Argument Not Valid");
        assert_eq!(error.details(), Some(&json!({ "fields": [] })));
        assert_eq!(error.trace_id(), Some("abc"));
        assert_eq!(error.to_string(), "Method Argument Not Valid: bad");
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
        assert!(Error::internal("boom").trace_id().is_none());
    }
}
