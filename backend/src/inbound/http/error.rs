//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while turning every failure into
//! a problem description with a consistent shape and status code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Detail shown to clients in place of any internal failure text.
pub const INTERNAL_DETAIL: &str = "An unexpected error occurred";

/// Problem description returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemBody {
    /// Short classification, e.g. `Task Not Found`.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation.
    pub detail: String,
    /// Stable machine-readable code, e.g. `not_found`.
    #[schema(value_type = String)]
    pub code: ErrorCode,
    /// Structured supplementary details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
    /// Correlation identifier of the failing request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ProblemBody {
    /// Render `error`, hiding the detail and details of internal failures.
    pub fn from_error(error: &Error) -> Self {
        let status = status_for(error.code());
        let internal = matches!(error.code(), ErrorCode::InternalError);
        Self {
            title: error.title().to_owned(),
            status: status.as_u16(),
            detail: if internal {
                INTERNAL_DETAIL.to_owned()
            } else {
                error.detail().to_owned()
            },
            code: error.code(),
            details: if internal {
                None
            } else {
                error.details().cloned()
            },
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ProblemBody::from_error(self))
    }
}
