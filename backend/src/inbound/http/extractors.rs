//! Extractor configuration turning framework parse failures into problem
//! descriptions.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// JSON body extractor that reports malformed payloads as problems.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!(error = %err, "rejecting malformed request body");
        Error::invalid_request(err.to_string())
            .with_title("Malformed Request Body")
            .into()
    })
}

/// Path extractor that reports unparsable identifiers as problems.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req| {
        debug!(error = %err, "rejecting invalid path identifier");
        Error::invalid_request(err.to_string())
            .with_title("Invalid Identifier")
            .into()
    })
}
