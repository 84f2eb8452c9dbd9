//! Reqwest-backed user directory adapter.
//!
//! Confirms a user exists by issuing `GET {base}/api/v1/users/{uuid}` against
//! the user service. Any 2xx answer confirms the user; the body is ignored.
//! There is no retry: one attempt per validation. The current trace
//! identifier is forwarded so both services log the same id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::{ExternalId, TRACE_ID_HEADER, TraceId};
use crate::domain::ports::{UserDirectory, UserDirectoryError};

/// User directory adapter that queries the user service over HTTP.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: Url,
}

impl HttpUserDirectory {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn user_url(&self, user: &ExternalId) -> Result<Url, UserDirectoryError> {
        let id = user.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                UserDirectoryError::transport(format!(
                    "user service url {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "v1", "users", id.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn ensure_user_exists(&self, user: &ExternalId) -> Result<(), UserDirectoryError> {
        let url = self.user_url(user)?;
        debug!(%url, "confirming user with user service");
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        let response = request.send().await.map_err(map_transport_error)?;

        map_status(response.status())
    }
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status(status: StatusCode) -> Result<(), UserDirectoryError> {
    match status {
        _ if status.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(UserDirectoryError::not_found()),
        _ => Err(UserDirectoryError::rejected(status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn directory(base: &str) -> HttpUserDirectory {
        HttpUserDirectory::new(
            Url::parse(base).expect("valid url"),
            Duration::from_secs(1),
        )
        .expect("client builds")
    }

    #[rstest]
    #[case::bare_host("http://localhost:8081")]
    #[case::trailing_slash("http://localhost:8081/")]
    fn builds_user_lookup_url(#[case] base: &str) {
        let id: ExternalId = "123e4567-e89b-12d3-a456-426614174000"
            .parse()
            .expect("valid uuid");
        let url = directory(base).user_url(&id).expect("url builds");
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/api/v1/users/123e4567-e89b-12d3-a456-426614174000"
        );
    }

    #[rstest]
    fn keeps_base_path_prefix() {
        let id = ExternalId::generate();
        let url = directory("http://gateway/users-svc")
            .user_url(&id)
            .expect("url builds");
        assert_eq!(url.path(), format!("/users-svc/api/v1/users/{id}"));
    }

    #[rstest]
    #[case::ok(StatusCode::OK, None)]
    #[case::no_content(StatusCode::NO_CONTENT, None)]
    #[case::not_found(StatusCode::NOT_FOUND, Some(UserDirectoryError::not_found()))]
    #[case::bad_request(StatusCode::BAD_REQUEST, Some(UserDirectoryError::rejected(400_u16)))]
    #[case::server_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(UserDirectoryError::rejected(500_u16))
    )]
    fn maps_statuses(#[case] status: StatusCode, #[case] expected: Option<UserDirectoryError>) {
        assert_eq!(map_status(status).err(), expected);
    }
}
