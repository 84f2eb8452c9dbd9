//! Tests for the user registry HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockUserRegistry;
use crate::domain::{Error, UserService};
use crate::inbound::http::extractors::{json_config, path_config};
use crate::outbound::memory::InMemoryUserRepository;

fn in_memory_state() -> UserHttpState {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    UserHttpState::new(Arc::new(service))
}

fn test_app(
    state: UserHttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .service(web::scope("/api/v1").configure(configure))
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_generated_uuid() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let client_uuid = "00000000-0000-0000-0000-000000000001";

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "uuid": client_uuid, "name": "Ada", "email": "ada@example.com" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: UserResponse = actix_test::read_body_json(response).await;
    assert_ne!(body.uuid.to_string(), client_uuid);
    assert_eq!(body.name, "Ada");
    assert_eq!(body.email, "ada@example.com");
}

#[rstest]
#[actix_web::test]
async fn invalid_payload_lists_every_field() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": " ", "email": "nope" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["title"], "Method Argument Not Valid");
    assert_eq!(
        body["detail"],
        "name must not be blank; email must be a well-formed email address"
    );
    assert_eq!(body["details"]["fields"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[case::not_json("{", "Malformed Request Body")]
#[case::wrong_type(r#"{"name": 42, "email": "ada@example.com"}"#, "Malformed Request Body")]
#[actix_web::test]
async fn malformed_body_is_bad_request(#[case] raw: &'static str, #[case] title: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload(raw)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["title"], title);
}

#[rstest]
#[actix_web::test]
async fn invalid_path_uuid_is_bad_request() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/not-a-uuid")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["title"], "Invalid Identifier");
}

#[rstest]
#[actix_web::test]
async fn missing_user_is_404_with_problem_body() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let missing = ExternalId::generate();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{missing}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["title"], "User Not Found");
    assert_eq!(body["detail"], format!("User not found with uuid {missing}"));
    assert_eq!(body["status"], 404);
}

#[rstest]
#[actix_web::test]
async fn patch_then_delete_round_trip() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let created: UserResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "email": "ada@example.com" }))
            .to_request(),
    )
    .await;

    let patched: UserResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/users/{}", created.uuid))
            .set_json(json!({ "email": "lovelace@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(patched.uuid, created.uuid);
    assert_eq!(patched.name, "Ada");
    assert_eq!(patched.email, "lovelace@example.com");

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{}", created.uuid))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(deleted).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn unhandled_failures_are_redacted() {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_list_users()
        .times(1)
        .return_once(|| Err(Error::internal("relation \"users\" does not exist")));
    let app = actix_test::init_service(test_app(UserHttpState::new(Arc::new(registry)))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["detail"], "An unexpected error occurred");
    assert!(body.get("details").is_none());
}
