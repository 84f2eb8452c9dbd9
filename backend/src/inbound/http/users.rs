//! User registry HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users          {"name":"Ada","email":"ada@example.com"}
//! GET    /api/v1/users
//! GET    /api/v1/users/{uuid}
//! PUT    /api/v1/users/{uuid}   {"name":"Ada","email":"ada@example.com"}
//! PATCH  /api/v1/users/{uuid}   {"email":"lovelace@example.com"}
//! DELETE /api/v1/users/{uuid}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ExternalId, User, UserInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ProblemBody;
use crate::inbound::http::state::UserHttpState;

/// User payload for create, replace, and patch.
///
/// For create and replace both fields are required; for patch any subset may
/// be sent. A `uuid` member, if present, is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl From<UserRequest> for UserInput {
    fn from(value: UserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let uuid = *user.external_id().as_uuid();
        let fields = user.into_fields();
        Self {
            uuid,
            name: fields.name,
            email: fields.email.into(),
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ProblemBody),
        (status = 409, description = "Email already registered", body = ProblemBody),
        (status = 503, description = "Store unavailable", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<UserHttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<UserHttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user by external identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "External user identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid identifier", body = ProblemBody),
        (status = 404, description = "User not found", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{uuid}")]
pub async fn get_user(
    state: web::Data<UserHttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .get_user(ExternalId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(user.into()))
}

/// Replace every mutable field of a user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "External user identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ProblemBody),
        (status = 404, description = "User not found", body = ProblemBody),
        (status = 409, description = "Email already registered", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/users/{uuid}")]
pub async fn replace_user(
    state: web::Data<UserHttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .replace_user(
            ExternalId::from_uuid(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(user.into()))
}

/// Update only the provided fields of a user.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "External user identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ProblemBody),
        (status = 404, description = "User not found", body = ProblemBody),
        (status = 409, description = "Email already registered", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{uuid}")]
pub async fn patch_user(
    state: web::Data<UserHttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .patch_user(
            ExternalId::from_uuid(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(user.into()))
}

/// Remove a user. Tasks assigned to it are left untouched.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "External user identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid identifier", body = ProblemBody),
        (status = 404, description = "User not found", body = ProblemBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{uuid}")]
pub async fn delete_user(
    state: web::Data<UserHttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .delete_user(ExternalId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every user handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(replace_user)
        .service(patch_user)
        .service(delete_user);
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
