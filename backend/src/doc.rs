//! OpenAPI documents for the two services.
//!
//! Each service publishes only its own routes plus the shared health probes
//! and problem schema. Swagger UI serves them in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::error::ProblemBody;
use crate::inbound::http::tasks::{TaskRequest, TaskResponse};
use crate::inbound::http::users::{UserRequest, UserResponse};

/// OpenAPI document for the user service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Registry of users identified by external UUIDs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserRequest, UserResponse, ProblemBody)),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct UserApiDoc;

/// OpenAPI document for the task service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task service API",
        description = "Registry of tasks whose assignees are validated against the user service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::replace_task,
        crate::inbound::http::tasks::patch_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(TaskRequest, TaskResponse, ProblemBody)),
    tags(
        (name = "tasks", description = "Operations on task records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct TaskApiDoc;
