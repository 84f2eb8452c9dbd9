//! Task registry HTTP handlers.
//!
//! ```text
//! POST   /api/v1/tasks          {"assigneeUuid":"…","description":"Write report"}
//! GET    /api/v1/tasks
//! GET    /api/v1/tasks/{uuid}
//! PUT    /api/v1/tasks/{uuid}   {"description":"Write report"}
//! PATCH  /api/v1/tasks/{uuid}   {"assigneeUuid":"…"}
//! DELETE /api/v1/tasks/{uuid}
//! ```
//!
//! Writes naming an assignee are confirmed with the user service first; an
//! assignee that cannot be confirmed yields 400 and nothing is stored.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ExternalId, Task, TaskInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ProblemBody;
use crate::inbound::http::state::TaskHttpState;

/// Task payload for create, replace, and patch.
///
/// On replace an absent or `null` assignee clears it; on patch it leaves the
/// current assignee unchanged. A `uuid` member, if present, is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub assignee_uuid: Option<Uuid>,
    #[schema(example = "Write the quarterly report")]
    pub description: Option<String>,
}

impl From<TaskRequest> for TaskInput {
    fn from(value: TaskRequest) -> Self {
        Self {
            assignee: value.assignee_uuid.map(ExternalId::from_uuid),
            description: value.description,
        }
    }
}

/// Task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub uuid: Uuid,
    pub assignee_uuid: Option<Uuid>,
    pub description: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        let uuid = *task.external_id().as_uuid();
        let fields = task.into_fields();
        Self {
            uuid,
            assignee_uuid: fields.assignee.map(|id| *id.as_uuid()),
            description: fields.description,
        }
    }
}

/// Create a task, confirming its assignee when one is given.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid payload or assignee", body = ProblemBody),
        (status = 503, description = "Store unavailable", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<TaskHttpState>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<HttpResponse> {
    let task = state.tasks.create_task(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// List every task.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Tasks", body = [TaskResponse]),
        (status = 503, description = "Store unavailable", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(state: web::Data<TaskHttpState>) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(web::Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Fetch one task by external identifier.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{uuid}",
    params(("uuid" = Uuid, Path, description = "External task identifier")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 400, description = "Invalid identifier", body = ProblemBody),
        (status = 404, description = "Task not found", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{uuid}")]
pub async fn get_task(
    state: web::Data<TaskHttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<TaskResponse>> {
    let task = state
        .tasks
        .get_task(ExternalId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(task.into()))
}

/// Replace every mutable field of a task.
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{uuid}",
    params(("uuid" = Uuid, Path, description = "External task identifier")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task replaced", body = TaskResponse),
        (status = 400, description = "Invalid payload or assignee", body = ProblemBody),
        (status = 404, description = "Task not found", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "replaceTask"
)]
#[put("/tasks/{uuid}")]
pub async fn replace_task(
    state: web::Data<TaskHttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<web::Json<TaskResponse>> {
    let task = state
        .tasks
        .replace_task(
            ExternalId::from_uuid(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(task.into()))
}

/// Update only the provided fields of a task.
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{uuid}",
    params(("uuid" = Uuid, Path, description = "External task identifier")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Invalid payload or assignee", body = ProblemBody),
        (status = 404, description = "Task not found", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "patchTask"
)]
#[patch("/tasks/{uuid}")]
pub async fn patch_task(
    state: web::Data<TaskHttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<web::Json<TaskResponse>> {
    let task = state
        .tasks
        .patch_task(
            ExternalId::from_uuid(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(task.into()))
}

/// Remove a task.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{uuid}",
    params(("uuid" = Uuid, Path, description = "External task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Invalid identifier", body = ProblemBody),
        (status = 404, description = "Task not found", body = ProblemBody)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{uuid}")]
pub async fn delete_task(
    state: web::Data<TaskHttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .tasks
        .delete_task(ExternalId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every task handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_task)
        .service(list_tasks)
        .service(get_task)
        .service(replace_task)
        .service(patch_task)
        .service(delete_task);
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
