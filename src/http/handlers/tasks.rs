//! Task CRUD handlers.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::Response,
    Extension,
};

use crate::error::ApiError;
use crate::http::dto::{ResponseStatus, TaskItem, TaskListResponse, TaskResponse};
use crate::http::middleware::AuthContext;
use crate::http::response::{json_response, ok_response};
use crate::http::server::AppState;
use crate::model::{TaskItemChanges, TodoItem, User};

fn parse_task_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::BadRequest("task id"))
}

/// Numeric `{id}` path segment. Any rejection, including a segment that is
/// not valid UTF-8, is a 400 with the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub u64);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(module = "todoitemshandler", error = %e, "Rejected task id");
                ApiError::BadRequest("task id")
            })?;
        parse_task_id(&raw).map(TaskId)
    }
}

/// Bodies are parsed regardless of `Content-Type`.
fn parse_changes(body: &[u8]) -> Result<TaskItemChanges, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(module = "todoitemshandler", error = %e, "Malformed task body");
        ApiError::BadRequest("task body")
    })
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let changes = parse_changes(&body)?;
    let title = changes.title.ok_or(ApiError::BadRequest("title"))?;

    let item = state
        .backend
        .create_task(&User::with_id(auth.user_id), &title)
        .await?;

    Ok(json_response(
        StatusCode::OK,
        &TaskResponse {
            status: ResponseStatus::Ok,
            task: TaskItem::try_from(item)?,
        },
    ))
}

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, ApiError> {
    let items = state
        .backend
        .get_task_list(&User::with_id(auth.user_id))
        .await?;

    let tasks = items
        .into_iter()
        .map(TaskItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json_response(
        StatusCode::OK,
        &TaskListResponse {
            status: ResponseStatus::Ok,
            tasks,
        },
    ))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    TaskId(task_id): TaskId,
) -> Result<Response, ApiError> {

    let item = state
        .backend
        .get_task_by_id(&User::with_id(auth.user_id), task_id)
        .await?;

    Ok(json_response(
        StatusCode::OK,
        &TaskResponse {
            status: ResponseStatus::Ok,
            task: TaskItem::try_from(item)?,
        },
    ))
}

/// PATCH /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    TaskId(task_id): TaskId,
    body: Bytes,
) -> Result<Response, ApiError> {
    let changes = parse_changes(&body)?;

    let item = changes.apply_to(TodoItem::reference(User::with_id(auth.user_id), task_id));
    state.backend.update_task_by_id(item).await?;

    Ok(ok_response())
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    TaskId(task_id): TaskId,
) -> Result<Response, ApiError> {

    state
        .backend
        .delete_task_by_id(&TodoItem::reference(User::with_id(auth.user_id), task_id))
        .await?;

    Ok(ok_response())
}
