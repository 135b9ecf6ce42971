use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use super::service::TasksError;
use crate::AppState;

/// GET /tasks - list all tasks
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.tasks_service.list().await)
}

/// POST /tasks - create a task
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), TasksError> {
    let task = state
        .tasks_service
        .add(&request.title, &request.details)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id} - update title and details
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, TasksError> {
    let task = state
        .tasks_service
        .update(id, &request.title, &request.details)
        .await?;
    Ok(Json(task))
}

/// POST /tasks/{id}/toggle - flip the completed flag
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, TasksError> {
    let task = state.tasks_service.toggle(id).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id} - remove a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, TasksError> {
    state.tasks_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
