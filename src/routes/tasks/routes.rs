use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use super::dto::{CreateTask, UpdateTask};
use crate::error::{ApiError, SuccessResponse};
use crate::routes::middleware_auth::AuthUser;
use crate::routes::parse_id;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state.store.store_task(&body).await.map_err(|e| {
        error!(error = %e, "Error creating task");
        ApiError::internal(e)
    })?;

    Ok(Json(SuccessResponse::new("add task success")))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "invalid task ID")?;

    let mut task = state.store.get_task_by_id(id).await.map_err(|e| {
        error!(error = %e, task_id = %id, "Error loading task for update");
        ApiError::internal(e)
    })?;

    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    body.apply_to(&mut task);

    state.store.update_task(&task).await.map_err(|e| {
        error!(error = %e, task_id = %id, "Error updating task");
        ApiError::internal(e)
    })?;

    info!(task_id = %id, user = %email, "task updated");
    Ok(Json(SuccessResponse::new("update task success")))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "Invalid task ID")?;

    state.store.delete_task(id).await.map_err(|e| {
        error!(error = %e, task_id = %id, "Error deleting task");
        ApiError::internal(e)
    })?;

    info!(task_id = %id, user = %email, "task deleted");
    Ok(Json(SuccessResponse::new("delete task success")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "Invalid task ID")?;

    let task = state.store.get_task_by_id(id).await.map_err(|e| {
        error!(error = %e, task_id = %id, "Error fetching task");
        ApiError::internal(e)
    })?;

    Ok(Json(task))
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state.store.list_tasks().await.map_err(|e| {
        error!(error = %e, "Error listing tasks");
        ApiError::bad_request(e.to_string())
    })?;

    Ok(Json(tasks))
}

/// Task joined with its category name, looked up by task id
pub async fn task_category(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "Invalid task ID")?;

    let rows = state.store.get_task_category(id).await.map_err(|e| {
        error!(error = %e, task_id = %id, "Error joining task with category");
        ApiError::internal(e)
    })?;

    Ok(Json(rows))
}
