use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use super::dto::CategoryRequest;
use crate::error::{ApiError, SuccessResponse};
use crate::routes::middleware_auth::AuthUser;
use crate::routes::parse_id;
use crate::state::AppState;

/// Create a new category
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state.store.store_category(&payload).await.map_err(|e| {
        error!(error = %e, "failed to create category");
        ApiError::internal(e)
    })?;

    Ok(Json(SuccessResponse::new("add category success")))
}

/// Overwrite a category by id
pub async fn update(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(raw_id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "invalid Category ID")?;
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state.store.update_category(id, &payload).await.map_err(|e| {
        error!(error = %e, category_id = %id, "failed to update category");
        ApiError::internal(e)
    })?;

    info!(category_id = %id, user = %email, "category updated");
    Ok(Json(SuccessResponse::new("category update success")))
}

/// Delete a category; an unknown id still succeeds
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "Invalid Category ID")?;

    state.store.delete_category(id).await.map_err(|e| {
        error!(error = %e, category_id = %id, "failed to delete category");
        ApiError::internal(e)
    })?;

    info!(category_id = %id, user = %email, "category deleted");
    Ok(Json(SuccessResponse::new("category delete success")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id, "Invalid category ID")?;

    let category = state.store.get_category_by_id(id).await.map_err(|e| {
        error!(error = %e, category_id = %id, "failed to fetch category");
        ApiError::internal(e)
    })?;

    Ok(Json(category))
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.store.list_categories().await.map_err(|e| {
        error!(error = %e, "failed to list categories");
        ApiError::bad_request(e.to_string())
    })?;

    Ok(Json(categories))
}
