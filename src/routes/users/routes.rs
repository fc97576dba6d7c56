use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, warn};

use super::dto::{LoginRequest, RegistrationRequest};
use super::service;
use crate::error::{ApiError, SuccessResponse};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::bad_request("invalid data"))?;

    if payload.has_empty_field() {
        return Err(ApiError::bad_request("register data is empty"));
    }

    // The stored record is not echoed back; callers only get the acknowledgment.
    let user = service::register(state.store.as_ref(), payload)
        .await
        .map_err(|e| {
            error!(error = %e, "could not create user");
            ApiError::internal("error internal server")
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(SuccessResponse::new("register success"))))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::bad_request("invalid decode json"))?;

    if payload.has_empty_field() {
        return Err(ApiError::bad_request("email or password is empty"));
    }

    // Credential failures share the 500 answer with store failures.
    let token = service::login(state.store.as_ref(), &state.keys, &payload)
        .await
        .map_err(|e| {
            warn!(error = %e, email = %payload.email, "login failed");
            ApiError::internal("error internal server")
        })?;

    Ok((jar.add(token.cookie()), Json(SuccessResponse::new("login success"))))
}

pub async fn task_category(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = service::task_categories(state.store.as_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to list task categories");
            ApiError::internal("error internal server")
        })?;

    Ok(Json(rows))
}
