use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

pub mod categories;
mod health;
pub mod middleware_auth;
pub mod tasks;
pub mod users;

pub use health::health;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), middleware_auth::require_auth);

    let category_router = Router::new()
        .route(
            "/",
            post(categories::routes::create)
                .merge(get(categories::routes::list).route_layer(auth.clone())),
        )
        .route(
            "/{id}",
            get(categories::routes::get).merge(
                put(categories::routes::update)
                    .delete(categories::routes::delete)
                    .route_layer(auth.clone()),
            ),
        );

    let task_router = Router::new()
        .route(
            "/",
            post(tasks::routes::create).merge(get(tasks::routes::list).route_layer(auth.clone())),
        )
        .route(
            "/{id}",
            get(tasks::routes::get).merge(
                put(tasks::routes::update)
                    .delete(tasks::routes::delete)
                    .route_layer(auth.clone()),
            ),
        )
        .route(
            "/category/{id}",
            get(tasks::routes::task_category).route_layer(auth),
        );

    let user_router = Router::new()
        .route("/register", post(users::routes::register))
        .route("/login", post(users::routes::login))
        .route("/task-category", get(users::routes::task_category));

    Router::new()
        .route("/health", get(health))
        .nest("/categories", category_router)
        .nest("/tasks", task_router)
        .nest("/users", user_router)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parses a path id, answering 400 with `message` when it is not a UUID.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(message))
}
