use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::MovieStore,
    error::AppResult,
    middleware::{make_span_with_request_id, request_id_middleware},
};

pub mod movies;

/// Health probe
pub const HEALTH: &str = "/health";
/// Collection root for movie records
pub const ROOT: &str = "/api/v1/movies";
/// `POST` a new movie
pub const CREATE: &str = ROOT;
/// `GET` or `DELETE` one movie
pub const BY_ID: &str = "/api/v1/movies/:id";
/// `PUT` new fields for one movie
pub const EDIT: &str = BY_ID;
/// `GET` with `query` and `size` parameters
pub const SEARCH: &str = "/api/v1/movies/search";

/// Default number of search results when `size` is omitted
pub const DEFAULT_SEARCH_SIZE: i64 = 20;
/// Largest accepted `size`; bigger values are clamped
pub const MAX_SEARCH_SIZE: i64 = 1000;

/// Fills the `:id` segment of a route template
pub fn with_id(template: &str, id: impl std::fmt::Display) -> String {
    template.replace(":id", &id.to_string())
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(health_check))
        .route(CREATE, post(movies::create))
        .route(SEARCH, get(movies::search))
        .route(
            BY_ID,
            get(movies::by_id).put(movies::edit).delete(movies::delete),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint, reports whether the store answers
async fn health_check(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Value>)> {
    state.store.ping().await?;
    Ok((StatusCode::OK, Json(json!({ "status": "healthy" }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id() {
        assert_eq!(with_id(BY_ID, 7), "/api/v1/movies/7");
        assert_eq!(with_id(EDIT, "123456789"), "/api/v1/movies/123456789");
        assert_eq!(with_id(SEARCH, 1), SEARCH);
    }
}
