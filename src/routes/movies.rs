use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, MoviePayload, SearchParams},
    routes::{AppState, DEFAULT_SEARCH_SIZE, MAX_SEARCH_SIZE},
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Movie {} not found", id))
}

/// Handler for creating a movie
pub async fn create(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(payload) = payload?;
    let movie = state.store.insert(payload.validate()?).await?;

    tracing::info!(request_id = %request_id, movie_id = movie.id, "Movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Handler for fetching one movie
pub async fn by_id(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    tracing::debug!(request_id = %request_id, movie_id = id, "Fetching movie");

    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Handler for replacing title and description of a movie
pub async fn edit(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let fields = payload.validate()?;
    let movie = state
        .store
        .save(Some(id), fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(request_id = %request_id, movie_id = id, "Movie updated");

    Ok(Json(movie))
}

/// Handler for deleting a movie; a missing id is reported as 404
pub async fn delete(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    if !state.store.delete_by_id(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(request_id = %request_id, movie_id = id, "Movie deleted");

    Ok(StatusCode::OK)
}

/// Handler for substring search over title and description
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<Vec<Movie>>> {
    let Query(params) = params?;
    if params.query.contains('\0') {
        return Err(AppError::InvalidInput(
            "query must not contain NUL characters".to_string(),
        ));
    }
    let size = params.size.unwrap_or(DEFAULT_SEARCH_SIZE);
    if size < 0 {
        return Err(AppError::InvalidInput(
            "size must not be negative".to_string(),
        ));
    }
    let size = size.min(MAX_SEARCH_SIZE);

    let movies = state.store.search(&params.query, size).await?;

    tracing::debug!(
        request_id = %request_id,
        query = %params.query,
        size,
        found = movies.len(),
        "Search completed"
    );

    Ok(Json(movies))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        db::MockMovieStore,
        routes::{create_router, with_id, AppState, BY_ID, HEALTH, SEARCH},
    };

    fn router_with(store: MockMovieStore) -> axum::Router {
        create_router(AppState::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_500() {
        let mut store = MockMovieStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Err(sqlx::Error::PoolTimedOut.into()));

        let response = router_with(store)
            .oneshot(
                Request::builder()
                    .uri(with_id(BY_ID, 1))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_search_clamps_size() {
        let mut store = MockMovieStore::new();
        store
            .expect_search()
            .withf(|query, limit| query.to_string() == "x" && *limit == 1000)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let response = router_with(store)
            .oneshot(
                Request::builder()
                    .uri(format!("{}?query=x&size=50000", SEARCH))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_uses_default_size() {
        let mut store = MockMovieStore::new();
        store
            .expect_search()
            .withf(|query, limit| query.is_empty() && *limit == 20)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let response = router_with(store)
            .oneshot(Request::builder().uri(SEARCH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_store() {
        let mut store = MockMovieStore::new();
        store
            .expect_ping()
            .returning(|| Err(sqlx::Error::PoolClosed.into()));

        let response = router_with(store)
            .oneshot(Request::builder().uri(HEALTH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
