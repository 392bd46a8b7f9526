use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::model::{Sales, SalesId};

use super::error::ServerError;
use super::repository::SalesRepository;

pub const COLLECTION_PATH: &str = "/api/sales";

type Repo = State<Arc<SalesRepository>>;

pub fn build_router(repo: Arc<SalesRepository>) -> Router {
    Router::new()
        .route(
            COLLECTION_PATH,
            get(list_sales).post(create_sales).put(update_sales),
        )
        .route("/api/sales/{id}", get(get_sales).delete(delete_sales))
        .route("/health", get(health))
        .with_state(repo)
}

async fn list_sales(State(repo): Repo) -> Json<Vec<Sales>> {
    let rows = repo.find_all();
    tracing::debug!(count = rows.len(), "GET /api/sales");
    Json(rows)
}

async fn get_sales(State(repo): Repo, Path(id): Path<SalesId>) -> Result<Json<Sales>, ServerError> {
    repo.find_by_id(id)
        .map(Json)
        .ok_or(ServerError::NotFound { id })
}

async fn create_sales(
    State(repo): Repo,
    Json(sales): Json<Sales>,
) -> Result<impl IntoResponse, ServerError> {
    if let Some(id) = sales.id {
        return Err(ServerError::InvalidRequest(format!(
            "a new sales cannot already have an id ({})",
            id
        )));
    }
    let stored = repo.insert(sales);
    let id = stored.id.unwrap_or_default();
    tracing::info!(id, "Created sales");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{}/{}", COLLECTION_PATH, id))],
        Json(stored),
    ))
}

async fn update_sales(
    State(repo): Repo,
    Json(sales): Json<Sales>,
) -> Result<Json<Sales>, ServerError> {
    let Some(id) = sales.id else {
        return Err(ServerError::InvalidRequest(
            "cannot update a sales without an id".to_string(),
        ));
    };
    let stored = repo.replace(sales).ok_or(ServerError::NotFound { id })?;
    tracing::info!(id, "Updated sales");
    Ok(Json(stored))
}

async fn delete_sales(
    State(repo): Repo,
    Path(id): Path<SalesId>,
) -> Result<StatusCode, ServerError> {
    if !repo.delete_by_id(id) {
        return Err(ServerError::NotFound { id });
    }
    tracing::info!(id, "Deleted sales");
    Ok(StatusCode::NO_CONTENT)
}

async fn health(State(repo): Repo) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "count": repo.count(),
    }))
}
