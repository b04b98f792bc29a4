use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    classes::repo::Class,
    error::ApiError,
    pagination::{Page, PageQuery, PageWindow},
    state::AppState,
};

#[derive(Debug, Deserialize)]
struct AddClassRequest {
    title: String,
    cover_img: Option<String>,
    description: Option<String>,
    trainers: Option<serde_json::Value>,
    trainer_details: Option<serde_json::Value>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/add-class", post(add_class))
        .route("/last-six-documents", get(latest_classes))
}

#[instrument(skip(state))]
async fn list_classes(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Page<Class>>, ApiError> {
    let window = PageWindow::from_query(&q)?;
    let (classes, total) = Class::page(&state.db, window, q.search.as_deref()).await?;
    Ok(Json(Page::new(classes, window, total)))
}

#[instrument(skip(state, payload))]
async fn add_class(
    State(state): State<AppState>,
    Json(payload): Json<AddClassRequest>,
) -> Result<(StatusCode, Json<Class>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::InvalidArgument("title must not be empty".into()));
    }

    let class = Class::insert(
        &state.db,
        payload.title.trim(),
        payload.cover_img.as_deref(),
        payload.description.as_deref(),
        payload.trainers,
        payload.trainer_details,
    )
    .await?;

    info!(class_id = %class.id, title = %class.title, "class added");
    Ok((StatusCode::CREATED, Json(class)))
}

#[instrument(skip(state))]
async fn latest_classes(State(state): State<AppState>) -> Result<Json<Vec<Class>>, ApiError> {
    let classes = Class::latest(&state.db, 6).await?;
    Ok(Json(classes))
}
