use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    auth::services::is_valid_email, error::ApiError, newsletter::repo::Subscriber,
    state::AppState,
};

#[derive(Debug, Deserialize)]
struct SubscribeRequest {
    name: Option<String>,
    email: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/subscribers", get(list_subscribers))
}

#[instrument(skip(state, payload))]
async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Subscriber>), ApiError> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidArgument("invalid email".into()));
    }

    let subscriber = Subscriber::insert(&state.db, payload.name.as_deref(), &email).await?;
    info!(email = %subscriber.email, "newsletter subscription added");
    Ok((StatusCode::CREATED, Json(subscriber)))
}

#[instrument(skip(state))]
async fn list_subscribers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    let subscribers = Subscriber::list_all(&state.db).await?;
    Ok(Json(subscribers))
}
