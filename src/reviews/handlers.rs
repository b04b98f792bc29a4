use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, reviews::repo::Review, state::AppState};

#[derive(Debug, Deserialize)]
struct SubmitFeedbackRequest {
    user_email: Option<String>,
    name: Option<String>,
    image: Option<String>,
    rating: Option<i32>,
    feedback: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submit-feedback", post(submit_feedback))
        .route("/review/data", get(list_reviews))
}

#[instrument(skip(state, payload))]
async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let review = Review::insert(
        &state.db,
        payload.user_email.as_deref(),
        payload.name.as_deref(),
        payload.image.as_deref(),
        payload.rating,
        &payload.feedback,
    )
    .await?;

    info!(review_id = %review.id, "feedback submitted");
    Ok(Json(MessageResponse {
        message: "feedback submitted successfully".into(),
    }))
}

#[instrument(skip(state))]
async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = Review::list_all(&state.db).await?;
    Ok(Json(reviews))
}
