use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{TokenRequest, TokenResponse},
        jwt::JwtKeys,
        services::is_valid_email,
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}

#[instrument(skip(state, payload))]
async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidArgument("invalid email".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&email)?;

    info!(email = %email, "token issued");
    Ok(Json(TokenResponse { token }))
}
