use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    bookings::repo::Booking,
    error::ApiError,
    newsletter::repo::Subscriber,
    state::AppState,
    trainers::repo::TrainerProfile,
};

#[derive(Debug, Deserialize)]
struct PaymentRequest {
    user_email: String,
    trainer_email: Option<String>,
    slot_name: Option<String>,
    package_name: Option<String>,
    price: f64,
}

#[derive(Debug, Serialize)]
struct BookedTrainerResponse {
    booking: Booking,
    trainer: Option<TrainerProfile>,
}

#[derive(Debug, Serialize)]
struct BalanceResponse {
    total: f64,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    subscribers: i64,
    paid_bookings: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment", post(record_payment))
        .route("/booked-trainer/:email", get(booked_trainer))
        .route("/sum-of-prices", get(sum_of_prices))
        .route("/balance", get(sum_of_prices))
        .route("/stats", get(stats))
}

#[instrument(skip(state, payload))]
async fn record_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    if payload.price < 0.0 {
        return Err(ApiError::InvalidArgument("price must not be negative".into()));
    }

    let booking = Booking::insert(
        &state.db,
        payload.user_email.trim().to_lowercase().as_str(),
        payload.trainer_email.as_deref(),
        payload.slot_name.as_deref(),
        payload.package_name.as_deref(),
        payload.price,
    )
    .await?;

    info!(booking_id = %booking.id, user = %booking.user_email, "payment recorded");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// The member's current booking plus the booked trainer's profile. The
/// trainer half may be absent when the profile was removed.
#[instrument(skip(state))]
async fn booked_trainer(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<BookedTrainerResponse>, ApiError> {
    let email = email.trim().to_lowercase();
    let booking = Booking::find_by_user_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("no booking found for this user".into()))?;

    let trainer = match booking.trainer_email.as_deref() {
        Some(trainer_email) => TrainerProfile::find_by_email(&state.db, trainer_email).await?,
        None => None,
    };

    Ok(Json(BookedTrainerResponse { booking, trainer }))
}

#[instrument(skip(state))]
async fn sum_of_prices(State(state): State<AppState>) -> Result<Json<BalanceResponse>, ApiError> {
    let total = Booking::sum_prices(&state.db).await?;
    Ok(Json(BalanceResponse { total }))
}

#[instrument(skip(state))]
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let subscribers = Subscriber::count(&state.db).await?;
    let paid_bookings = Booking::count(&state.db).await?;
    Ok(Json(StatsResponse {
        subscribers,
        paid_bookings,
    }))
}
