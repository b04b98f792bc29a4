use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    classes::repo::Class,
    error::ApiError,
    slots::repo::Slot,
    state::AppState,
};

#[derive(Debug, Deserialize)]
struct AddSlotRequest {
    trainer_email: String,
    slot_name: String,
    slot_time: Option<String>,
    class_title: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ClassSlotQuery {
    class: Option<String>,
    slot: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClassSlotResponse {
    classes: Vec<Class>,
    slots: Vec<Slot>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/slots", post(add_slot))
        .route("/slots/:email", get(trainer_slots))
        .route("/delete-slot/:id", delete(delete_slot))
        .route("/trainer-classes-slots", get(classes_and_slots))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidArgument("malformed id".into()))
}

#[instrument(skip(state, payload))]
async fn add_slot(
    State(state): State<AppState>,
    Json(payload): Json<AddSlotRequest>,
) -> Result<(StatusCode, Json<Slot>), ApiError> {
    let slot = Slot::insert(
        &state.db,
        payload.trainer_email.trim().to_lowercase().as_str(),
        payload.slot_name.trim(),
        payload.slot_time.as_deref(),
        payload.class_title.as_deref(),
    )
    .await?;

    info!(slot_id = %slot.id, trainer = %slot.trainer_email, "slot added");
    Ok((StatusCode::CREATED, Json(slot)))
}

#[instrument(skip(state))]
async fn trainer_slots(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Slot>>, ApiError> {
    let email = email.trim().to_lowercase();
    let slots = Slot::list_by_trainer(&state.db, &email).await?;
    Ok(Json(slots))
}

#[instrument(skip(state))]
async fn delete_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    if !Slot::delete_by_id(&state.db, id).await? {
        return Err(ApiError::NotFound("slot not found".into()));
    }
    Ok(Json(MessageResponse {
        message: "slot deleted".into(),
    }))
}

/// Classes and slots matched by name, for the booking page.
#[instrument(skip(state))]
async fn classes_and_slots(
    State(state): State<AppState>,
    Query(q): Query<ClassSlotQuery>,
) -> Result<Json<ClassSlotResponse>, ApiError> {
    let classes = Class::list_by_title(&state.db, q.class.as_deref()).await?;
    let slots = Slot::list_by_name(&state.db, q.slot.as_deref()).await?;
    Ok(Json(ClassSlotResponse { classes, slots }))
}
