use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    trainers::{
        dto::{ApplyTrainerRequest, MessageResponse, UpdateStatusRequest},
        repo::{Application, NewApplication, TrainerProfile},
        services,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trainers", get(list_trainers))
        .route("/trainers/:name", get(trainer_by_name))
        .route("/apply-trainer", post(apply_trainer))
        .route("/get-trainers", get(pending_applications))
        .route(
            "/applied-trainers/:id",
            get(application_by_id).delete(delete_application),
        )
        .route("/update-trainer-status/:id", put(update_trainer_status))
        .route("/activity-log", get(activity_log))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidArgument("malformed id".into()))
}

#[instrument(skip(state))]
async fn list_trainers(State(state): State<AppState>) -> Result<Json<Vec<TrainerProfile>>, ApiError> {
    let trainers = TrainerProfile::list_all(&state.db).await?;
    Ok(Json(trainers))
}

#[instrument(skip(state))]
async fn trainer_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TrainerProfile>, ApiError> {
    match TrainerProfile::find_by_name(&state.db, &name).await? {
        Some(trainer) => Ok(Json(trainer)),
        None => Err(ApiError::NotFound("trainer not found".into())),
    }
}

#[instrument(skip(state, payload))]
async fn apply_trainer(
    State(state): State<AppState>,
    Json(payload): Json<ApplyTrainerRequest>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let application = Application::insert(
        &state.db,
        NewApplication {
            full_name: payload.full_name,
            email: payload.email.trim().to_lowercase(),
            age: payload.age,
            profile_image: payload.profile_image,
            skills: payload.skills,
            available_days: payload.available_days,
            available_time: payload.available_time,
        },
    )
    .await?;

    info!(application_id = %application.id, email = %application.email, "trainer application submitted");
    Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(state))]
async fn pending_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = Application::list_pending(&state.db).await?;
    Ok(Json(applications))
}

#[instrument(skip(state))]
async fn application_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, ApiError> {
    let id = parse_id(&id)?;
    match Application::find_by_id(&state.db, id).await? {
        Some(application) => Ok(Json(application)),
        None => Err(ApiError::NotFound("application not found".into())),
    }
}

#[instrument(skip(state))]
async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    if !Application::delete_by_id(&state.db, id).await? {
        return Err(ApiError::NotFound("application not found".into()));
    }
    Ok(Json(MessageResponse {
        message: "application deleted".into(),
    }))
}

/// The role-promotion endpoint: records the decision and, on `confirmed`,
/// flips the applicant's account to the trainer role in the same
/// transaction.
#[instrument(skip(state, payload))]
async fn update_trainer_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let email = payload.email.trim().to_lowercase();

    services::update_application_status(
        &state.db,
        id,
        &email,
        payload.status,
        payload.feedback.as_deref(),
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "trainer status updated".into(),
    }))
}

#[instrument(skip(state))]
async fn activity_log(State(state): State<AppState>) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = Application::list_activity_log(&state.db).await?;
    Ok(Json(applications))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(
            parse_id("not-a-uuid"),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn update_status_body_parses() {
        let body: UpdateStatusRequest = serde_json::from_str(
            r#"{ "status": "confirmed", "feedback": "welcome aboard", "email": "bob@example.com" }"#,
        )
        .unwrap();
        assert_eq!(body.status, crate::trainers::repo::ApplicationStatus::Confirmed);
        assert_eq!(body.feedback.as_deref(), Some("welcome aboard"));
    }
}
