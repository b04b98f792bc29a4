use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        extractors::{AdminUser, AuthUser},
        services::is_valid_email,
    },
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, CreateUserResponse, MessageResponse, ProfileUpdateRequest,
            RoleResponse, UpdateRoleRequest,
        },
        repo::{Role, User},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/role/:email", get(user_role))
        .route("/updaterole", patch(update_role))
        .route("/trainer", get(list_trainer_users))
        .route("/profile/:email", get(get_profile).put(put_profile))
}

/// Returns the caller's role, defaulting and persisting `member` when the
/// account has none yet. The path email must match the token subject.
#[instrument(skip(state))]
async fn user_role(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(email): Path<String>,
) -> Result<Json<RoleResponse>, ApiError> {
    let email = email.trim().to_lowercase();
    if caller != email {
        return Err(ApiError::Forbidden("forbidden access".into()));
    }

    match User::ensure_role(&state.db, &email).await? {
        Some(role) => Ok(Json(RoleResponse { role })),
        None => Err(ApiError::NotFound("user not found".into())),
    }
}

#[instrument(skip(state, _admin))]
async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users))
}

/// Create-if-absent by email. Calling twice with the same email is a no-op
/// that reports "user already exists".
#[instrument(skip(state, payload))]
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidArgument("invalid email".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Ok(Json(CreateUserResponse {
            message: "user already exists".into(),
            inserted_id: None,
        }));
    }

    let user = User::insert(
        &state.db,
        &email,
        payload.name.as_deref(),
        payload.photo_url.as_deref(),
    )
    .await?;

    info!(email = %user.email, user_id = %user.id, "user created");
    Ok(Json(CreateUserResponse {
        message: "user created".into(),
        inserted_id: Some(user.id),
    }))
}

/// Backfills `member` onto accounts that never got a role. Roles already set
/// are left alone so a trainer cannot be silently demoted.
#[instrument(skip(state, payload))]
async fn update_role(
    State(state): State<AppState>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    let changed = User::fill_missing_role(&state.db, &email).await?;
    if changed == 0 {
        warn!(email = %email, "updaterole matched no unset-role user");
    }
    Ok(Json(MessageResponse {
        message: "role updated".into(),
    }))
}

#[instrument(skip(state))]
async fn list_trainer_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let trainers = User::list_by_role(&state.db, Role::Trainer).await?;
    Ok(Json(trainers))
}

#[instrument(skip(state))]
async fn get_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    let email = email.trim().to_lowercase();
    match User::find_by_email(&state.db, &email).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("user not found".into())),
    }
}

#[instrument(skip(state, payload))]
async fn put_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidArgument("invalid email".into()));
    }

    User::upsert_profile(
        &state.db,
        &email,
        payload.name.as_deref(),
        payload.photo_url.as_deref(),
        payload.other_info.as_deref(),
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "profile updated".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_response_shapes() {
        let created = CreateUserResponse {
            message: "user created".into(),
            inserted_id: Some(uuid::Uuid::new_v4()),
        };
        let v = serde_json::to_value(&created).unwrap();
        assert!(v["inserted_id"].is_string());

        let existing = CreateUserResponse {
            message: "user already exists".into(),
            inserted_id: None,
        };
        let v = serde_json::to_value(&existing).unwrap();
        assert!(v["inserted_id"].is_null());
    }
}
