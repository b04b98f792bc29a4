use serde::{Deserialize, Serialize};

use crate::trainers::repo::ApplicationStatus;

#[derive(Debug, Deserialize)]
pub struct ApplyTrainerRequest {
    pub full_name: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub profile_image: Option<String>,
    pub skills: Option<Vec<String>>,
    pub available_days: Option<Vec<String>>,
    pub available_time: Option<String>,
}

/// Body of the status decision. The applicant email rides along so the
/// promotion write knows which account to touch.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
    pub feedback: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
