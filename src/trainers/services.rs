use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::ApiError, trainers::repo::ApplicationStatus};

/// Writes the status decision onto the application and, when the decision is
/// `confirmed`, promotes the applicant's account to the trainer role.
///
/// Both writes run in one transaction, so the application can never end up
/// confirmed with the promotion lost halfway. The application write has
/// upsert semantics: a decision for an id with no stored application creates
/// the record.
///
/// A confirmed application whose email matches no user account still
/// succeeds; the promotion is simply skipped and logged.
pub async fn update_application_status(
    db: &PgPool,
    id: Uuid,
    email: &str,
    status: ApplicationStatus,
    feedback: Option<&str>,
) -> Result<(), ApiError> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO trainer_applications (id, email, status, feedback)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET status = EXCLUDED.status,
            feedback = EXCLUDED.feedback
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(status)
    .bind(feedback)
    .execute(&mut *tx)
    .await?;

    if status == ApplicationStatus::Confirmed {
        let res = sqlx::query("UPDATE users SET role = 'trainer' WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            warn!(email = %email, application_id = %id, "confirmed application has no matching user to promote");
        } else {
            info!(email = %email, application_id = %id, "user promoted to trainer");
        }
    }

    tx.commit().await?;
    Ok(())
}
