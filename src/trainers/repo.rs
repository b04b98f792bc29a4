use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle of a trainer application. Confirming one is what promotes the
/// applicant's account to the trainer role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// Public trainer profile shown on the site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrainerProfile {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub skills: Option<Vec<String>>,
    pub available_days: Option<Vec<String>>,
    pub available_time: Option<String>,
    pub available_slots: Option<String>,
    pub created_at: OffsetDateTime,
}

impl TrainerProfile {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<TrainerProfile>> {
        let rows = sqlx::query_as::<_, TrainerProfile>(
            r#"
            SELECT id, name, email, photo, skills, available_days, available_time,
                   available_slots, created_at
            FROM trainers
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<TrainerProfile>> {
        let row = sqlx::query_as::<_, TrainerProfile>(
            r#"
            SELECT id, name, email, photo, skills, available_days, available_time,
                   available_slots, created_at
            FROM trainers
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<TrainerProfile>> {
        let row = sqlx::query_as::<_, TrainerProfile>(
            r#"
            SELECT id, name, email, photo, skills, available_days, available_time,
                   available_slots, created_at
            FROM trainers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub profile_image: Option<String>,
    pub skills: Option<Vec<String>>,
    pub available_days: Option<Vec<String>>,
    pub available_time: Option<String>,
    pub status: ApplicationStatus,
    pub feedback: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewApplication {
    pub full_name: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub profile_image: Option<String>,
    pub skills: Option<Vec<String>>,
    pub available_days: Option<Vec<String>>,
    pub available_time: Option<String>,
}

const APPLICATION_COLUMNS: &str = "id, full_name, email, age, profile_image, skills, \
     available_days, available_time, status, feedback, created_at";

impl Application {
    pub async fn insert(db: &PgPool, new: NewApplication) -> anyhow::Result<Application> {
        let row = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO trainer_applications
                (full_name, email, age, profile_image, skills, available_days, available_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {APPLICATION_COLUMNS}
            "#,
        ))
        .bind(new.full_name)
        .bind(new.email)
        .bind(new.age)
        .bind(new.profile_image)
        .bind(new.skills)
        .bind(new.available_days)
        .bind(new.available_time)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Application>> {
        let row = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM trainer_applications WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM trainer_applications WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn list_pending(db: &PgPool) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM trainer_applications
            WHERE status = 'pending'
            ORDER BY created_at, id
            "#,
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Applications a member sees on their activity-log page: everything
    /// still pending plus everything rejected (with feedback).
    pub async fn list_activity_log(db: &PgPool) -> anyhow::Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM trainer_applications
            WHERE status IN ('pending', 'rejected')
            ORDER BY created_at, id
            "#,
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Pending).unwrap(),
            r#""pending""#
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Confirmed).unwrap(),
            r#""confirmed""#
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Rejected).unwrap(),
            r#""rejected""#
        );
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<ApplicationStatus>(r#""approved""#).is_err());
    }
}
