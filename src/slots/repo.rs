use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A bookable time slot published by a trainer. Slots are the one record
/// besides applications that gets physically deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Slot {
    pub id: Uuid,
    pub trainer_email: String,
    pub slot_name: String,
    pub slot_time: Option<String>,
    pub class_title: Option<String>,
    pub created_at: OffsetDateTime,
}

const SLOT_COLUMNS: &str = "id, trainer_email, slot_name, slot_time, class_title, created_at";

impl Slot {
    pub async fn insert(
        db: &PgPool,
        trainer_email: &str,
        slot_name: &str,
        slot_time: Option<&str>,
        class_title: Option<&str>,
    ) -> anyhow::Result<Slot> {
        let row = sqlx::query_as::<_, Slot>(&format!(
            r#"
            INSERT INTO slots (trainer_email, slot_name, slot_time, class_title)
            VALUES ($1, $2, $3, $4)
            RETURNING {SLOT_COLUMNS}
            "#,
        ))
        .bind(trainer_email)
        .bind(slot_name)
        .bind(slot_time)
        .bind(class_title)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_trainer(db: &PgPool, trainer_email: &str) -> anyhow::Result<Vec<Slot>> {
        let rows = sqlx::query_as::<_, Slot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS}
            FROM slots
            WHERE trainer_email = $1
            ORDER BY created_at, id
            "#,
        ))
        .bind(trainer_email)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_name(db: &PgPool, slot_name: Option<&str>) -> anyhow::Result<Vec<Slot>> {
        let rows = sqlx::query_as::<_, Slot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS}
            FROM slots
            WHERE ($1::text IS NULL OR slot_name = $1)
            ORDER BY created_at, id
            "#,
        ))
        .bind(slot_name)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM slots WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
