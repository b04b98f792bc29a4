use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::pagination::PageWindow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Class {
    pub id: Uuid,
    pub title: String,
    pub cover_img: Option<String>,
    pub description: Option<String>,
    pub trainers: Option<serde_json::Value>,
    pub trainer_details: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
}

const CLASS_COLUMNS: &str =
    "id, title, cover_img, description, trainers, trainer_details, created_at";

impl Class {
    pub async fn insert(
        db: &PgPool,
        title: &str,
        cover_img: Option<&str>,
        description: Option<&str>,
        trainers: Option<serde_json::Value>,
        trainer_details: Option<serde_json::Value>,
    ) -> anyhow::Result<Class> {
        let row = sqlx::query_as::<_, Class>(&format!(
            r#"
            INSERT INTO classes (title, cover_img, description, trainers, trainer_details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(cover_img)
        .bind(description)
        .bind(trainers)
        .bind(trainer_details)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// One page of classes in insertion order, optionally narrowed by a
    /// case-insensitive title substring. Returns the slice plus the count of
    /// everything matching the filter.
    pub async fn page(
        db: &PgPool,
        window: PageWindow,
        search: Option<&str>,
    ) -> anyhow::Result<(Vec<Class>, i64)> {
        let like = search.map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, Class>(&format!(
            r#"
            SELECT {CLASS_COLUMNS}
            FROM classes
            WHERE ($1::text IS NULL OR title ILIKE $1)
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(&like)
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM classes
            WHERE ($1::text IS NULL OR title ILIKE $1)
            "#,
        )
        .bind(&like)
        .fetch_one(db)
        .await?;

        Ok((rows, total))
    }

    pub async fn latest(db: &PgPool, count: i64) -> anyhow::Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, Class>(&format!(
            r#"
            SELECT {CLASS_COLUMNS}
            FROM classes
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        ))
        .bind(count)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_title(db: &PgPool, title: Option<&str>) -> anyhow::Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, Class>(&format!(
            r#"
            SELECT {CLASS_COLUMNS}
            FROM classes
            WHERE ($1::text IS NULL OR title = $1)
            ORDER BY created_at, id
            "#,
        ))
        .bind(title)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
