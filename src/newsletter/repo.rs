use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Newsletter signup. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub created_at: OffsetDateTime,
}

impl Subscriber {
    pub async fn insert(db: &PgPool, name: Option<&str>, email: &str) -> anyhow::Result<Subscriber> {
        let row = sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO newsletter_subscribers (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Subscriber>> {
        let rows = sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT id, name, email, created_at
            FROM newsletter_subscribers
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(db)
            .await?;
        Ok(count)
    }
}
