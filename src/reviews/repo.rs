use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Review {
    pub async fn insert(
        db: &PgPool,
        user_email: Option<&str>,
        name: Option<&str>,
        image: Option<&str>,
        rating: Option<i32>,
        review: &str,
    ) -> anyhow::Result<Review> {
        let row = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_email, name, image, rating, review)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_email, name, image, rating, review, created_at
            "#,
        )
        .bind(user_email)
        .bind(name)
        .bind(image)
        .bind(rating)
        .bind(review)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, user_email, name, image, rating, review, created_at
            FROM reviews
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
