use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A paid trainer booking. Recorded once the payment goes through, never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_email: String,
    pub trainer_email: Option<String>,
    pub slot_name: Option<String>,
    pub package_name: Option<String>,
    pub price: f64,
    pub created_at: OffsetDateTime,
}

const BOOKING_COLUMNS: &str =
    "id, user_email, trainer_email, slot_name, package_name, price, created_at";

impl Booking {
    pub async fn insert(
        db: &PgPool,
        user_email: &str,
        trainer_email: Option<&str>,
        slot_name: Option<&str>,
        package_name: Option<&str>,
        price: f64,
    ) -> anyhow::Result<Booking> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (user_email, trainer_email, slot_name, package_name, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(user_email)
        .bind(trainer_email)
        .bind(slot_name)
        .bind(package_name)
        .bind(price)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_user_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE user_email = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn sum_prices(db: &PgPool) -> anyhow::Result<f64> {
        let total: f64 = sqlx::query_scalar("SELECT COALESCE(SUM(price), 0) FROM bookings")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(db)
            .await?;
        Ok(count)
    }
}
