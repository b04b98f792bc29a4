use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account role. A NULL column means the role was never assigned; the first
/// role query fills it in with `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Member,
    Trainer,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub other_info: Option<String>,
    pub role: Option<Role>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, photo_url, other_info, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn insert(
        db: &PgPool,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, photo_url)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, photo_url, other_info, role, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(photo_url)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, photo_url, other_info, role, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_role(db: &PgPool, role: Role) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, photo_url, other_info, role, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(role)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Returns the user's role, persisting `member` first if it was never
    /// set. `None` means no such user.
    pub async fn ensure_role(db: &PgPool, email: &str) -> anyhow::Result<Option<Role>> {
        let role = sqlx::query_scalar::<_, Role>(
            r#"
            UPDATE users
            SET role = COALESCE(role, 'member')
            WHERE email = $1
            RETURNING role
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(role)
    }

    /// Sets role to `member` only when it is currently unset. Returns the
    /// number of rows changed.
    pub async fn fill_missing_role(db: &PgPool, email: &str) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET role = 'member'
            WHERE email = $1 AND role IS NULL
            "#,
        )
        .bind(email)
        .execute(db)
        .await?;
        Ok(res.rows_affected())
    }

    pub async fn upsert_profile(
        db: &PgPool,
        email: &str,
        name: Option<&str>,
        photo_url: Option<&str>,
        other_info: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, photo_url, other_info)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name,
                photo_url = EXCLUDED.photo_url,
                other_info = EXCLUDED.other_info
            RETURNING id, email, name, photo_url, other_info, role, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(photo_url)
        .bind(other_info)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), r#""member""#);
        assert_eq!(serde_json::to_string(&Role::Trainer).unwrap(), r#""trainer""#);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    }

    #[test]
    fn role_deserializes_lowercase() {
        let role: Role = serde_json::from_str(r#""trainer""#).unwrap();
        assert_eq!(role, Role::Trainer);
        assert!(serde_json::from_str::<Role>(r#""Trainer""#).is_err());
    }
}
