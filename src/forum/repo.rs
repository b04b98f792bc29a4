use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::pagination::PageWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    fn column(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up_votes",
            VoteDirection::Down => "down_votes",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub up_votes: i64,
    pub down_votes: i64,
    pub created_at: OffsetDateTime,
}

const POST_COLUMNS: &str =
    "id, title, description, author_name, up_votes, down_votes, created_at";

impl Post {
    pub async fn page(db: &PgPool, window: PageWindow) -> anyhow::Result<(Vec<Post>, i64)> {
        let rows = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM forum_posts
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forum_posts")
            .fetch_one(db)
            .await?;

        Ok((rows, total))
    }

    pub async fn latest(db: &PgPool, count: i64) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM forum_posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        ))
        .bind(count)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Increments one counter by exactly 1 and returns the updated post in a
    /// single statement, so the existence check and the bump cannot race.
    /// `None` means no such post; nothing was mutated.
    pub async fn vote(
        db: &PgPool,
        id: Uuid,
        direction: VoteDirection,
    ) -> anyhow::Result<Option<Post>> {
        let column = direction.column();
        let row = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE forum_posts
            SET {column} = {column} + 1
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_direction_targets_its_own_column() {
        assert_eq!(VoteDirection::Up.column(), "up_votes");
        assert_eq!(VoteDirection::Down.column(), "down_votes");
    }
}
