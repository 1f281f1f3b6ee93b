//! Chat history repository
//!
//! Append-only writer and offset-paginated reader over the `chat_history`
//! table. Offset pagination (numeric range plus an exact count) trades
//! large-offset scan cost for simplicity, which is acceptable at the
//! expected per-user row counts.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::chat::ChatRecord;

/// Zero-based inclusive row range for a 1-based page
///
/// `page_range(3, 25)` is `(50, 74)`: the third page of 25 rows.
pub fn page_range(page: u32, page_size: u32) -> (i64, i64) {
    let start = (page as i64 - 1) * page_size as i64;
    let end = start + page_size as i64 - 1;
    (start, end)
}

/// Total number of pages for a row count, rounding up
pub fn total_pages(total: i64, page_size: u32) -> i64 {
    (total + page_size as i64 - 1) / page_size as i64
}

/// Chat history repository
#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one chat turn for a user
    ///
    /// One durable row write, no retry; rows are never mutated or
    /// individually deleted afterwards.
    pub async fn append(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
    ) -> DatabaseResult<ChatRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO chat_history (user_id, question, answer)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, question, answer, created_at
            "#,
        )
        .bind(user_id)
        .bind(question)
        .bind(answer)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let record = ChatRecord {
            id: row.get("id"),
            user_id: row.get("user_id"),
            question: row.get("question"),
            answer: row.get("answer"),
            created_at: row.get("created_at"),
        };

        Ok(record)
    }

    /// List one page of a user's chat history, newest first
    ///
    /// Returns the requested slice plus the exact total row count for the
    /// user. A page past the end comes back as an empty slice, not an
    /// error.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> DatabaseResult<(Vec<ChatRecord>, i64)> {
        let (start, end) = page_range(page, page_size);
        let limit = end - start + 1;

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, question, answer, created_at
            FROM chat_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(DatabaseError::Query)?;

        let records = rows
            .into_iter()
            .map(|row| ChatRecord {
                id: row.get("id"),
                user_id: row.get("user_id"),
                question: row.get("question"),
                answer: row.get("answer"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok((records, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use common::database::{DatabaseConfig, init_pool};
    use serial_test::serial;
    use std::time::Duration;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_range(1, 10), (0, 9));
    }

    #[test]
    fn range_is_inclusive_and_page_sized() {
        let (start, end) = page_range(3, 25);
        assert_eq!((start, end), (50, 74));
        assert_eq!(end - start + 1, 25);
    }

    #[test]
    fn single_row_pages() {
        assert_eq!(page_range(1, 1), (0, 0));
        assert_eq!(page_range(7, 1), (6, 6));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(41, 10), 5);
    }

    async fn pool() -> Result<PgPool> {
        let config = DatabaseConfig::from_env()?;
        Ok(init_pool(&config).await?)
    }

    async fn seed_user(pool: &PgPool) -> Result<Uuid> {
        let id = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash) VALUES ($1, 'test-hash') RETURNING id",
        )
        .bind(format!("{}@example.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    // Cascades to the user's chat history
    async fn remove_user(pool: &PgPool, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn appended_record_lists_first() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ChatRepository::new(pool.clone());

        repository
            .append(user_id, "Where should I go in winter?", "Northern India.")
            .await?;
        tokio::time::sleep(Duration::from_millis(10)).await;
        let latest = repository
            .append(user_id, "And in summer?", "The south is pleasant year-round.")
            .await?;

        let (items, total) = repository.list(user_id, 1, 10).await?;
        assert_eq!(total, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, latest.id);
        assert_eq!(items[0].question, "And in summer?");

        remove_user(&pool, user_id).await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn empty_history_is_an_empty_page() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ChatRepository::new(pool.clone());

        let (items, total) = repository.list(user_id, 1, 10).await?;
        assert!(items.is_empty());
        assert_eq!(total, 0);

        remove_user(&pool, user_id).await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn page_past_the_end_is_empty_not_an_error() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ChatRepository::new(pool.clone());

        repository.append(user_id, "Hello", "Namaste!").await?;

        let (items, total) = repository.list(user_id, 5, 10).await?;
        assert!(items.is_empty());
        assert_eq!(total, 1);

        remove_user(&pool, user_id).await?;
        Ok(())
    }
}
