//! Recommendation queries over the borrowing history

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationsRepository: Send + Sync {
    /// Category the user borrowed most from
    async fn favorite_category(&self, user_id: Uuid) -> AppResult<Option<Uuid>>;
    /// Author the user borrowed most from
    async fn favorite_author(&self, user_id: Uuid) -> AppResult<Option<Uuid>>;
    /// Books of the category the user never borrowed
    async fn unread_in_category(&self, user_id: Uuid, category_id: Uuid) -> AppResult<Vec<Uuid>>;
    /// Books of the author the user never borrowed
    async fn unread_by_author(&self, user_id: Uuid, author_id: Uuid) -> AppResult<Vec<Uuid>>;
}

#[derive(Clone)]
pub struct PgRecommendationsRepository {
    pool: Pool<Postgres>,
}

impl PgRecommendationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationsRepository for PgRecommendationsRepository {
    async fn favorite_category(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
        // Ties go to the most recently borrowed group
        let category_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT b.category_id
            FROM borrowings br
            JOIN books b ON br.book_id = b.id
            WHERE br.user_id = $1
            GROUP BY b.category_id
            ORDER BY COUNT(br.id) DESC, MAX(br.borrowed_date) DESC, b.category_id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category_id)
    }

    async fn favorite_author(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
        let author_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT b.author_id
            FROM borrowings br
            JOIN books b ON br.book_id = b.id
            WHERE br.user_id = $1
            GROUP BY b.author_id
            ORDER BY COUNT(br.id) DESC, MAX(br.borrowed_date) DESC, b.author_id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author_id)
    }

    async fn unread_in_category(&self, user_id: Uuid, category_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT b.id FROM books b
            WHERE b.category_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM borrowings br WHERE br.book_id = b.id AND br.user_id = $1
              )
            ORDER BY b.title, b.id
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn unread_by_author(&self, user_id: Uuid, author_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT b.id FROM books b
            WHERE b.author_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM borrowings br WHERE br.book_id = b.id AND br.user_id = $1
              )
            ORDER BY b.title, b.id
            "#,
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
