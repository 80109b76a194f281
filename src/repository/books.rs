//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const UNKNOWN_REFERENCE: &str = "Unable to save book: unknown author or category";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
    /// One page of books ordered by title, with the total count
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)>;
    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Option<Book>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    /// Case-insensitive substring match on the title
    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>>;
    async fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<Book>>;
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so user input only matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, category_id, published_year, isbn, copies_available)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.category_id)
        .bind(data.published_year)
        .bind(&data.isbn)
        .bind(data.copies_available.unwrap_or(1))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Book already exists", UNKNOWN_REFERENCE))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY title, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author_id = COALESCE($3, author_id),
                category_id = COALESCE($4, category_id),
                published_year = COALESCE($5, published_year),
                isbn = COALESCE($6, isbn),
                copies_available = COALESCE($7, copies_available)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.category_id)
        .bind(data.published_year)
        .bind(&data.isbn)
        .bind(data.copies_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Book already exists", UNKNOWN_REFERENCE))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE title ILIKE $1 ORDER BY title, id",
        )
        .bind(like_pattern(title))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = $1 ORDER BY title, id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE category_id = $1 ORDER BY title, id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("dune"), "%dune%");
        assert_eq!(like_pattern("100%_sure"), "%100\\%\\_sure%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
