//! Borrowings repository
//!
//! Borrowing a book and giving it back both touch the book's stock, so
//! those operations run in a single transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrowing::{Borrowing, NewBorrowing},
        fine::Fine,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowingsRepository: Send + Sync {
    /// Takes one copy off the shelf, fulfills the user's reservation for the
    /// book and records the borrowing
    async fn create(&self, data: &NewBorrowing) -> AppResult<Borrowing>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Borrowing>>;
    async fn list(&self) -> AppResult<Vec<Borrowing>>;
    async fn list_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>>;
    async fn list_history_by_user(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>>;
    /// Records the return, puts the copy back and issues `late_fee` as a fine.
    /// `None` when the borrowing does not exist or is already returned.
    async fn mark_returned(
        &self,
        id: Uuid,
        returned_date: NaiveDate,
        late_fee: Option<Decimal>,
    ) -> AppResult<Option<(Borrowing, Option<Fine>)>>;
    /// Only active borrowings can be extended
    async fn update_due_date(&self, id: Uuid, due_date: NaiveDate) -> AppResult<Option<Borrowing>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgBorrowingsRepository {
    pool: Pool<Postgres>,
}

impl PgBorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingsRepository for PgBorrowingsRepository {
    async fn create(&self, data: &NewBorrowing) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query(
            r#"
            UPDATE books SET copies_available = copies_available - 1
            WHERE id = $1 AND copies_available > 0
            "#,
        )
        .bind(data.book_id)
        .execute(&mut *tx)
        .await?;

        if taken.rows_affected() == 0 {
            return Err(AppError::BusinessRule("No copies available".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE reservations SET status = 'fulfilled'
            WHERE user_id = $1 AND book_id = $2 AND status = 'active'
            "#,
        )
        .bind(data.user_id)
        .bind(data.book_id)
        .execute(&mut *tx)
        .await?;

        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowings (user_id, book_id, borrowed_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.book_id)
        .bind(data.borrowed_date)
        .bind(data.due_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_constraint(e, "Borrowing already exists", "Unknown user or book"))?;

        tx.commit().await?;
        Ok(borrowing)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Borrowing>> {
        let borrowing = sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(borrowing)
    }

    async fn list(&self) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            "SELECT * FROM borrowings ORDER BY borrowed_date DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    async fn list_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            r#"
            SELECT * FROM borrowings
            WHERE user_id = $1 AND returned_date IS NULL
            ORDER BY due_date NULLS LAST, borrowed_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    async fn list_history_by_user(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            r#"
            SELECT * FROM borrowings
            WHERE user_id = $1 AND returned_date IS NOT NULL
            ORDER BY returned_date DESC, borrowed_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    async fn mark_returned(
        &self,
        id: Uuid,
        returned_date: NaiveDate,
        late_fee: Option<Decimal>,
    ) -> AppResult<Option<(Borrowing, Option<Fine>)>> {
        let mut tx = self.pool.begin().await?;

        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowings SET returned_date = $2
            WHERE id = $1 AND returned_date IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(returned_date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(borrowing) = borrowing else {
            return Ok(None);
        };

        sqlx::query("UPDATE books SET copies_available = copies_available + 1 WHERE id = $1")
            .bind(borrowing.book_id)
            .execute(&mut *tx)
            .await?;

        let fine = match late_fee {
            Some(amount) => {
                let days_late = borrowing
                    .due_date
                    .map(|due| (returned_date - due).num_days())
                    .unwrap_or_default();
                let fine = sqlx::query_as::<_, Fine>(
                    r#"
                    INSERT INTO fines (user_id, borrowing_id, amount, status, description)
                    VALUES ($1, $2, $3, 'unpaid', $4)
                    RETURNING *
                    "#,
                )
                .bind(borrowing.user_id)
                .bind(borrowing.id)
                .bind(amount)
                .bind(format!("Late return ({} days overdue)", days_late))
                .fetch_one(&mut *tx)
                .await?;
                Some(fine)
            }
            None => None,
        };

        tx.commit().await?;
        Ok(Some((borrowing, fine)))
    }

    async fn update_due_date(&self, id: Uuid, due_date: NaiveDate) -> AppResult<Option<Borrowing>> {
        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowings SET due_date = $2
            WHERE id = $1 AND returned_date IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(due_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(borrowing)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Borrowing>("DELETE FROM borrowings WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(deleted) = deleted else {
            return Ok(false);
        };

        if deleted.is_active() {
            sqlx::query("UPDATE books SET copies_available = copies_available + 1 WHERE id = $1")
                .bind(deleted.book_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
