//! Fines repository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::fine::{CreateFine, Fine},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinesRepository: Send + Sync {
    async fn create(&self, data: &CreateFine) -> AppResult<Fine>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Fine>>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Fine>>;
    async fn list_unpaid_by_user(&self, user_id: Uuid) -> AppResult<Vec<Fine>>;
    /// `None` when the fine does not exist or is already paid
    async fn mark_paid(&self, id: Uuid) -> AppResult<Option<Fine>>;
    async fn total_unpaid(&self, user_id: Uuid) -> AppResult<Decimal>;
}

#[derive(Clone)]
pub struct PgFinesRepository {
    pool: Pool<Postgres>,
}

impl PgFinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FinesRepository for PgFinesRepository {
    async fn create(&self, data: &CreateFine) -> AppResult<Fine> {
        sqlx::query_as::<_, Fine>(
            r#"
            INSERT INTO fines (user_id, borrowing_id, amount, status, description)
            VALUES ($1, $2, $3, 'unpaid', $4)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.borrowing_id)
        .bind(data.amount)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Fine already exists", "Invalid fine"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Fine>> {
        let fine = sqlx::query_as::<_, Fine>("SELECT * FROM fines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fine)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Fine>> {
        let fines = sqlx::query_as::<_, Fine>(
            "SELECT * FROM fines WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fines)
    }

    async fn list_unpaid_by_user(&self, user_id: Uuid) -> AppResult<Vec<Fine>> {
        let fines = sqlx::query_as::<_, Fine>(
            r#"
            SELECT * FROM fines
            WHERE user_id = $1 AND status = 'unpaid'
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fines)
    }

    async fn mark_paid(&self, id: Uuid) -> AppResult<Option<Fine>> {
        let fine = sqlx::query_as::<_, Fine>(
            r#"
            UPDATE fines SET status = 'paid', paid_at = NOW()
            WHERE id = $1 AND status = 'unpaid'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fine)
    }

    async fn total_unpaid(&self, user_id: Uuid) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM fines WHERE user_id = $1 AND status = 'unpaid'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
