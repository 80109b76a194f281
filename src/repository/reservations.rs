//! Reservations repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationsRepository: Send + Sync {
    async fn create(&self, data: &CreateReservation) -> AppResult<Reservation>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>>;
    async fn list_active(&self) -> AppResult<Vec<Reservation>>;
    async fn has_active(&self, user_id: Uuid, book_id: Uuid) -> AppResult<bool>;
    /// Returns false when the reservation does not exist or is no longer active
    async fn cancel(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgReservationsRepository {
    pool: Pool<Postgres>,
}

impl PgReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationsRepository for PgReservationsRepository {
    async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (user_id, book_id, status)
            VALUES ($1, $2, 'active')
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "You already have an active reservation for this book",
                "Unknown user or book",
            )
        })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reservation)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = $1 ORDER BY reserved_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    async fn list_active(&self) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE status = 'active' ORDER BY reserved_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    async fn has_active(&self, user_id: Uuid, book_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE user_id = $1 AND book_id = $2 AND status = 'active'
            )
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn cancel(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'canceled' WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
