//! Borrowing service: lending books out, taking them back, late fees

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    config::BorrowingConfig,
    error::{AppError, AppResult},
    models::borrowing::{
        Borrowing, CreateBorrowing, NewBorrowing, ReturnOutcome, UpdateBorrowing,
    },
    models::fine::MAX_FINE_AMOUNT,
    repository::{BooksRepository, BorrowingsRepository, UsersRepository},
};

const RETURN_FAILED: &str = "Borrowing not found or update failed.";

#[derive(Clone)]
pub struct BorrowingsService {
    borrowings: Arc<dyn BorrowingsRepository>,
    users: Arc<dyn UsersRepository>,
    books: Arc<dyn BooksRepository>,
    config: BorrowingConfig,
}

impl BorrowingsService {
    pub fn new(
        borrowings: Arc<dyn BorrowingsRepository>,
        users: Arc<dyn UsersRepository>,
        books: Arc<dyn BooksRepository>,
        config: BorrowingConfig,
    ) -> Self {
        Self { borrowings, users, books, config }
    }

    /// Fill in the default dates of a borrowing request
    pub fn resolve(&self, data: &CreateBorrowing, today: NaiveDate) -> AppResult<NewBorrowing> {
        let borrowed_date = data.borrowed_date.unwrap_or(today);
        let due_date = match data.due_date {
            Some(due_date) => due_date,
            None => borrowed_date
                .checked_add_signed(Duration::days(self.config.loan_duration_days))
                .ok_or_else(|| AppError::Validation("Borrowed date is out of range".to_string()))?,
        };

        if due_date < borrowed_date {
            return Err(AppError::Validation(
                "Due date cannot be earlier than borrowed date".to_string(),
            ));
        }

        Ok(NewBorrowing {
            user_id: data.user_id,
            book_id: data.book_id,
            borrowed_date,
            due_date,
        })
    }

    /// Lend a book: one copy leaves the shelf
    pub async fn create(&self, data: CreateBorrowing) -> AppResult<Borrowing> {
        let new = self.resolve(&data, Utc::now().date_naive())?;

        if self.users.get_by_id(new.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if self.books.get_by_id(new.book_id).await?.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let borrowing = self.borrowings.create(&new).await.map_err(|e| {
            if let AppError::BusinessRule(ref msg) = e {
                tracing::warn!("Borrowing of book {} refused: {}", new.book_id, msg);
            }
            e
        })?;
        tracing::info!(
            "Book {} borrowed by user {} until {}",
            borrowing.book_id,
            borrowing.user_id,
            new.due_date
        );
        Ok(borrowing)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Borrowing> {
        self.borrowings
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Borrowing not found".to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Borrowing>> {
        self.borrowings.list().await
    }

    pub async fn list_active(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>> {
        self.borrowings.list_active_by_user(user_id).await
    }

    pub async fn list_history(&self, user_id: Uuid) -> AppResult<Vec<Borrowing>> {
        self.borrowings.list_history_by_user(user_id).await
    }

    /// Take a book back, issuing a fine when it comes back after the due date
    pub async fn return_book(&self, id: Uuid, return_date: Option<NaiveDate>) -> AppResult<ReturnOutcome> {
        let returned = return_date.unwrap_or_else(|| Utc::now().date_naive());

        let borrowing = self
            .borrowings
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(RETURN_FAILED.to_string()))?;

        if !borrowing.is_active() {
            return Err(AppError::Conflict("Borrowing already returned".to_string()));
        }
        if returned < borrowing.borrowed_date {
            return Err(AppError::Validation(
                "Returned date cannot be earlier than borrowed date".to_string(),
            ));
        }

        let late_fee = borrowing.overdue_fine(returned, self.config.fine_per_day);
        if late_fee.is_some_and(|fee| fee > MAX_FINE_AMOUNT) {
            return Err(AppError::Validation(
                "Late fee for this return date exceeds the maximum fine amount".to_string(),
            ));
        }
        let (borrowing, fine) = self
            .borrowings
            .mark_returned(id, returned, late_fee)
            .await?
            .ok_or_else(|| AppError::NotFound(RETURN_FAILED.to_string()))?;

        match fine {
            Some(ref fine) => tracing::info!(
                "Borrowing {} returned late, fine {} of {} issued",
                id,
                fine.id,
                fine.amount
            ),
            None => tracing::info!("Borrowing {} returned", id),
        }

        Ok(ReturnOutcome {
            message: "Borrowing marked as returned successfully.".to_string(),
            borrowing,
            fine,
        })
    }

    /// Move the due date of a borrowing still in progress
    pub async fn update(&self, id: Uuid, data: UpdateBorrowing) -> AppResult<Borrowing> {
        let borrowing = self.get_by_id(id).await?;

        if !borrowing.is_active() {
            return Err(AppError::Conflict("Borrowing already returned".to_string()));
        }
        if data.due_date < borrowing.borrowed_date {
            return Err(AppError::Validation(
                "Due date cannot be earlier than borrowed date".to_string(),
            ));
        }

        let updated = self
            .borrowings
            .update_due_date(id, data.due_date)
            .await?
            .ok_or_else(|| AppError::NotFound("Borrowing not found".to_string()))?;
        tracing::info!("Borrowing {} now due on {}", id, data.due_date);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.borrowings.delete(id).await? {
            return Err(AppError::NotFound("Borrowing not found".to_string()));
        }
        tracing::info!("Borrowing {} deleted", id);
        Ok(())
    }
}
