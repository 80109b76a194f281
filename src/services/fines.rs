//! Fines service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::fine::{check_amount, CreateFine, Fine, FineTotal},
    repository::{BorrowingsRepository, FinesRepository},
};

#[derive(Clone)]
pub struct FinesService {
    fines: Arc<dyn FinesRepository>,
    borrowings: Arc<dyn BorrowingsRepository>,
}

impl FinesService {
    pub fn new(fines: Arc<dyn FinesRepository>, borrowings: Arc<dyn BorrowingsRepository>) -> Self {
        Self { fines, borrowings }
    }

    /// Issue a fine against one of the user's borrowings
    pub async fn create(&self, data: CreateFine) -> AppResult<Fine> {
        data.validate()?;

        check_amount(data.amount).map_err(|msg| AppError::Validation(msg.to_string()))?;

        match self.borrowings.get_by_id(data.borrowing_id).await? {
            Some(borrowing) if borrowing.user_id == data.user_id => {}
            _ => {
                return Err(AppError::Validation(
                    "Borrowing does not exist for this user".to_string(),
                ))
            }
        }

        let fine = self.fines.create(&data).await?;
        tracing::info!("Fine {} of {} issued to user {}", fine.id, fine.amount, fine.user_id);
        Ok(fine)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Fine> {
        self.fines
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fine not found".to_string()))
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Fine>> {
        let fines = self.fines.list_by_user(user_id).await?;
        if fines.is_empty() {
            return Err(AppError::NotFound("No fines found for this user.".to_string()));
        }
        Ok(fines)
    }

    pub async fn list_unpaid(&self, user_id: Uuid) -> AppResult<Vec<Fine>> {
        self.fines.list_unpaid_by_user(user_id).await
    }

    pub async fn pay(&self, id: Uuid) -> AppResult<Fine> {
        let fine = self.get_by_id(id).await?;
        if fine.is_paid() {
            return Err(AppError::Conflict("Fine is already paid".to_string()));
        }

        // Paid concurrently between the read and the update
        let paid = self
            .fines
            .mark_paid(id)
            .await?
            .ok_or_else(|| AppError::Conflict("Fine is already paid".to_string()))?;
        tracing::info!("Fine {} paid", id);
        Ok(paid)
    }

    pub async fn total_unpaid(&self, user_id: Uuid) -> AppResult<FineTotal> {
        let total = self.fines.total_unpaid(user_id).await?;
        Ok(FineTotal { user_id, total })
    }
}
