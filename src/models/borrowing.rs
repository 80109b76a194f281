//! Borrowing (loan) model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::fine::Fine;

/// Borrowing record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrowing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrowed_date: NaiveDate,
    /// Planned return date
    pub due_date: Option<NaiveDate>,
    /// Actual return date, `None` while the book is out
    pub returned_date: Option<NaiveDate>,
}

impl Borrowing {
    pub fn is_active(&self) -> bool {
        self.returned_date.is_none()
    }

    /// Fine owed when the book comes back on `returned`
    pub fn overdue_fine(&self, returned: NaiveDate, fine_per_day: Decimal) -> Option<Decimal> {
        let due = self.due_date?;
        let days = (returned - due).num_days();
        if days <= 0 {
            return None;
        }
        fine_per_day
            .checked_mul(Decimal::from(days))
            .filter(|fee| *fee > Decimal::ZERO)
    }
}

/// Create borrowing request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBorrowing {
    pub user_id: Uuid,
    pub book_id: Uuid,
    /// Defaults to today
    pub borrowed_date: Option<NaiveDate>,
    /// Defaults to the configured loan duration after `borrowed_date`
    pub due_date: Option<NaiveDate>,
}

/// Fully resolved borrowing ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowing {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrowed_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Update borrowing request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBorrowing {
    pub due_date: NaiveDate,
}

/// Return query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReturnQuery {
    /// Defaults to today
    pub return_date: Option<NaiveDate>,
}

/// Result of returning a book
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReturnOutcome {
    pub message: String,
    pub borrowing: Borrowing,
    /// Fine issued automatically for a late return
    pub fine: Option<Fine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrowing(due: Option<NaiveDate>) -> Borrowing {
        Borrowing {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            borrowed_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: due,
            returned_date: None,
        }
    }

    #[test]
    fn late_return_is_charged_per_day() {
        let b = borrowing(NaiveDate::from_ymd_opt(2024, 3, 15));
        let returned = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        assert_eq!(b.overdue_fine(returned, Decimal::new(500, 2)), Some(Decimal::new(1500, 2)));
    }

    #[test]
    fn on_time_return_costs_nothing() {
        let b = borrowing(NaiveDate::from_ymd_opt(2024, 3, 15));
        let same_day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let early = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(b.overdue_fine(same_day, Decimal::ONE), None);
        assert_eq!(b.overdue_fine(early, Decimal::ONE), None);
    }

    #[test]
    fn no_due_date_means_no_fine() {
        let b = borrowing(None);
        let returned = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(b.overdue_fine(returned, Decimal::ONE), None);
    }

    #[test]
    fn free_late_days_mean_no_fine() {
        let b = borrowing(NaiveDate::from_ymd_opt(2024, 3, 15));
        let returned = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(b.overdue_fine(returned, Decimal::ZERO), None);
    }
}
