//! Fine model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Fine payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FineStatus {
    Unpaid,
    Paid,
}

impl FineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FineStatus::Unpaid => "unpaid",
            FineStatus::Paid => "paid",
        }
    }
}

impl std::str::FromStr for FineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unpaid" => Ok(FineStatus::Unpaid),
            "paid" => Ok(FineStatus::Paid),
            _ => Err(format!("Invalid fine status: {}", s)),
        }
    }
}

super::impl_text_column!(FineStatus);

/// Largest amount a `NUMERIC(10,2)` column holds
pub const MAX_FINE_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Fine record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub id: Uuid,
    pub user_id: Uuid,
    pub borrowing_id: Uuid,
    pub amount: Decimal,
    pub status: FineStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Fine {
    pub fn is_paid(&self) -> bool {
        self.status == FineStatus::Paid
    }
}

/// Fine amounts must be positive and fit the `amount` column
pub fn check_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        Err("Fine amount must be greater than zero")
    } else if amount > MAX_FINE_AMOUNT {
        Err("Fine amount must not exceed 99999999.99")
    } else {
        Ok(())
    }
}

/// Create fine request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFine {
    pub user_id: Uuid,
    pub borrowing_id: Uuid,
    /// Must be greater than zero and at most 99999999.99
    pub amount: Decimal,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Total of the unpaid fines of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FineTotal {
    pub user_id: Uuid,
    pub total: Decimal,
}
