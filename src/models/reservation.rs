//! Reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Reservation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Waiting for the book
    Active,
    /// The reserving user borrowed the book
    Fulfilled,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "active",
            ReservationStatus::Fulfilled => "fulfilled",
            ReservationStatus::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ReservationStatus::Active),
            "fulfilled" => Ok(ReservationStatus::Fulfilled),
            "canceled" | "cancelled" => Ok(ReservationStatus::Canceled),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

super::impl_text_column!(ReservationStatus);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub user_id: Uuid,
    pub book_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_both_spellings_of_canceled() {
        assert_eq!("canceled".parse::<ReservationStatus>(), Ok(ReservationStatus::Canceled));
        assert_eq!("Cancelled".parse::<ReservationStatus>(), Ok(ReservationStatus::Canceled));
        assert!("pending".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Fulfilled).unwrap();
        assert_eq!(json, "\"fulfilled\"");
    }
}
