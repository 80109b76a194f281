//! Recommendation model (computed from borrowing history, never stored)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What the recommendation groups the borrowing history by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationBasis {
    Category,
    Author,
}

impl RecommendationBasis {
    pub fn reason(&self) -> &'static str {
        match self {
            RecommendationBasis::Category => "Based on your favorite category.",
            RecommendationBasis::Author => "Based on your favorite author.",
        }
    }
}

pub const NO_HISTORY_REASON: &str = "No borrowing history available.";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub user_id: Uuid,
    /// Favorite category or author id the books were picked from
    pub based_on: Option<Uuid>,
    pub recommended_books: Vec<Uuid>,
    pub reason: String,
}

impl Recommendation {
    pub fn without_history(user_id: Uuid) -> Self {
        Self {
            user_id,
            based_on: None,
            recommended_books: Vec::new(),
            reason: NO_HISTORY_REASON.to_string(),
        }
    }
}
