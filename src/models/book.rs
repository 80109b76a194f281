//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub published_year: Option<i32>,
    pub isbn: Option<String>,
    /// Copies currently on the shelf
    pub copies_available: i32,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
    #[validate(range(min = 0, max = 2100, message = "Invalid publication year"))]
    pub published_year: Option<i32>,
    #[validate(length(min = 10, max = 17, message = "ISBN must be 10-17 characters"))]
    pub isbn: Option<String>,
    /// Defaults to 1
    #[validate(range(min = 0, message = "Copies available cannot be negative"))]
    pub copies_available: Option<i32>,
}

/// Update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0, max = 2100, message = "Invalid publication year"))]
    pub published_year: Option<i32>,
    #[validate(length(min = 10, max = 17, message = "ISBN must be 10-17 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, message = "Copies available cannot be negative"))]
    pub copies_available: Option<i32>,
}
