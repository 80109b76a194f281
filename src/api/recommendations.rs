//! Recommendation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{error::AppResult, models::recommendation::Recommendation, AppState};

use super::AuthenticatedUser;

/// Unread books from the user's favorite category
#[utoipa::path(
    get,
    path = "/recommendations/by-category/{user_id}",
    tag = "recommendations",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Recommended books", body = Recommendation))
)]
pub async fn by_category(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Recommendation>> {
    let recommendation = state.services.recommendations.by_category(user_id).await?;
    Ok(Json(recommendation))
}

/// Unread books from the user's favorite author
#[utoipa::path(
    get,
    path = "/recommendations/by-author/{user_id}",
    tag = "recommendations",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Recommended books", body = Recommendation))
)]
pub async fn by_author(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Recommendation>> {
    let recommendation = state.services.recommendations.by_author(user_id).await?;
    Ok(Json(recommendation))
}
