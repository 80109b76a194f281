//! Fine endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::fine::{CreateFine, Fine, FineTotal},
    AppState,
};

use super::{AuthenticatedUser, MessageResponse};

#[utoipa::path(
    post,
    path = "/fines",
    tag = "fines",
    security(("bearer_auth" = [])),
    request_body = CreateFine,
    responses(
        (status = 201, description = "Fine issued", body = Fine),
        (status = 400, description = "Invalid amount or borrowing")
    )
)]
pub async fn create_fine(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateFine>,
) -> AppResult<(StatusCode, Json<Fine>)> {
    let fine = state.services.fines.create(data).await?;
    Ok((StatusCode::CREATED, Json(fine)))
}

#[utoipa::path(
    get,
    path = "/fines/{id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Fine ID")),
    responses(
        (status = 200, description = "Fine details", body = Fine),
        (status = 404, description = "Fine not found")
    )
)]
pub async fn get_fine(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Fine>> {
    let fine = state.services.fines.get_by_id(id).await?;
    Ok(Json(fine))
}

#[utoipa::path(
    get,
    path = "/fines/user/{user_id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "All fines of the user", body = Vec<Fine>),
        (status = 404, description = "No fines found for this user")
    )
)]
pub async fn list_user_fines(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Fine>>> {
    let fines = state.services.fines.list_by_user(user_id).await?;
    Ok(Json(fines))
}

#[utoipa::path(
    get,
    path = "/fines/unpaid/{user_id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Unpaid fines of the user", body = Vec<Fine>))
)]
pub async fn list_unpaid_fines(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Fine>>> {
    let fines = state.services.fines.list_unpaid(user_id).await?;
    Ok(Json(fines))
}

#[utoipa::path(
    patch,
    path = "/fines/{id}/pay",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Fine ID")),
    responses(
        (status = 200, description = "Fine paid", body = MessageResponse),
        (status = 404, description = "Fine not found"),
        (status = 409, description = "Fine already paid")
    )
)]
pub async fn pay_fine(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.fines.pay(id).await?;
    Ok(MessageResponse::new("Fine marked as paid"))
}

/// Sum of the unpaid fines of a user
#[utoipa::path(
    get,
    path = "/fines/unpaid/total/{user_id}",
    tag = "fines",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Amount owed", body = FineTotal))
)]
pub async fn total_unpaid(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<FineTotal>> {
    let total = state.services.fines.total_unpaid(user_id).await?;
    Ok(Json(total))
}
