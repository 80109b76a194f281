//! Borrowing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::borrowing::{Borrowing, CreateBorrowing, ReturnOutcome, ReturnQuery, UpdateBorrowing},
    AppState,
};

use super::AuthenticatedUser;

/// Lend a book to a user
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowing,
    responses(
        (status = 201, description = "Borrowing created", body = Borrowing),
        (status = 400, description = "Due date before borrowed date"),
        (status = 404, description = "User or book not found"),
        (status = 422, description = "No copies available")
    )
)]
pub async fn create_borrowing(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<Borrowing>)> {
    let borrowing = state.services.borrowings.create(data).await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

#[utoipa::path(
    get,
    path = "/borrowings",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All borrowings, newest first", body = Vec<Borrowing>))
)]
pub async fn list_borrowings(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state.services.borrowings.list().await?;
    Ok(Json(borrowings))
}

#[utoipa::path(
    get,
    path = "/borrowings/{id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Borrowing ID")),
    responses(
        (status = 200, description = "Borrowing details", body = Borrowing),
        (status = 404, description = "Borrowing not found")
    )
)]
pub async fn get_borrowing(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Borrowing>> {
    let borrowing = state.services.borrowings.get_by_id(id).await?;
    Ok(Json(borrowing))
}

/// Books a user currently holds
#[utoipa::path(
    get,
    path = "/borrowings/active/{user_id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Active borrowings", body = Vec<Borrowing>))
)]
pub async fn list_active(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state.services.borrowings.list_active(user_id).await?;
    Ok(Json(borrowings))
}

/// Books a user has given back
#[utoipa::path(
    get,
    path = "/borrowings/history/{user_id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "Returned borrowings", body = Vec<Borrowing>))
)]
pub async fn list_history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Borrowing>>> {
    let borrowings = state.services.borrowings.list_history(user_id).await?;
    Ok(Json(borrowings))
}

/// Mark a borrowing as returned
#[utoipa::path(
    patch,
    path = "/borrowings/{id}/return",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Borrowing ID"), ReturnQuery),
    responses(
        (status = 200, description = "Book returned, with the late fee if any", body = ReturnOutcome),
        (status = 400, description = "Return date before borrowed date"),
        (status = 404, description = "Borrowing not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_borrowing(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ReturnQuery>,
) -> AppResult<Json<ReturnOutcome>> {
    let outcome = state
        .services
        .borrowings
        .return_book(id, query.return_date)
        .await?;
    Ok(Json(outcome))
}

/// Change the due date of an active borrowing
#[utoipa::path(
    put,
    path = "/borrowings/{id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Borrowing ID")),
    request_body = UpdateBorrowing,
    responses(
        (status = 200, description = "Borrowing updated", body = Borrowing),
        (status = 400, description = "Due date before borrowed date"),
        (status = 404, description = "Borrowing not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn update_borrowing(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBorrowing>,
) -> AppResult<Json<Borrowing>> {
    let borrowing = state.services.borrowings.update(id, data).await?;
    Ok(Json(borrowing))
}

#[utoipa::path(
    delete,
    path = "/borrowings/{id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Borrowing ID")),
    responses(
        (status = 204, description = "Borrowing deleted"),
        (status = 404, description = "Borrowing not found")
    )
)]
pub async fn delete_borrowing(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.borrowings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
