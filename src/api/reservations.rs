//! Reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reservation::{CreateReservation, Reservation},
    AppState,
};

use super::AuthenticatedUser;

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "Book already reserved by this user")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.create(data).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Waiting reservations, oldest first
#[utoipa::path(
    get,
    path = "/reservations/active",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active reservations", body = Vec<Reservation>))
)]
pub async fn list_active(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.list_active().await?;
    Ok(Json(reservations))
}

#[utoipa::path(
    get,
    path = "/reservations/user/{user_id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Reservations of the user", body = Vec<Reservation>),
        (status = 404, description = "No reservations found for this user")
    )
)]
pub async fn list_user_reservations(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.list_by_user(user_id).await?;
    Ok(Json(reservations))
}

#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get_by_id(id).await?;
    Ok(Json(reservation))
}

/// Cancel an active reservation
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation canceled"),
        (status = 404, description = "Reservation not found or already canceled")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.reservations.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
