//! Reservations service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation},
    repository::{BooksRepository, ReservationsRepository, UsersRepository},
};

#[derive(Clone)]
pub struct ReservationsService {
    reservations: Arc<dyn ReservationsRepository>,
    users: Arc<dyn UsersRepository>,
    books: Arc<dyn BooksRepository>,
}

impl ReservationsService {
    pub fn new(
        reservations: Arc<dyn ReservationsRepository>,
        users: Arc<dyn UsersRepository>,
        books: Arc<dyn BooksRepository>,
    ) -> Self {
        Self { reservations, users, books }
    }

    pub async fn create(&self, data: CreateReservation) -> AppResult<Reservation> {
        if self.users.get_by_id(data.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if self.books.get_by_id(data.book_id).await?.is_none() {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if self.reservations.has_active(data.user_id, data.book_id).await? {
            return Err(AppError::Conflict(
                "You already have an active reservation for this book".to_string(),
            ));
        }

        let reservation = self.reservations.create(&data).await?;
        tracing::info!(
            "Book {} reserved by user {} ({})",
            reservation.book_id,
            reservation.user_id,
            reservation.id
        );
        Ok(reservation)
    }

    pub async fn list_active(&self) -> AppResult<Vec<Reservation>> {
        self.reservations.list_active().await
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        let reservations = self.reservations.list_by_user(user_id).await?;
        if reservations.is_empty() {
            return Err(AppError::NotFound("No reservations found for this user.".to_string()));
        }
        Ok(reservations)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation> {
        self.reservations
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation not found.".to_string()))
    }

    /// Cancel keeps the row, only its status changes
    pub async fn cancel(&self, id: Uuid) -> AppResult<()> {
        if !self.reservations.cancel(id).await? {
            return Err(AppError::NotFound(
                "Reservation not found or already canceled.".to_string(),
            ));
        }
        tracing::info!("Reservation {} canceled", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{book::Book, reservation::ReservationStatus, user::User};
    use crate::repository::{
        books::MockBooksRepository, reservations::MockReservationsRepository,
        users::MockUsersRepository,
    };

    fn users(found: bool) -> MockUsersRepository {
        let mut users = MockUsersRepository::new();
        users.expect_get_by_id().returning(move |id| {
            Ok(found.then(|| User {
                id,
                email: "reader@example.com".to_string(),
                password: String::new(),
                created_at: Utc::now(),
            }))
        });
        users
    }

    fn books(found: bool) -> MockBooksRepository {
        let mut books = MockBooksRepository::new();
        books.expect_get_by_id().returning(move |id| {
            Ok(found.then(|| Book {
                id,
                title: "Earthsea".to_string(),
                author_id: Uuid::new_v4(),
                category_id: Uuid::new_v4(),
                published_year: None,
                isbn: None,
                copies_available: 0,
                created_at: Utc::now(),
            }))
        });
        books
    }

    fn request() -> CreateReservation {
        CreateReservation {
            user_id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn reservation_needs_user_and_book() {
        let mut reservations = MockReservationsRepository::new();
        reservations.expect_create().never();
        let reservations = Arc::new(reservations);

        let service = ReservationsService::new(reservations.clone(), Arc::new(users(false)), Arc::new(books(true)));
        let err = service.create(request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "User not found"));

        let service = ReservationsService::new(reservations, Arc::new(users(true)), Arc::new(books(false)));
        let err = service.create(request()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Book not found"));
    }

    #[tokio::test]
    async fn second_active_reservation_conflicts() {
        let mut reservations = MockReservationsRepository::new();
        reservations.expect_has_active().returning(|_, _| Ok(true));
        reservations.expect_create().never();

        let service = ReservationsService::new(Arc::new(reservations), Arc::new(users(true)), Arc::new(books(true)));
        let err = service.create(request()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn reservation_is_created_active() {
        let mut reservations = MockReservationsRepository::new();
        reservations.expect_has_active().returning(|_, _| Ok(false));
        reservations.expect_create().returning(|data| {
            Ok(Reservation {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                book_id: data.book_id,
                status: ReservationStatus::Active,
                reserved_at: Utc::now(),
            })
        });

        let service = ReservationsService::new(Arc::new(reservations), Arc::new(users(true)), Arc::new(books(true)));
        let created = service.create(request()).await.unwrap();
        assert_eq!(created.status, ReservationStatus::Active);
    }

    #[tokio::test]
    async fn cancel_and_lookups_of_missing_reservations() {
        let mut reservations = MockReservationsRepository::new();
        reservations.expect_cancel().returning(|_| Ok(false));
        reservations.expect_get_by_id().returning(|_| Ok(None));
        reservations.expect_list_by_user().returning(|_| Ok(Vec::new()));

        let service = ReservationsService::new(Arc::new(reservations), Arc::new(users(true)), Arc::new(books(true)));

        let err = service.cancel(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Reservation not found or already canceled."));

        let err = service.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Reservation not found."));

        let err = service.list_by_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No reservations found for this user."));
    }
}
