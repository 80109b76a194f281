//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod borrowings;
pub mod categories;
pub mod fines;
pub mod recommendations;
pub mod reservations;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use authors::AuthorsRepository;
pub use books::BooksRepository;
pub use borrowings::BorrowingsRepository;
pub use categories::CategoriesRepository;
pub use fines::FinesRepository;
pub use recommendations::RecommendationsRepository;
pub use reservations::ReservationsRepository;
pub use users::UsersRepository;

/// Main repository struct holding the database pool and one repository per table
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: Arc<dyn AuthorsRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub categories: Arc<dyn CategoriesRepository>,
    pub borrowings: Arc<dyn BorrowingsRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub fines: Arc<dyn FinesRepository>,
    pub reservations: Arc<dyn ReservationsRepository>,
    pub recommendations: Arc<dyn RecommendationsRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::PgAuthorsRepository::new(pool.clone())),
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            categories: Arc::new(categories::PgCategoriesRepository::new(pool.clone())),
            borrowings: Arc::new(borrowings::PgBorrowingsRepository::new(pool.clone())),
            users: Arc::new(users::PgUsersRepository::new(pool.clone())),
            fines: Arc::new(fines::PgFinesRepository::new(pool.clone())),
            reservations: Arc::new(reservations::PgReservationsRepository::new(pool.clone())),
            recommendations: Arc::new(recommendations::PgRecommendationsRepository::new(
                pool.clone(),
            )),
            pool,
        }
    }

    /// Round trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
