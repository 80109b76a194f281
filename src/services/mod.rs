//! Business logic services

pub mod authors;
pub mod books;
pub mod borrowings;
pub mod categories;
pub mod fines;
pub mod recommendations;
pub mod reservations;
pub mod users;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub categories: categories::CategoriesService,
    pub borrowings: borrowings::BorrowingsService,
    pub users: users::UsersService,
    pub fines: fines::FinesService,
    pub reservations: reservations::ReservationsService,
    pub recommendations: recommendations::RecommendationsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let r = &repository;
        Self {
            authors: authors::AuthorsService::new(r.authors.clone(), r.books.clone()),
            books: books::BooksService::new(r.books.clone(), r.authors.clone(), r.categories.clone()),
            categories: categories::CategoriesService::new(r.categories.clone()),
            borrowings: borrowings::BorrowingsService::new(
                r.borrowings.clone(),
                r.users.clone(),
                r.books.clone(),
                config.borrowing.clone(),
            ),
            users: users::UsersService::new(r.users.clone(), config.auth.clone()),
            fines: fines::FinesService::new(r.fines.clone(), r.borrowings.clone()),
            reservations: reservations::ReservationsService::new(
                r.reservations.clone(),
                r.users.clone(),
                r.books.clone(),
            ),
            recommendations: recommendations::RecommendationsService::new(r.recommendations.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
