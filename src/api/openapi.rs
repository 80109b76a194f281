//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    authors, books, borrowings, categories, fines, health, recommendations, reservations, users,
    MessageResponse,
};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LibraryAPI",
        version = "1.0.0",
        description = "Library management REST API: catalog, borrowings, fines, reservations and recommendations"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::register,
        users::login,
        users::list_users,
        users::me,
        users::get_user,
        users::get_user_by_email,
        users::update_user,
        users::delete_user,
        // Authors
        authors::create_author,
        authors::list_authors,
        authors::get_author,
        authors::get_author_books,
        authors::update_author,
        authors::delete_author,
        // Categories
        categories::create_category,
        categories::list_categories,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
        books::search_by_title,
        books::search_by_author,
        books::search_by_category,
        // Borrowings
        borrowings::create_borrowing,
        borrowings::list_borrowings,
        borrowings::get_borrowing,
        borrowings::list_active,
        borrowings::list_history,
        borrowings::return_borrowing,
        borrowings::update_borrowing,
        borrowings::delete_borrowing,
        // Fines
        fines::create_fine,
        fines::get_fine,
        fines::list_user_fines,
        fines::list_unpaid_fines,
        fines::pay_fine,
        fines::total_unpaid,
        // Reservations
        reservations::create_reservation,
        reservations::list_active,
        reservations::list_user_reservations,
        reservations::get_reservation,
        reservations::cancel_reservation,
        // Recommendations
        recommendations::by_category,
        recommendations::by_author,
    ),
    components(
        schemas(
            // Users
            models::user::User,
            models::user::RegisterUser,
            models::user::Credentials,
            models::user::UpdateUser,
            models::user::TokenResponse,
            // Catalog
            models::author::Author,
            models::author::CreateAuthor,
            models::author::UpdateAuthor,
            models::category::Category,
            models::category::CreateCategory,
            models::category::UpdateCategory,
            models::book::Book,
            models::book::CreateBook,
            models::book::UpdateBook,
            // Borrowings
            models::borrowing::Borrowing,
            models::borrowing::CreateBorrowing,
            models::borrowing::UpdateBorrowing,
            models::borrowing::ReturnOutcome,
            // Fines
            models::fine::Fine,
            models::fine::FineStatus,
            models::fine::CreateFine,
            models::fine::FineTotal,
            // Reservations
            models::reservation::Reservation,
            models::reservation::ReservationStatus,
            models::reservation::CreateReservation,
            // Recommendations
            models::recommendation::Recommendation,
            // Misc
            health::HealthResponse,
            MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Accounts and authentication"),
        (name = "authors", description = "Author management"),
        (name = "categories", description = "Category management"),
        (name = "books", description = "Book catalog"),
        (name = "borrowings", description = "Lending and returns"),
        (name = "fines", description = "Fines"),
        (name = "reservations", description = "Reservations"),
        (name = "recommendations", description = "Recommendations from borrowing history")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_paths_and_security_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/borrowings/{id}/return"));
        assert!(doc.paths.paths.contains_key("/recommendations/by-author/{user_id}"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
