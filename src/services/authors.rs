//! Author management service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::Book,
    },
    repository::{AuthorsRepository, BooksRepository},
};

#[derive(Clone)]
pub struct AuthorsService {
    authors: Arc<dyn AuthorsRepository>,
    books: Arc<dyn BooksRepository>,
}

impl AuthorsService {
    pub fn new(authors: Arc<dyn AuthorsRepository>, books: Arc<dyn BooksRepository>) -> Self {
        Self { authors, books }
    }

    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.authors.create(&data).await?;
        tracing::info!("Author {} created", author.id);
        Ok(author)
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found.".to_string()))
    }

    /// Books written by an author; an author without books is reported as not found
    pub async fn books(&self, id: Uuid) -> AppResult<Vec<Book>> {
        self.get_by_id(id).await?;
        let books = self.books.list_by_author(id).await?;
        if books.is_empty() {
            return Err(AppError::NotFound("No books found for this author.".to_string()));
        }
        Ok(books)
    }

    pub async fn update(&self, id: Uuid, data: UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self
            .authors
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found.".to_string()))?;
        tracing::info!("Author {} updated", id);
        Ok(author)
    }

    /// Delete an author and, by cascade, their books
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.authors.delete(id).await? {
            return Err(AppError::NotFound("Author not found".to_string()));
        }
        tracing::info!("Author {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::{authors::MockAuthorsRepository, books::MockBooksRepository};

    fn author(id: Uuid) -> Author {
        Author {
            id,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_names() {
        let mut authors = MockAuthorsRepository::new();
        authors.expect_create().never();

        let service = AuthorsService::new(Arc::new(authors), Arc::new(MockBooksRepository::new()));
        let err = service
            .create(CreateAuthor {
                first_name: String::new(),
                last_name: "Le Guin".to_string(),
                date_of_birth: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn books_of_unknown_author_is_not_found() {
        let mut authors = MockAuthorsRepository::new();
        authors.expect_get_by_id().returning(|_| Ok(None));
        let mut books = MockBooksRepository::new();
        books.expect_list_by_author().never();

        let service = AuthorsService::new(Arc::new(authors), Arc::new(books));
        let err = service.books(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Author not found."));
    }

    #[tokio::test]
    async fn author_without_books_is_reported() {
        let mut authors = MockAuthorsRepository::new();
        authors.expect_get_by_id().returning(|id| Ok(Some(author(id))));
        let mut books = MockBooksRepository::new();
        books.expect_list_by_author().returning(|_| Ok(Vec::new()));

        let service = AuthorsService::new(Arc::new(authors), Arc::new(books));
        let err = service.books(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No books found for this author."));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_author() {
        let mut authors = MockAuthorsRepository::new();
        authors.expect_update().returning(|_, _| Ok(None));
        authors.expect_delete().returning(|_| Ok(false));

        let service = AuthorsService::new(Arc::new(authors), Arc::new(MockBooksRepository::new()));
        let update = service.update(Uuid::new_v4(), UpdateAuthor::default()).await;
        assert!(matches!(update, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }
}
