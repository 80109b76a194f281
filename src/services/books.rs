//! Book catalog service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::{AuthorsRepository, BooksRepository, CategoriesRepository},
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BooksRepository>,
    authors: Arc<dyn AuthorsRepository>,
    categories: Arc<dyn CategoriesRepository>,
}

impl BooksService {
    pub fn new(
        books: Arc<dyn BooksRepository>,
        authors: Arc<dyn AuthorsRepository>,
        categories: Arc<dyn CategoriesRepository>,
    ) -> Self {
        Self { books, authors, categories }
    }

    /// Referenced author and category must exist
    async fn check_references(
        &self,
        action: &str,
        author_id: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(author_id) = author_id {
            if self.authors.get_by_id(author_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Unable to {} book: author {} does not exist",
                    action, author_id
                )));
            }
        }
        if let Some(category_id) = category_id {
            if self.categories.get_by_id(category_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Unable to {} book: category {} does not exist",
                    action, category_id
                )));
            }
        }
        Ok(())
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        self.check_references("create", Some(data.author_id), Some(data.category_id))
            .await?;

        let book = self.books.create(&data).await?;
        tracing::info!("Book {} created: {}", book.id, book.title);
        Ok(book)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        self.books.list(limit, offset).await
    }

    pub async fn update(&self, id: Uuid, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.check_references("update", data.author_id, data.category_id)
            .await?;

        let book = self
            .books
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Book {} updated", id);
        Ok(book)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.books.delete(id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        tracing::debug!("Searching books by title: {}", title);
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::NotFound("No books found with this title".to_string()));
        }
        non_empty(
            self.books.search_by_title(title).await?,
            "No books found with this title",
        )
    }

    pub async fn search_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        non_empty(
            self.books.list_by_author(author_id).await?,
            "No books found for this author",
        )
    }

    pub async fn search_by_category(&self, category_id: Uuid) -> AppResult<Vec<Book>> {
        non_empty(
            self.books.list_by_category(category_id).await?,
            "No books found for this category",
        )
    }
}

/// Searches answer 404 rather than an empty list
fn non_empty(books: Vec<Book>, message: &str) -> AppResult<Vec<Book>> {
    if books.is_empty() {
        Err(AppError::NotFound(message.to_string()))
    } else {
        Ok(books)
    }
}
