//! Category management service

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::CategoriesRepository,
};

#[derive(Clone)]
pub struct CategoriesService {
    categories: Arc<dyn CategoriesRepository>,
}

impl CategoriesService {
    pub fn new(categories: Arc<dyn CategoriesRepository>) -> Self {
        Self { categories }
    }

    pub async fn create(&self, data: CreateCategory) -> AppResult<Category> {
        data.validate()?;
        let category = self.categories.create(&data).await?;
        tracing::info!("Category {} created: {}", category.id, category.name);
        Ok(category)
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found.".to_string()))
    }

    pub async fn update(&self, id: Uuid, data: UpdateCategory) -> AppResult<Category> {
        data.validate()?;
        self.categories
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found.".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.categories.delete(id).await? {
            return Err(AppError::NotFound("Category not found.".to_string()));
        }
        tracing::info!("Category {} deleted", id);
        Ok(())
    }
}
