//! Product category service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Category;

/// Category service for CRUD on product categories
#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

/// Input for creating or renaming a category
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(categories)
    }

    /// Get a category by id
    pub async fn get_category(&self, category_id: Uuid) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(category)
    }

    /// Create a category
    pub async fn create_category(&self, input: CategoryInput) -> AppResult<Category> {
        validate_name(&input.name)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        Ok(category)
    }

    /// Rename a category
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: CategoryInput,
    ) -> AppResult<Category> {
        validate_name(&input.name)?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(category)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Category name is required".to_string(),
        });
    }
    Ok(())
}
