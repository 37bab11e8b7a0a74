//! Product catalog service

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Product;

/// Product service for catalog CRUD
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
}

/// Input for updating a product; absent fields keep their current value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock, category_id, created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Get a product by id
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock, category_id, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_name(&input.name)?;
        validate_price(input.price)?;

        let stock = input.stock.unwrap_or(0);
        validate_stock(stock)?;

        self.check_category(input.category_id).await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, stock, category_id, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(stock)
        .bind(input.category_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Update a product
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let price = input.price.unwrap_or(existing.price);
        let stock = input.stock.unwrap_or(existing.stock);
        let category_id = input.category_id.or(existing.category_id);

        validate_name(&name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        if input.category_id.is_some() {
            self.check_category(input.category_id).await?;
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, price = $2, stock = $3, category_id = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, price, stock, category_id, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Delete a product. Products referenced by sale line items are kept
    /// to preserve sale history.
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sale_items WHERE product_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict(
                "Product is referenced by existing sales".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// A category reference, when given, must resolve
    async fn check_category(&self, category_id: Option<Uuid>) -> AppResult<()> {
        if let Some(category_id) = category_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            )
            .bind(category_id)
            .fetch_one(&self.db)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Product name is required".to_string(),
        });
    }
    Ok(())
}

fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation {
            field: "price".to_string(),
            message: "Price cannot be negative".to_string(),
        });
    }
    Ok(())
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::Validation {
            field: "stock".to_string(),
            message: "Stock cannot be negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Coffee").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("  ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from_str("19.90").unwrap()).is_ok());
        assert!(validate_price(Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }
}
