//! Client (customer) service

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::Client;

/// Client service for customer CRUD
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

/// Input for creating a client
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a client; absent fields keep their current value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all clients
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM clients
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(clients)
    }

    /// Get a client by id
    pub async fn get_client(&self, client_id: Uuid) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client".to_string()))?;

        Ok(client)
    }

    /// Create a client
    pub async fn create_client(&self, input: CreateClientInput) -> AppResult<Client> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(client)
    }

    /// Update a client
    pub async fn update_client(
        &self,
        client_id: Uuid,
        input: UpdateClientInput,
    ) -> AppResult<Client> {
        let existing = self.get_client(client_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let email = input.email.unwrap_or(existing.email);
        let phone = input.phone.or(existing.phone);
        let address = input.address.or(existing.address);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Client name is required".to_string(),
            });
        }
        if !validator::validate_email(&email) {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: "Invalid email address".to_string(),
            });
        }

        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $1, email = $2, phone = $3, address = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(&address)
        .bind(client_id)
        .fetch_one(&self.db)
        .await?;

        Ok(client)
    }

    /// Delete a client. Sales keep their client name snapshot; their
    /// `client_id` reference is cleared by the schema (ON DELETE SET NULL).
    pub async fn delete_client(&self, client_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Client".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_validation() {
        let valid = CreateClientInput {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            address: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateClientInput {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            address: None,
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateClientInput {
            name: String::new(),
            email: "ana@example.com".to_string(),
            phone: None,
            address: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
