//! Sale workflow service
//!
//! The core of the system: atomic sale creation with server-side stock
//! enforcement, compensating stock reversal on deletion, listing, detail
//! retrieval, and the filtered sales report.
//!
//! Both creation and deletion run as a single database transaction: the
//! sale row, its line items, and every product stock adjustment commit or
//! roll back together. The guarded decrement
//! (`UPDATE ... WHERE stock >= quantity`) doubles as a row lock, so two
//! concurrent sales of the same product cannot oversell it.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{compute_total, SaleDetail, SaleItemDetail, SaleItemInput, SaleSummary};
use shared::validation::{validate_client_name, validate_discount, validate_sale_items};

/// Sale workflow service
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleInput {
    pub client_name: String,
    /// Optional reference to a registered client; the name above is kept
    /// as a snapshot either way
    pub client_id: Option<Uuid>,
    pub items: Vec<SaleItemInput>,
    pub payment_method: Option<String>,
    pub discount: Option<Decimal>,
    pub observation: Option<String>,
}

/// Query filters for the sales report. Dates arrive as `YYYY-MM-DD`
/// strings; an empty payment method means "no filter".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub payment_method: Option<String>,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a sale with its line items, decrementing product stock.
    ///
    /// The supplied item prices are trusted as the price at time of sale
    /// and are not re-derived from the current product price. The stored
    /// total is the item sum; the discount is recorded but not subtracted.
    pub async fn create_sale(&self, input: CreateSaleInput) -> AppResult<SaleDetail> {
        validate_client_name(&input.client_name)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        validate_sale_items(&input.items)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let total = compute_total(&input.items);
        validate_discount(input.discount, total)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let item_count = input.items.len() as i32;

        let mut tx = self.db.begin().await?;

        // A client reference, when given, must resolve. The lock keeps the
        // row alive until the sale insert commits, so a concurrent client
        // deletion cannot turn this into an FK violation.
        if let Some(client_id) = input.client_id {
            let client = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM clients WHERE id = $1 FOR KEY SHARE",
            )
            .bind(client_id)
            .fetch_optional(&mut *tx)
            .await?;

            if client.is_none() {
                return Err(AppError::NotFound("Client".to_string()));
            }
        }

        let summary = sqlx::query_as::<_, SaleSummary>(
            r#"
            INSERT INTO sales (client_id, client_name, total, item_count, payment_method, discount, observation)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, client_id, client_name, total, item_count, payment_method, discount,
                      observation, created_at
            "#,
        )
        .bind(input.client_id)
        .bind(&input.client_name)
        .bind(total)
        .bind(item_count)
        .bind(&input.payment_method)
        .bind(input.discount)
        .bind(&input.observation)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for (position, item) in input.items.iter().enumerate() {
            let position = position as i32;
            // Guarded decrement: matches only when enough stock remains,
            // and locks the row against concurrent sales
            let product_name = sqlx::query_scalar::<_, String>(
                r#"
                UPDATE products
                SET stock = stock - $1, updated_at = NOW()
                WHERE id = $2 AND stock >= $1
                RETURNING name
                "#,
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let product_name = match product_name {
                Some(name) => name,
                None => {
                    // Distinguish a missing product from insufficient
                    // stock; the transaction rolls back on drop either way
                    let current = sqlx::query_as::<_, (String, i32)>(
                        "SELECT name, stock FROM products WHERE id = $1",
                    )
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    return Err(match current {
                        None => AppError::NotFound("Product".to_string()),
                        Some((name, stock)) => AppError::InsufficientStock {
                            product: name,
                            available: stock,
                            requested: item.quantity,
                        },
                    });
                }
            };

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(summary.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(position)
            .execute(&mut *tx)
            .await?;

            items.push(SaleItemDetail {
                product_id: item.product_id,
                product_name,
                quantity: item.quantity,
                unit_price: item.price,
            });
        }

        tx.commit().await?;

        tracing::info!(sale_id = %summary.id, total = %summary.total, item_count, "Sale created");

        Ok(SaleDetail { summary, items })
    }

    /// Delete a sale, restoring each line item's quantity to its product's
    /// stock. Everything happens in one transaction: on any failure the
    /// sale remains intact with its original stock levels.
    ///
    /// The sale row is removed before stock is touched. Of two concurrent
    /// deletes of the same sale, the loser's DELETE matches zero rows and
    /// it bails with NotFound, so the restore runs exactly once.
    pub async fn delete_sale(&self, sale_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let items = sqlx::query_as::<_, (Uuid, i32)>(
            "SELECT product_id, quantity FROM sale_items WHERE sale_id = $1",
        )
        .bind(sale_id)
        .fetch_all(&mut *tx)
        .await?;

        // Cascades to the sale's line items
        let removed = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::NotFound("Sale".to_string()));
        }

        for (product_id, quantity) in &items {
            let result =
                sqlx::query("UPDATE products SET stock = stock + $1, updated_at = NOW() WHERE id = $2")
                    .bind(quantity)
                    .bind(product_id)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::Internal(format!(
                    "Stock reversal failed: product {} is missing",
                    product_id
                )));
            }
        }

        tx.commit().await?;

        tracing::info!(%sale_id, restored_items = items.len(), "Sale deleted, stock restored");

        Ok(())
    }

    /// List all sales, newest first, without line items
    pub async fn list_sales(&self) -> AppResult<Vec<SaleSummary>> {
        let sales = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT id, client_id, client_name, total, item_count, payment_method, discount,
                   observation, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Get one sale with its line items joined to product names
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<SaleDetail> {
        let summary = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT id, client_id, client_name, total, item_count, payment_method, discount,
                   observation, created_at
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        let items = sqlx::query_as::<_, SaleItemDetail>(
            r#"
            SELECT si.product_id, p.name AS product_name, si.quantity, si.unit_price
            FROM sale_items si
            JOIN products p ON p.id = si.product_id
            WHERE si.sale_id = $1
            ORDER BY si.position
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(SaleDetail { summary, items })
    }

    /// Filtered sales report: start/end dates (whole days, inclusive) and
    /// exact payment method, AND-combined, newest first
    pub async fn report(&self, filter: ReportFilter) -> AppResult<Vec<SaleSummary>> {
        let start = match filter.start_date.as_deref().filter(|s| !s.is_empty()) {
            Some(value) => day_start(parse_filter_date(value, "startDate")?),
            None => day_start(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        };
        let end = match filter.end_date.as_deref().filter(|s| !s.is_empty()) {
            Some(value) => day_end_exclusive(parse_filter_date(value, "endDate")?),
            None => day_end_exclusive(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap()),
        };
        let payment_method = filter.payment_method.unwrap_or_default();

        let sales = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT id, client_id, client_name, total, item_count, payment_method, discount,
                   observation, created_at
            FROM sales
            WHERE created_at >= $1
              AND created_at < $2
              AND ($3 = '' OR payment_method = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(&payment_method)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }
}

/// Parse a `YYYY-MM-DD` report filter value
fn parse_filter_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| AppError::Validation {
        field: field.to_string(),
        message: format!("{} must be a date in YYYY-MM-DD format", field),
    })
}

/// First instant of the given day, UTC
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// First instant of the day after the given day, UTC. Used as an exclusive
/// upper bound so the whole end date is included in the report window.
fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    day_start(next)
}
