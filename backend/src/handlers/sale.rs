//! HTTP handlers for the sale workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{SaleDetail, SaleSummary};
use crate::services::sale::{CreateSaleInput, ReportFilter};
use crate::services::SaleService;
use crate::AppState;

/// Create a sale with its line items
pub async fn create_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<(StatusCode, Json<SaleDetail>)> {
    let service = SaleService::new(state.db);
    let sale = service.create_sale(input).await?;

    tracing::debug!(user_id = %current_user.0.user_id, sale_id = %sale.summary.id, "Sale recorded");

    Ok((StatusCode::CREATED, Json(sale)))
}

/// List all sales (summary view, newest first)
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<Vec<SaleSummary>>> {
    let service = SaleService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(sales))
}

/// Get one sale with its line items
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<SaleDetail>> {
    let service = SaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(sale))
}

/// Delete a sale, restoring product stock
pub async fn delete_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sale_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SaleService::new(state.db);
    service.delete_sale(sale_id).await?;

    tracing::debug!(user_id = %current_user.0.user_id, %sale_id, "Sale removed");

    Ok(StatusCode::NO_CONTENT)
}

/// Filtered sales report
pub async fn sales_report(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Vec<SaleSummary>>> {
    let service = SaleService::new(state.db);
    let sales = service.report(filter).await?;
    Ok(Json(sales))
}
