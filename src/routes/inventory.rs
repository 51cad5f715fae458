//! Material stock endpoints.

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiJson, ApiPath, ApiResponse, DataResponse};
use crate::app::AppState;
use crate::domain::{LogUsageRequest, StockItem};
use crate::error::{ApiError, ApiResult};
use crate::services::metrics::{self, DaysOfSupply, StockStatus};

/// Stock item with its derived supply figures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: StockItem,
    pub days_of_supply: DaysOfSupply,
    pub status: StockStatus,
    pub low_stock: bool,
}

impl From<StockItem> for StockItemView {
    fn from(item: StockItem) -> Self {
        Self {
            days_of_supply: metrics::days_of_supply(&item),
            status: metrics::stock_status(&item),
            low_stock: metrics::is_low_stock(&item),
            item,
        }
    }
}

/// List stock with supply status
pub async fn list_inventory(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read();

    let meta = serde_json::json!({
        "totalValue": metrics::inventory_value(&store.inventory),
        "lowStockItems": metrics::low_stock_count(&store.inventory),
    });

    let items: Vec<StockItemView> = store
        .inventory
        .iter()
        .cloned()
        .map(StockItemView::from)
        .collect();

    ApiResponse::with_meta(items, meta)
}

/// Record material consumption against an item
pub async fn log_usage(
    State(state): State<Arc<AppState>>,
    ApiPath(item_id): ApiPath<String>,
    ApiJson(req): ApiJson<LogUsageRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.quantity_used == 0 {
        return Err(ApiError::BadRequest(
            "quantityUsed must be greater than zero".to_string(),
        ));
    }

    let item = state
        .store
        .write()
        .log_usage(&item_id, req.quantity_used, chrono::Utc::now())
        .ok_or_else(|| ApiError::NotFound(format!("Stock item {} not found", item_id)))?;

    tracing::info!(
        item_id = %item_id,
        quantity_used = req.quantity_used,
        remaining = item.quantity_in_stock,
        "Material usage logged"
    );

    Ok(DataResponse::new(StockItemView::from(item)))
}
