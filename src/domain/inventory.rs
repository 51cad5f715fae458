//! Stock and material domain types

use serde::{Deserialize, Serialize};

/// Material held in stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub supplier: String,
    pub rating: f64,
    /// Cost per unit
    pub price: f64,
    pub unit: String,
    pub image_url: String,
    pub quantity_in_stock: u64,
    pub location: String,
    pub reorder_point: u64,
    pub average_daily_usage: u64,
}

/// Request DTO for logging material usage
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogUsageRequest {
    pub quantity_used: u64,
}
