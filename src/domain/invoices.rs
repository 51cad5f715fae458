use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

/// Client invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub client_name: String,
    pub project_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Request DTO for creating an invoice
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub client_name: String,
    pub project_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

impl CreateInvoiceRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.client_name.trim().is_empty() {
            return Err("clientName is required".to_string());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("amount must be a positive number".to_string());
        }
        Ok(())
    }
}
