use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiJson, ApiResponse, Created, DataResponse};
use crate::app::AppState;
use crate::domain::CreateInvoiceRequest;
use crate::error::{ApiError, ApiResult};
use crate::services::metrics;

/// List invoices with paid and outstanding totals
pub async fn list_invoices(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read();
    let totals = metrics::invoice_totals(&store.invoices);

    ApiResponse::with_meta(
        store.invoices.clone(),
        serde_json::json!({
            "paid": totals.paid,
            "outstanding": totals.outstanding,
            "overdueCount": totals.overdue_count,
        }),
    )
}

/// Create a pending invoice
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateInvoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(ApiError::BadRequest)?;

    let invoice = state.store.write().add_invoice(req);
    tracing::info!(invoice_id = %invoice.id, amount = invoice.amount, "Invoice created");

    Ok(Created(DataResponse::new(invoice)))
}
