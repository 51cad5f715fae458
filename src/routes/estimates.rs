//! AI cost estimate endpoints.
//!
//! One estimate may be in flight per form. The estimate runs on its own task so that a
//! dropped connection still settles the form's slot; a discarded form simply ignores
//! the late result.

use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{ApiJson, ApiPath, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::estimate::{
    EstimateOptionsResponse, ProjectType, QualityLevel, SubmitEstimateRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::request_id::RequestIdExt;

/// Generate a cost estimate for a form submission.
///
/// POST /estimates
pub async fn submit_estimate(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SubmitEstimateRequest>,
) -> ApiResult<impl IntoResponse> {
    let SubmitEstimateRequest { form_id, request } = req;

    request.validate().map_err(ApiError::BadRequest)?;

    let ticket = state
        .estimate_slots
        .begin(form_id)
        .map_err(|e| ApiError::Conflict(e.to_string()))?;

    tracing::info!(
        form_id = %form_id,
        request_id = headers.request_id().unwrap_or("-"),
        project_type = %request.project_type,
        area = request.area,
        floors = request.floors,
        "Estimate requested"
    );

    let task_state = state.clone();
    let outcome = tokio::spawn(async move {
        let outcome = task_state.estimator.estimate(&request).await;
        task_state.estimate_slots.complete(ticket, &outcome);
        outcome
    })
    .await;

    match outcome {
        Ok(result) => Ok(DataResponse::new(result?)),
        Err(e) => {
            state.estimate_slots.abandon(ticket);
            Err(ApiError::Internal(anyhow::anyhow!("estimate task failed: {}", e)))
        }
    }
}

/// Current state of a form's estimate.
///
/// GET /estimates/:form_id
pub async fn get_estimate(
    ApiPath(form_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let view = state
        .estimate_slots
        .view(form_id)
        .ok_or_else(|| ApiError::NotFound(format!("No estimate for form {}", form_id)))?;

    Ok(DataResponse::new(view))
}

/// Discard a form. A pending estimate for it is dropped when it completes.
///
/// DELETE /estimates/:form_id
pub async fn discard_estimate(
    ApiPath(form_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
) -> NoContent {
    let existed = state.estimate_slots.discard(form_id);
    tracing::debug!(form_id = %form_id, existed = existed, "Estimate form discarded");
    NoContent
}

/// Values accepted by the estimator form.
///
/// GET /estimates/options
pub async fn estimate_options() -> impl IntoResponse {
    DataResponse::new(EstimateOptionsResponse {
        project_types: ProjectType::ALL.to_vec(),
        quality_levels: QualityLevel::ALL.to_vec(),
    })
}
