use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiJson, ApiPath, Created, DataResponse};
use crate::app::AppState;
use crate::domain::{CreateApplicantRequest, UpdateStageRequest};
use crate::error::{ApiError, ApiResult};

/// List open job postings
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    DataResponse::new(state.store.read().jobs.clone())
}

/// List applicants in the hiring pipeline
pub async fn list_applicants(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    DataResponse::new(state.store.read().applicants.clone())
}

/// Add a candidate
pub async fn create_applicant(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateApplicantRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(ApiError::BadRequest)?;

    let applicant = state
        .store
        .write()
        .add_applicant(req, chrono::Utc::now())
        .map_err(ApiError::BadRequest)?;

    tracing::info!(applicant_id = %applicant.id, job_id = ?applicant.job_id, "Applicant added");

    Ok(Created(DataResponse::new(applicant)))
}

/// Move an applicant to another pipeline stage
pub async fn update_applicant_stage(
    State(state): State<Arc<AppState>>,
    ApiPath(applicant_id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateStageRequest>,
) -> ApiResult<impl IntoResponse> {
    let applicant = state
        .store
        .write()
        .update_applicant_stage(&applicant_id, req.stage)
        .ok_or_else(|| ApiError::NotFound(format!("Applicant {} not found", applicant_id)))?;

    tracing::info!(applicant_id = %applicant_id, stage = ?applicant.stage, "Applicant stage updated");

    Ok(DataResponse::new(applicant))
}
