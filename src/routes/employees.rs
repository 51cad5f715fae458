use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiJson, Created, DataResponse};
use crate::app::AppState;
use crate::domain::CreateEmployeeRequest;
use crate::error::{ApiError, ApiResult};

/// List the team
pub async fn list_employees(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    DataResponse::new(state.store.read().employees.clone())
}

/// Add an employee
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateEmployeeRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(ApiError::BadRequest)?;

    let employee = state.store.write().add_employee(req);
    tracing::info!(employee_id = %employee.id, role = %employee.role, "Employee added");

    Ok(Created(DataResponse::new(employee)))
}
