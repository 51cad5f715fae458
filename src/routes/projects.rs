use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiJson, ApiQuery, Created, DataResponse};
use crate::app::AppState;
use crate::domain::{CreateProjectRequest, ProjectQuery};
use crate::error::{ApiError, ApiResult};

/// List projects, optionally filtered by status
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> impl IntoResponse {
    let projects = state.store.read().projects_with_status(query.status);
    DataResponse::new(projects)
}

/// Create a new project
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate().map_err(ApiError::BadRequest)?;

    tracing::info!(project_name = %req.name, client = %req.client, "Creating project");

    let project = state.store.write().add_project(req, chrono::Utc::now());
    Ok(Created(DataResponse::new(project)))
}
