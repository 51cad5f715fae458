use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub ai_service: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let ai_status = if !state.estimator.is_configured() {
        "not_configured"
    } else {
        match &state.ai_health {
            Some(health) => match health.check().await {
                Ok(()) => "ok",
                Err(e) => {
                    tracing::warn!(error = %e, "AI service health check failed");
                    "error"
                }
            },
            None => "configured",
        }
    };

    // Everything except estimates works without the AI service
    let status = if matches!(ai_status, "ok" | "configured") {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                ai_service: ai_status.to_string(),
            },
        }),
    )
}
