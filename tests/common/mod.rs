#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use constructai_backend::{
    app::{create_app, AppState},
    config::Settings,
    domain::estimate::{CostEstimate, CostEstimateRequest},
    services::{EstimateError, Estimator},
    store::DashboardStore,
};
use serde_json::Value;
use tokio::sync::Notify;
use tower::ServiceExt;

pub const SAMPLE_ESTIMATE: &str = r#"{
    "estimatedTotalCost": {"min": 450000, "max": 520000},
    "costBreakdown": [
        {"category": "Foundation", "cost": 60000, "percentage": 12.5, "details": "Concrete slab"},
        {"category": "Framing", "cost": 110000, "percentage": 22.5, "details": "Timber frame"},
        {"category": "Finishes", "cost": 310000, "percentage": 65, "details": "Interior and exterior"}
    ],
    "timelineEstimate": "10-12 months",
    "contingency": {"percentage": 10, "amount": 48500},
    "summary": "A two-storey brick house at standard quality."
}"#;

pub fn sample_estimate() -> CostEstimate {
    serde_json::from_str(SAMPLE_ESTIMATE).expect("sample estimate")
}

pub fn test_settings() -> Settings {
    Settings::from_lookup(|_| None).expect("default settings")
}

pub fn app_with(estimator: Arc<dyn Estimator>) -> Router {
    let state = AppState::new(test_settings(), DashboardStore::seeded(), estimator, None);
    create_app(state)
}

pub fn estimate_body(form_id: uuid::Uuid) -> Value {
    serde_json::json!({
        "formId": form_id,
        "projectType": "Residential House",
        "area": 2500,
        "floors": 2,
        "quality": "Standard",
        "materials": "Brick and timber",
        "features": "Solar panels"
    })
}

/// Send one request through the router and decode the JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Estimator returning a fixed outcome.
pub struct FixedEstimator {
    pub outcome: Result<CostEstimate, EstimateError>,
    pub configured: bool,
}

impl FixedEstimator {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(sample_estimate()),
            configured: true,
        })
    }

    pub fn failing(error: EstimateError) -> Arc<Self> {
        let configured = !matches!(error, EstimateError::Configuration);
        Arc::new(Self {
            outcome: Err(error),
            configured,
        })
    }
}

#[async_trait]
impl Estimator for FixedEstimator {
    async fn estimate(&self, _request: &CostEstimateRequest) -> Result<CostEstimate, EstimateError> {
        self.outcome.clone()
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Estimator that holds each request until released.
#[derive(Default)]
pub struct GatedEstimator {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl Estimator for GatedEstimator {
    async fn estimate(&self, _request: &CostEstimateRequest) -> Result<CostEstimate, EstimateError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(sample_estimate())
    }

    fn is_configured(&self) -> bool {
        true
    }
}
