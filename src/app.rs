use axum::{http::HeaderValue, Router};
use parking_lot::RwLock;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{AiHealth, EstimateSlots, Estimator};
use crate::store::DashboardStore;

/// Shared application state
pub struct AppState {
    pub settings: Settings,
    /// Dashboard collections; the only writer path is the route handlers
    pub store: RwLock<DashboardStore>,
    pub estimator: Arc<dyn Estimator>,
    pub estimate_slots: EstimateSlots,
    /// Capability health check used by `/health`
    pub ai_health: Option<Arc<dyn AiHealth>>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        store: DashboardStore,
        estimator: Arc<dyn Estimator>,
        ai_health: Option<Arc<dyn AiHealth>>,
    ) -> Arc<Self> {
        let slot_ttl = std::time::Duration::from_secs(settings.estimate_slot_ttl_seconds);
        Arc::new(Self {
            settings,
            store: RwLock::new(store),
            estimator,
            estimate_slots: EstimateSlots::new(slot_ttl),
            ai_health,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    // Request ID layers
    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Longer preflight cache in development
    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
