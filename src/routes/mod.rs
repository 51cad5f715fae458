pub mod dashboard;
pub mod employees;
pub mod estimates;
pub mod health;
pub mod hiring;
pub mod inventory;
pub mod invoices;
pub mod notifications;
pub mod projects;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // AI cost estimates
        .route("/estimates", post(estimates::submit_estimate))
        .route("/estimates/options", get(estimates::estimate_options))
        .route(
            "/estimates/:form_id",
            get(estimates::get_estimate).delete(estimates::discard_estimate),
        )
        // Dashboard summaries
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/reports", get(dashboard::get_reports))
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        // Materials
        .route("/inventory", get(inventory::list_inventory))
        .route("/inventory/:item_id/usage", post(inventory::log_usage))
        // Team
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        // Hiring
        .route("/jobs", get(hiring::list_jobs))
        .route(
            "/applicants",
            get(hiring::list_applicants).post(hiring::create_applicant),
        )
        .route(
            "/applicants/:applicant_id/stage",
            patch(hiring::update_applicant_stage),
        )
        // Finance
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
