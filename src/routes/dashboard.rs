//! Dashboard and reports summaries.
//!
//! Both are recomputed from the current store snapshot on every request.

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{Project, ProjectStatus};
use crate::services::metrics::{self, InvoiceTotals};

/// Number of active projects highlighted on the dashboard.
const HIGHLIGHTED_PROJECTS: usize = 2;

/// Number of materials charted in the materials report.
const CHARTED_MATERIALS: usize = 5;

/// Longest material label in chart series.
const CHART_LABEL_CHARS: usize = 15;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_projects: usize,
    pub on_track_projects: usize,
    pub total_employees: usize,
    pub active_employees: usize,
    pub low_stock_items: usize,
    pub inventory_value: f64,
    pub outstanding_invoices: f64,
    pub unread_notifications: usize,
    pub highlighted_projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub active_count: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub total_count: usize,
    pub active_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStats {
    pub item_count: usize,
    pub reorder_alerts: usize,
    pub total_value: f64,
}

#[derive(Debug, Serialize)]
pub struct StatusPoint {
    pub name: ProjectStatus,
    pub projects: usize,
}

#[derive(Debug, Serialize)]
pub struct RolePoint {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPoint {
    pub name: String,
    pub in_stock: u64,
    pub reorder_point: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsSummary {
    pub projects: ProjectStats,
    pub team: TeamStats,
    pub materials: MaterialStats,
    pub finance: InvoiceTotals,
    pub project_status: Vec<StatusPoint>,
    pub team_roles: Vec<RolePoint>,
    pub material_stock: Vec<MaterialPoint>,
}

/// GET /dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read();

    let highlighted_projects = store
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::InProgress)
        .take(HIGHLIGHTED_PROJECTS)
        .cloned()
        .collect();

    DataResponse::new(DashboardSummary {
        active_projects: metrics::active_project_count(&store.projects),
        on_track_projects: metrics::on_track_count(&store.projects),
        total_employees: store.employees.len(),
        active_employees: metrics::active_employee_count(&store.employees),
        low_stock_items: metrics::low_stock_count(&store.inventory),
        inventory_value: metrics::inventory_value(&store.inventory),
        outstanding_invoices: metrics::invoice_totals(&store.invoices).outstanding,
        unread_notifications: store.unread_count(),
        highlighted_projects,
    })
}

/// GET /reports
pub async fn get_reports(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read();

    let project_status = metrics::project_status_counts(&store.projects)
        .into_iter()
        .map(|(name, projects)| StatusPoint { name, projects })
        .collect();

    let team_roles = metrics::role_counts(&store.employees)
        .into_iter()
        .map(|(name, count)| RolePoint { name, count })
        .collect();

    let material_stock = store
        .inventory
        .iter()
        .take(CHARTED_MATERIALS)
        .map(|item| MaterialPoint {
            name: item.name.chars().take(CHART_LABEL_CHARS).collect(),
            in_stock: item.quantity_in_stock,
            reorder_point: item.reorder_point,
        })
        .collect();

    DataResponse::new(ReportsSummary {
        projects: ProjectStats {
            active_count: metrics::active_project_count(&store.projects),
            completion_rate: metrics::completion_rate(&store.projects),
        },
        team: TeamStats {
            total_count: store.employees.len(),
            active_count: metrics::active_employee_count(&store.employees),
        },
        materials: MaterialStats {
            item_count: store.inventory.len(),
            reorder_alerts: metrics::low_stock_count(&store.inventory),
            total_value: metrics::inventory_value(&store.inventory),
        },
        finance: metrics::invoice_totals(&store.invoices),
        project_status,
        team_roles,
        material_stock,
    })
}
