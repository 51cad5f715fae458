//! Derived dashboard statistics.
//!
//! Pure functions over snapshots of the in-memory collections; recomputed per request.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::domain::{
    Employee, EmployeeStatus, Invoice, InvoiceStatus, Project, ProjectStatus, StockItem,
};

/// Progress above which an active project counts as on track.
pub const ON_TRACK_PROGRESS: u8 = 60;

/// Stock/reorder ratio up to which an item should be reordered soon.
pub const REORDER_SOON_RATIO: f64 = 1.2;

/// Estimated days until an item runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysOfSupply {
    Days(u64),
    /// No consumption recorded, so the stock never runs out.
    Unbounded,
}

impl Serialize for DaysOfSupply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Days(days) => serializer.serialize_u64(*days),
            Self::Unbounded => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Reorder Soon")]
    ReorderSoon,
    Healthy,
}

// =============================================================================
// Projects
// =============================================================================

pub fn active_project_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|p| p.status == ProjectStatus::InProgress)
        .count()
}

pub fn on_track_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|p| p.status == ProjectStatus::InProgress && p.progress > ON_TRACK_PROGRESS)
        .count()
}

/// Share of completed projects, in percent. Zero when there are no projects.
pub fn completion_rate(projects: &[Project]) -> f64 {
    if projects.is_empty() {
        return 0.0;
    }
    let completed = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .count();
    completed as f64 / projects.len() as f64 * 100.0
}

pub fn project_status_counts(projects: &[Project]) -> BTreeMap<ProjectStatus, usize> {
    let mut counts = BTreeMap::new();
    for project in projects {
        *counts.entry(project.status).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// Team
// =============================================================================

pub fn active_employee_count(employees: &[Employee]) -> usize {
    employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Active)
        .count()
}

pub fn role_counts(employees: &[Employee]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for employee in employees {
        *counts.entry(employee.role.clone()).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// Inventory
// =============================================================================

pub fn is_low_stock(item: &StockItem) -> bool {
    item.quantity_in_stock <= item.reorder_point
}

pub fn low_stock_count(items: &[StockItem]) -> usize {
    items.iter().filter(|item| is_low_stock(item)).count()
}

pub fn days_of_supply(item: &StockItem) -> DaysOfSupply {
    match item.average_daily_usage {
        0 => DaysOfSupply::Unbounded,
        usage => DaysOfSupply::Days(item.quantity_in_stock / usage),
    }
}

pub fn stock_status(item: &StockItem) -> StockStatus {
    if item.quantity_in_stock == 0 {
        return StockStatus::OutOfStock;
    }
    let level = if item.reorder_point > 0 {
        item.quantity_in_stock as f64 / item.reorder_point as f64
    } else {
        2.0
    };
    if level <= 1.0 {
        StockStatus::LowStock
    } else if level <= REORDER_SOON_RATIO {
        StockStatus::ReorderSoon
    } else {
        StockStatus::Healthy
    }
}

pub fn inventory_value(items: &[StockItem]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity_in_stock as f64 * item.price)
        .sum()
}

// =============================================================================
// Invoices
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub paid: f64,
    pub outstanding: f64,
    pub overdue_count: usize,
}

pub fn invoice_totals(invoices: &[Invoice]) -> InvoiceTotals {
    invoices
        .iter()
        .fold(InvoiceTotals::default(), |mut totals, invoice| {
            match invoice.status {
                InvoiceStatus::Paid => totals.paid += invoice.amount,
                InvoiceStatus::Pending => totals.outstanding += invoice.amount,
                InvoiceStatus::Overdue => {
                    totals.outstanding += invoice.amount;
                    totals.overdue_count += 1;
                }
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(quantity: u64, reorder_point: u64, usage: u64) -> StockItem {
        StockItem {
            id: "m".to_string(),
            name: "Cement".to_string(),
            supplier: "Co".to_string(),
            rating: 4.5,
            price: 2.0,
            unit: "bag".to_string(),
            image_url: String::new(),
            quantity_in_stock: quantity,
            location: "A".to_string(),
            reorder_point,
            average_daily_usage: usage,
        }
    }

    fn project(status: ProjectStatus, progress: u8) -> Project {
        Project {
            id: "p".to_string(),
            name: "P".to_string(),
            client: "C".to_string(),
            progress,
            status,
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            budget: 10.0,
            spent: 1.0,
        }
    }

    #[test]
    fn zero_usage_is_unbounded() {
        assert_eq!(days_of_supply(&item(100, 10, 0)), DaysOfSupply::Unbounded);
        assert_eq!(days_of_supply(&item(0, 10, 0)), DaysOfSupply::Unbounded);
        assert_eq!(
            serde_json::to_value(DaysOfSupply::Unbounded).unwrap(),
            serde_json::json!("N/A")
        );
    }

    #[test]
    fn days_of_supply_floors() {
        assert_eq!(days_of_supply(&item(2500, 1000, 50)), DaysOfSupply::Days(50));
        assert_eq!(days_of_supply(&item(450, 500, 40)), DaysOfSupply::Days(11));
        assert_eq!(
            serde_json::to_value(DaysOfSupply::Days(11)).unwrap(),
            serde_json::json!(11)
        );
    }

    #[test]
    fn low_stock_includes_the_reorder_point() {
        assert!(is_low_stock(&item(500, 500, 1)));
        assert!(!is_low_stock(&item(501, 500, 1)));
        assert_eq!(
            low_stock_count(&[item(1, 2, 1), item(3, 2, 1), item(0, 0, 0)]),
            2
        );
    }

    #[test]
    fn stock_status_thresholds() {
        assert_eq!(stock_status(&item(0, 10, 1)), StockStatus::OutOfStock);
        assert_eq!(stock_status(&item(10, 10, 1)), StockStatus::LowStock);
        assert_eq!(stock_status(&item(12, 10, 1)), StockStatus::ReorderSoon);
        assert_eq!(stock_status(&item(13, 10, 1)), StockStatus::Healthy);
        assert_eq!(stock_status(&item(5, 0, 1)), StockStatus::Healthy);
    }

    #[test]
    fn inventory_value_sums_quantity_times_price() {
        assert_eq!(inventory_value(&[item(10, 1, 1), item(5, 1, 1)]), 30.0);
        assert_eq!(inventory_value(&[]), 0.0);
    }

    #[test]
    fn project_counts() {
        let projects = vec![
            project(ProjectStatus::InProgress, 75),
            project(ProjectStatus::InProgress, 40),
            project(ProjectStatus::Completed, 100),
            project(ProjectStatus::Planning, 15),
        ];
        assert_eq!(active_project_count(&projects), 2);
        assert_eq!(on_track_count(&projects), 1);
        assert_eq!(completion_rate(&projects), 25.0);
        assert_eq!(
            project_status_counts(&projects).get(&ProjectStatus::InProgress),
            Some(&2)
        );
    }

    #[test]
    fn completion_rate_of_nothing_is_zero() {
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn invoice_totals_split_paid_and_outstanding() {
        let invoice = |amount: f64, status| Invoice {
            id: "INV".to_string(),
            client_name: "C".to_string(),
            project_name: "P".to_string(),
            amount,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status,
        };
        let totals = invoice_totals(&[
            invoice(100.0, InvoiceStatus::Paid),
            invoice(50.0, InvoiceStatus::Pending),
            invoice(25.0, InvoiceStatus::Overdue),
        ]);
        assert_eq!(totals.paid, 100.0);
        assert_eq!(totals.outstanding, 75.0);
        assert_eq!(totals.overdue_count, 1);
    }
}
