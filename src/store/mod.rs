//! In-memory dashboard state.
//!
//! `DashboardStore` owns every collection the dashboard shows. It lives inside
//! `AppState` behind a `parking_lot::RwLock`; handlers take the lock for the
//! duration of one operation and never across an `.await`.

mod seed;

use chrono::{DateTime, Utc};

use crate::domain::{
    Applicant, ApplicantStage, CreateApplicantRequest, CreateEmployeeRequest,
    CreateInvoiceRequest, CreateProjectRequest, Employee, EmployeeStatus, Invoice,
    InvoiceStatus, Job, Notification, Project, ProjectStatus, StockItem,
};
use crate::services::metrics;

#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    pub projects: Vec<Project>,
    pub inventory: Vec<StockItem>,
    pub employees: Vec<Employee>,
    pub jobs: Vec<Job>,
    pub applicants: Vec<Applicant>,
    pub invoices: Vec<Invoice>,
    pub notifications: Vec<Notification>,
    next_id: u64,
    next_invoice_number: u64,
}

impl DashboardStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_invoice_number: 1001,
            ..Default::default()
        }
    }

    /// Store pre-populated with demo records.
    pub fn seeded() -> Self {
        seed::demo_store()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn notify(&mut self, message: String, now: DateTime<Utc>) {
        let id = self.next_id("n");
        self.notifications.insert(
            0,
            Notification {
                id,
                message,
                created_at: now,
                read: false,
            },
        );
    }

    // =========================================================================
    // Projects
    // =========================================================================

    pub fn projects_with_status(&self, status: Option<ProjectStatus>) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect()
    }

    /// Add a project in the Planning stage. Newest projects are listed first.
    pub fn add_project(&mut self, req: CreateProjectRequest, now: DateTime<Utc>) -> Project {
        let project = Project {
            id: self.next_id("p"),
            name: req.name.trim().to_string(),
            client: req.client.trim().to_string(),
            progress: 0,
            status: ProjectStatus::Planning,
            deadline: req.deadline,
            budget: req.budget,
            spent: 0.0,
        };
        self.projects.insert(0, project.clone());
        self.notify(format!("New project \"{}\" created.", project.name), now);
        project
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Subtract used material, never going below zero.
    ///
    /// Crossing the reorder point raises a notification.
    pub fn log_usage(
        &mut self,
        item_id: &str,
        quantity_used: u64,
        now: DateTime<Utc>,
    ) -> Option<StockItem> {
        let item = self.inventory.iter_mut().find(|item| item.id == item_id)?;

        let was_low = metrics::is_low_stock(item);
        item.quantity_in_stock = item.quantity_in_stock.saturating_sub(quantity_used);
        let updated = item.clone();

        if !was_low && metrics::is_low_stock(&updated) {
            self.notify(
                format!("\"{}\" is at or below its reorder point.", updated.name),
                now,
            );
        }

        Some(updated)
    }

    // =========================================================================
    // Team
    // =========================================================================

    pub fn add_employee(&mut self, req: CreateEmployeeRequest) -> Employee {
        let id = self.next_id("e");
        let employee = Employee {
            avatar: format!("https://i.pravatar.cc/150?u={}", id),
            id,
            name: req.name.trim().to_string(),
            role: req.role.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            hire_date: req.hire_date,
            status: EmployeeStatus::Active,
        };
        self.employees.push(employee.clone());
        employee
    }

    // =========================================================================
    // Hiring
    // =========================================================================

    /// Add a candidate at the New stage. Unknown job ids are rejected.
    pub fn add_applicant(
        &mut self,
        req: CreateApplicantRequest,
        now: DateTime<Utc>,
    ) -> Result<Applicant, String> {
        if let Some(job_id) = &req.job_id {
            if !self.jobs.iter().any(|job| &job.id == job_id) {
                return Err(format!("Job {} not found", job_id));
            }
        }

        let applicant = Applicant {
            id: self.next_id("a"),
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            job_id: req.job_id,
            stage: ApplicantStage::New,
            applied_date: now.date_naive(),
        };
        self.applicants.push(applicant.clone());
        self.notify(format!("New applicant: {}.", applicant.name), now);
        Ok(applicant)
    }

    pub fn update_applicant_stage(
        &mut self,
        applicant_id: &str,
        stage: ApplicantStage,
    ) -> Option<Applicant> {
        let applicant = self
            .applicants
            .iter_mut()
            .find(|applicant| applicant.id == applicant_id)?;
        applicant.stage = stage;
        Some(applicant.clone())
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// Create a Pending invoice. Newest invoices are listed first.
    pub fn add_invoice(&mut self, req: CreateInvoiceRequest) -> Invoice {
        let invoice = Invoice {
            id: format!("INV-{:04}", self.next_invoice_number),
            client_name: req.client_name.trim().to_string(),
            project_name: req.project_name.trim().to_string(),
            amount: req.amount,
            due_date: req.due_date,
            status: InvoiceStatus::Pending,
        };
        self.next_invoice_number += 1;
        self.invoices.insert(0, invoice.clone());
        invoice
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_notification_read(&mut self, notification_id: &str) -> Option<Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)?;
        notification.read = true;
        Some(notification.clone())
    }

    /// Mark everything read, returning how many notifications changed.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut updated = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            updated += 1;
        }
        updated
    }
}
