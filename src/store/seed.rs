//! Demo records loaded when `SEED_DEMO_DATA` is enabled.

use chrono::{DateTime, NaiveDate, Utc};

use super::DashboardStore;
use crate::domain::{
    Applicant, ApplicantStage, Employee, EmployeeStatus, Invoice, InvoiceStatus, Job, JobType,
    Notification, Project, ProjectStatus, StockItem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    date(y, m, d)
        .and_hms_opt(h, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    client: &str,
    progress: u8,
    status: ProjectStatus,
    deadline: NaiveDate,
    budget: f64,
    spent: f64,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        client: client.to_string(),
        progress,
        status,
        deadline,
        budget,
        spent,
    }
}

#[allow(clippy::too_many_arguments)]
fn stock(
    id: &str,
    name: &str,
    supplier: &str,
    rating: f64,
    price: f64,
    unit: &str,
    seed: &str,
    quantity_in_stock: u64,
    location: &str,
    reorder_point: u64,
    average_daily_usage: u64,
) -> StockItem {
    StockItem {
        id: id.to_string(),
        name: name.to_string(),
        supplier: supplier.to_string(),
        rating,
        price,
        unit: unit.to_string(),
        image_url: format!("https://picsum.photos/seed/{}/400/300", seed),
        quantity_in_stock,
        location: location.to_string(),
        reorder_point,
        average_daily_usage,
    }
}

fn employee(
    id: &str,
    name: &str,
    role: &str,
    email: &str,
    phone: &str,
    hire_date: NaiveDate,
    status: EmployeeStatus,
) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        hire_date,
        avatar: format!("https://i.pravatar.cc/150?u={}", id),
        status,
    }
}

fn job(
    id: &str,
    title: &str,
    location: &str,
    job_type: JobType,
    experience: &str,
    description: &str,
    responsibilities: &[&str],
) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        job_type,
        experience: experience.to_string(),
        description: description.to_string(),
        responsibilities: responsibilities.iter().map(|r| r.to_string()).collect(),
    }
}

fn applicant(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    job_id: &str,
    stage: ApplicantStage,
    applied_date: NaiveDate,
) -> Applicant {
    Applicant {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        job_id: Some(job_id.to_string()),
        stage,
        applied_date,
    }
}

fn invoice(
    id: &str,
    client_name: &str,
    project_name: &str,
    amount: f64,
    due_date: NaiveDate,
    status: InvoiceStatus,
) -> Invoice {
    Invoice {
        id: id.to_string(),
        client_name: client_name.to_string(),
        project_name: project_name.to_string(),
        amount,
        due_date,
        status,
    }
}

fn notification(id: &str, message: &str, created_at: DateTime<Utc>, read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        message: message.to_string(),
        created_at,
        read,
    }
}

pub(super) fn demo_store() -> DashboardStore {
    use ProjectStatus::*;

    let projects = vec![
        project("p1", "Downtown High-Rise", "Skyline Corp", 75, InProgress, date(2025, 12, 20), 50_000_000.0, 38_500_000.0),
        project("p2", "Oakwood Residence", "John & Jane Doe", 100, Completed, date(2024, 5, 15), 1_200_000.0, 1_150_000.0),
        project("p3", "Bridge Repair Project", "City Municipality", 40, InProgress, date(2026, 8, 1), 15_000_000.0, 6_000_000.0),
        project("p4", "Suburban Mall Extension", "Retail Ventures", 15, Planning, date(2027, 1, 30), 25_000_000.0, 500_000.0),
        project("p5", "Industrial Warehouse", "Logistics Inc.", 95, OnHold, date(2024, 9, 1), 7_500_000.0, 7_000_000.0),
    ];

    let inventory = vec![
        stock("m1", "Portland Cement (Type I)", "Global Cement Co.", 4.8, 12.50, "bag", "cement", 2500, "Warehouse A, Bay 3", 1000, 50),
        stock("m2", "Steel Rebar (#5)", "SteelStrong", 4.9, 1200.0, "ton", "rebar", 50, "Yard 2", 20, 2),
        stock("m3", "Plywood Sheathing (1/2\")", "Woodland Products", 4.5, 35.0, "sheet", "plywood", 800, "Warehouse B, Rack 12", 500, 25),
        stock("m4", "Drywall (4x8 ft)", "BuildRight Supplies", 4.6, 15.75, "sheet", "drywall", 450, "Warehouse B, Rack 15", 500, 40),
        stock("m5", "Asphalt Shingles", "Roofer's Choice", 4.7, 95.0, "bundle", "shingles", 150, "Warehouse A, Bay 5", 100, 5),
    ];

    let employees = vec![
        employee("e1", "Maria Garcia", "Project Manager", "maria.g@constructai.com", "555-0101", date(2020, 3, 15), EmployeeStatus::Active),
        employee("e2", "John Smith", "Site Supervisor", "john.s@constructai.com", "555-0102", date(2021, 7, 22), EmployeeStatus::Active),
        employee("e3", "David Chen", "Lead Carpenter", "david.c@constructai.com", "555-0103", date(2019, 1, 10), EmployeeStatus::OnLeave),
        employee("e4", "Emily White", "Accountant", "emily.w@constructai.com", "555-0104", date(2022, 11, 1), EmployeeStatus::Active),
        employee("e5", "Robert Brown", "Electrician", "robert.b@constructai.com", "555-0105", date(2023, 2, 18), EmployeeStatus::Active),
    ];

    let jobs = vec![
        job(
            "j1",
            "Senior Site Supervisor",
            "Downtown, Metropolis",
            JobType::FullTime,
            "8+ years",
            "Oversee all on-site activities, ensuring projects are completed on schedule, within budget, and to the highest quality standards.",
            &[
                "Manage subcontractors and site personnel.",
                "Enforce safety protocols rigorously.",
                "Coordinate material deliveries and equipment usage.",
                "Provide daily progress reports to the Project Manager.",
            ],
        ),
        job(
            "j2",
            "Licensed Electrician",
            "Oakwood Residence Project",
            JobType::Contract,
            "5+ years",
            "Seeking a skilled electrician for a high-end residential project. Must be proficient in modern wiring techniques and smart home installations.",
            &[
                "Install and maintain wiring, control, and lighting systems.",
                "Inspect electrical components, such as transformers and circuit breakers.",
                "Identify electrical problems with a variety of testing devices.",
            ],
        ),
        job(
            "j3",
            "Heavy Equipment Operator",
            "Citywide",
            JobType::FullTime,
            "3+ years",
            "Operate heavy machinery like excavators, bulldozers, and loaders for various civil and commercial projects across the city.",
            &[
                "Operate heavy equipment in compliance with safety policies and procedures.",
                "Perform daily maintenance and safety checks of equipment.",
                "Understand and follow grade stakes and markings.",
            ],
        ),
        job(
            "j4",
            "Project Accountant",
            "Head Office",
            JobType::FullTime,
            "4+ years in construction accounting",
            "Manage all financial aspects of construction projects, from budgeting and forecasting to invoicing and reporting.",
            &[
                "Prepare and manage project budgets.",
                "Process subcontractor invoices and payments.",
                "Track project costs and provide regular financial reports.",
            ],
        ),
    ];

    let applicants = vec![
        applicant("a1", "Jessica Miller", "j.miller@email.com", "555-0201", "j1", ApplicantStage::Interview, date(2024, 7, 15)),
        applicant("a2", "Kevin Davis", "kevin.d@email.com", "555-0202", "j2", ApplicantStage::New, date(2024, 7, 18)),
        applicant("a3", "Sarah Wilson", "s.wilson@email.com", "555-0203", "j4", ApplicantStage::Offer, date(2024, 7, 12)),
        applicant("a4", "Michael Rodriguez", "m.rod@email.com", "555-0204", "j3", ApplicantStage::Rejected, date(2024, 7, 10)),
    ];

    let invoices = vec![
        invoice("INV-1004", "Retail Ventures", "Suburban Mall Extension", 75_000.0, date(2024, 8, 30), InvoiceStatus::Pending),
        invoice("INV-1003", "City Municipality", "Bridge Repair Project", 500_000.0, date(2024, 6, 30), InvoiceStatus::Overdue),
        invoice("INV-1002", "John & Jane Doe", "Oakwood Residence", 150_000.0, date(2024, 7, 31), InvoiceStatus::Pending),
        invoice("INV-1001", "Skyline Corp", "Downtown High-Rise", 250_000.0, date(2024, 6, 15), InvoiceStatus::Paid),
    ];

    let notifications = vec![
        notification("n1", "Invoice INV-1003 for \"City Municipality\" is now overdue.", timestamp(2024, 7, 19, 9), false),
        notification("n2", "\"Drywall (4x8 ft)\" is at or below its reorder point.", timestamp(2024, 7, 18, 14), false),
        notification("n3", "Downtown High-Rise progress updated to 75%.", timestamp(2024, 7, 17, 11), true),
    ];

    DashboardStore {
        projects,
        inventory,
        employees,
        jobs,
        applicants,
        invoices,
        notifications,
        next_id: 100,
        next_invoice_number: 1005,
    }
}
