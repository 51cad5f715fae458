mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app_with, send, FixedEstimator};

#[tokio::test]
async fn dashboard_summarizes_seeded_data() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(&app, Method::GET, "/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert!(data["activeProjects"].as_u64().unwrap() > 0);
    assert!(data["highlightedProjects"].as_array().unwrap().len() <= 2);
    for project in data["highlightedProjects"].as_array().unwrap() {
        assert_eq!(project["status"], "In Progress");
    }
    assert!(data["inventoryValue"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn created_project_is_listed_first_in_planning() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({
            "name": "Harbor Bridge Retrofit",
            "client": "City Transit",
            "deadline": "2027-06-30",
            "budget": 4500000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Planning");
    assert_eq!(body["data"]["progress"], 0);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, Method::GET, "/projects?status=Planning", None).await;
    let projects = body["data"].as_array().unwrap();
    assert_eq!(projects[0]["id"], id.as_str());
    assert!(projects.iter().all(|p| p["status"] == "Planning"));

    let (_, body) = send(&app, Method::GET, "/notifications", None).await;
    assert!(body["data"]["notifications"][0]["message"]
        .as_str()
        .unwrap()
        .contains("Harbor Bridge Retrofit"));
}

#[tokio::test]
async fn blank_project_name_is_rejected() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({"name": "  ", "client": "X", "deadline": "2027-06-30", "budget": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn unknown_status_filter_uses_the_error_envelope() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(&app, Method::GET, "/projects?status=Abandoned", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_body_field_uses_the_error_envelope() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({"clientName": "Skyline Corp", "amount": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn inventory_lists_derived_supply_fields() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(&app, Method::GET, "/inventory", None).await;
    assert_eq!(status, StatusCode::OK);

    let first = &body["data"][0];
    assert!(first["quantityInStock"].is_u64());
    assert!(first.get("daysOfSupply").is_some());
    assert!(first["status"].is_string());
    assert!(first["lowStock"].is_boolean());
    assert!(body["meta"]["totalValue"].as_f64().unwrap() > 0.0);
    assert!(body["meta"]["lowStockItems"].is_u64());
}

#[tokio::test]
async fn logging_usage_clamps_stock_at_zero() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(
        &app,
        Method::POST,
        "/inventory/m1/usage",
        Some(json!({"quantityUsed": 1_000_000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantityInStock"], 0);
    assert_eq!(body["data"]["status"], "Out of Stock");
    assert_eq!(body["data"]["lowStock"], true);

    let (status, _) = send(
        &app,
        Method::POST,
        "/inventory/missing/usage",
        Some(json!({"quantityUsed": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/inventory/m1/usage",
        Some(json!({"quantityUsed": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn employees_can_be_added() {
    let app = app_with(FixedEstimator::ok());
    let (_, before) = send(&app, Method::GET, "/employees", None).await;
    let count = before["data"].as_array().unwrap().len();

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees",
        Some(json!({
            "name": "Dana Ortiz",
            "role": "Site Engineer",
            "email": "dana@example.com",
            "hireDate": "2024-08-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Active");

    let (_, after) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(after["data"].as_array().unwrap().len(), count + 1);
}

#[tokio::test]
async fn applicant_moves_through_the_pipeline() {
    let app = app_with(FixedEstimator::ok());

    let (status, body) = send(
        &app,
        Method::POST,
        "/applicants",
        Some(json!({"name": "Sam Reyes", "email": "sam@example.com", "jobId": "j1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["stage"], "New");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/applicants/{}/stage", id),
        Some(json!({"stage": "Interview"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stage"], "Interview");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/applicants/nobody/stage",
        Some(json!({"stage": "Hired"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/applicants",
        Some(json!({"name": "Sam Reyes", "email": "sam@example.com", "jobId": "j999"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn jobs_expose_type_field() {
    let app = app_with(FixedEstimator::ok());
    let (status, body) = send(&app, Method::GET, "/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"][0]["type"].is_string());
}

#[tokio::test]
async fn new_invoice_is_pending_and_counted_as_outstanding() {
    let app = app_with(FixedEstimator::ok());
    let (_, before) = send(&app, Method::GET, "/invoices", None).await;
    let outstanding = before["meta"]["outstanding"].as_f64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/invoices",
        Some(json!({
            "clientName": "Skyline Corp",
            "projectName": "Downtown High-Rise",
            "amount": 2500,
            "dueDate": "2024-10-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "INV-1005");
    assert_eq!(body["data"]["status"], "Pending");

    let (_, after) = send(&app, Method::GET, "/invoices", None).await;
    assert_eq!(after["data"][0]["id"], "INV-1005");
    assert_eq!(
        after["meta"]["outstanding"].as_f64().unwrap(),
        outstanding + 2500.0
    );
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = app_with(FixedEstimator::ok());

    let (_, body) = send(&app, Method::GET, "/notifications", None).await;
    let unread = body["data"]["unreadCount"].as_u64().unwrap();
    assert!(unread > 0);

    let (status, body) = send(&app, Method::POST, "/notifications/n1/read", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);

    let (status, body) = send(&app, Method::POST, "/notifications/read-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["updated"].as_u64().unwrap() < unread);

    let (_, body) = send(&app, Method::GET, "/notifications", None).await;
    assert_eq!(body["data"]["unreadCount"], 0);

    let (status, _) = send(&app, Method::POST, "/notifications/zzz/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reports_cover_every_section() {
    let app = app_with(FixedEstimator::ok());
    let (status, body) = send(&app, Method::GET, "/reports", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    let rate = data["projects"]["completionRate"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&rate));
    assert!(data["materialStock"].as_array().unwrap().len() <= 5);
    for point in data["materialStock"].as_array().unwrap() {
        assert!(point["name"].as_str().unwrap().chars().count() <= 15);
    }
    assert!(data["finance"]["paid"].is_number());
    assert!(!data["teamRoles"].as_array().unwrap().is_empty());
}
