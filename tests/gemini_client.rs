//! End-to-end tests of the Gemini-backed estimator against a local stub server.

mod common;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::get,
    Json, Router,
};
use constructai_backend::{
    app::{create_app, AppState},
    domain::estimate::{CostEstimateRequest, ProjectType, QualityLevel},
    services::{
        ai_client::UpstreamFailure, AiHealth, EstimateClient, EstimateError, Estimator,
        GeminiClient,
    },
    store::DashboardStore,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

use common::{send, test_settings, SAMPLE_ESTIMATE};

const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
struct SeenRequest {
    method: Method,
    model_action: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Stub {
    reply: Arc<(StatusCode, Value)>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn handle(
    State(stub): State<Stub>,
    Path(model_action): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    stub.seen.lock().push(SeenRequest {
        method,
        model_action,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    let (status, reply) = stub.reply.as_ref();
    (*status, Json(reply.clone()))
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Stub) {
    let stub = Stub {
        reply: Arc::new((status, reply)),
        seen: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/v1beta/models/:model_action", get(handle).post(handle))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (format!("http://{}", addr), stub)
}

fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

fn estimate_client(base_url: &str, api_key: Option<&str>) -> Arc<EstimateClient<GeminiClient>> {
    let gemini = GeminiClient::new(base_url, api_key.map(str::to_string), 5).expect("client");
    Arc::new(EstimateClient::new(Arc::new(gemini), MODEL, 0.5))
}

fn request() -> CostEstimateRequest {
    CostEstimateRequest {
        project_type: ProjectType::CommercialOffice,
        area: 12000.0,
        floors: 4,
        quality: QualityLevel::Premium,
        materials: "Steel frame, glass curtain wall".to_string(),
        features: String::new(),
    }
}

#[tokio::test]
async fn sends_structured_output_request_and_parses_estimate() {
    let (base_url, stub) = spawn_stub(StatusCode::OK, text_reply(SAMPLE_ESTIMATE)).await;
    let client = estimate_client(&base_url, Some("test-key"));

    let estimate = client.estimate(&request()).await.expect("estimate");
    assert_eq!(estimate.estimated_total_cost.max, 520000.0);
    assert_eq!(estimate.contingency.percentage, 10.0);

    let seen = stub.seen.lock().clone();
    assert_eq!(seen.len(), 1);
    let call = &seen[0];
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.model_action, format!("{}:generateContent", MODEL));
    assert_eq!(call.api_key.as_deref(), Some("test-key"));

    let config = &call.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["temperature"], 0.5);
    let required = config["responseSchema"]["required"].as_array().unwrap();
    assert!(required.contains(&json!("contingency")));
    assert!(required.contains(&json!("costBreakdown")));

    let prompt = call.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Commercial Office"));
    assert!(prompt.contains("12000"));
    assert!(prompt.contains("Premium"));
    assert!(prompt.contains("Special Features: None"));
}

#[tokio::test]
async fn missing_key_never_reaches_the_service() {
    let (base_url, stub) = spawn_stub(StatusCode::OK, text_reply(SAMPLE_ESTIMATE)).await;
    let client = estimate_client(&base_url, None);

    let err = client.estimate(&request()).await.unwrap_err();
    assert_eq!(err, EstimateError::Configuration);
    assert!(stub.seen.lock().is_empty());
}

#[tokio::test]
async fn rejected_key_gets_the_invalid_key_message() {
    let (base_url, _stub) = spawn_stub(
        StatusCode::BAD_REQUEST,
        json!({"error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT"
        }}),
    )
    .await;
    let client = estimate_client(&base_url, Some("bad-key"));

    let err = client.estimate(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        EstimateError::Upstream(UpstreamFailure::InvalidCredential(_))
    ));
    assert_eq!(
        err.to_string(),
        "The provided API Key is not valid. Please check your configuration."
    );
}

#[tokio::test]
async fn server_error_carries_upstream_message() {
    let (base_url, _stub) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}}),
    )
    .await;
    let client = estimate_client(&base_url, Some("test-key"));

    let err = client.estimate(&request()).await.unwrap_err();
    assert_eq!(
        err,
        EstimateError::Upstream(UpstreamFailure::Status {
            status: 500,
            message: "Internal error encountered.".to_string(),
        })
    );
    assert!(err
        .to_string()
        .starts_with("Failed to get cost estimate from AI: Internal error encountered."));
}

#[tokio::test]
async fn blocked_prompt_is_an_upstream_failure() {
    let (base_url, _stub) =
        spawn_stub(StatusCode::OK, json!({"promptFeedback": {"blockReason": "SAFETY"}})).await;
    let client = estimate_client(&base_url, Some("test-key"));

    let err = client.estimate(&request()).await.unwrap_err();
    assert_eq!(
        err,
        EstimateError::Upstream(UpstreamFailure::EmptyResponse("SAFETY".to_string()))
    );
}

#[tokio::test]
async fn non_json_text_is_malformed() {
    let (base_url, _stub) =
        spawn_stub(StatusCode::OK, text_reply("Sure! Here is your estimate.")).await;
    let client = estimate_client(&base_url, Some("test-key"));

    let err = client.estimate(&request()).await.unwrap_err();
    assert!(matches!(err, EstimateError::MalformedResponse { .. }));
    assert!(err.to_string().contains("not valid JSON"));
}

#[tokio::test]
async fn health_check_reaches_the_model_endpoint() {
    let (base_url, stub) = spawn_stub(StatusCode::OK, json!({"name": "models/gemini-2.5-flash"})).await;
    let client = estimate_client(&base_url, Some("test-key"));

    client.check().await.expect("healthy");

    let seen = stub.seen.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].model_action, MODEL);

    let app = create_app(AppState::new(
        test_settings(),
        DashboardStore::new(),
        client.clone(),
        Some(client),
    ));
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["ai_service"], "ok");
}

#[tokio::test]
async fn unreachable_model_degrades_health() {
    let (base_url, _stub) = spawn_stub(
        StatusCode::NOT_FOUND,
        json!({"error": {"code": 404, "message": "model not found", "status": "NOT_FOUND"}}),
    )
    .await;
    let client = estimate_client(&base_url, Some("test-key"));

    let app = create_app(AppState::new(
        test_settings(),
        DashboardStore::new(),
        client.clone(),
        Some(client),
    ));
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["ai_service"], "error");
}
