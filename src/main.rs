use anyhow::Result;
use std::sync::Arc;

use constructai_backend::{
    app, config, logging,
    services::{AiHealth, EstimateClient, Estimator, GeminiClient},
    store::DashboardStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        model = %settings.gemini_model,
        "Starting ConstructAI backend"
    );

    if settings.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set - cost estimates will be unavailable");
    }

    // Create Gemini client
    let gemini = GeminiClient::new(
        &settings.gemini_base_url,
        settings.gemini_api_key.clone(),
        settings.ai_timeout_seconds,
    )?;

    let estimate_client = Arc::new(EstimateClient::new(
        Arc::new(gemini),
        settings.gemini_model.clone(),
        settings.estimate_temperature,
    ));
    let estimator: Arc<dyn Estimator> = estimate_client.clone();
    let ai_health: Arc<dyn AiHealth> = estimate_client;

    // Optionally check AI service health (non-blocking)
    if estimator.is_configured() {
        tokio::spawn({
            let ai_health = ai_health.clone();
            async move {
                match ai_health.check().await {
                    Ok(()) => tracing::info!("AI service is healthy"),
                    Err(e) => tracing::warn!(error = %e, "AI service health check failed - will retry on first request"),
                }
            }
        });
    }

    let store = if settings.seed_demo_data {
        DashboardStore::seeded()
    } else {
        DashboardStore::new()
    };
    tracing::info!(
        projects = store.projects.len(),
        inventory = store.inventory.len(),
        "Dashboard store initialized"
    );

    // Create application state
    let state = app::AppState::new(settings.clone(), store, estimator, Some(ai_health));

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
