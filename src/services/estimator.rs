//! Estimate client: one AI call per request, parsed and validated into a `CostEstimate`.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::domain::estimate::{CostEstimate, CostEstimateRequest};
use crate::services::ai_client::{
    CompletionCapability, CompletionRequest, GeminiClient, UpstreamFailure,
};
use crate::services::estimate_prompt::build_estimate_prompt;

/// Upper bound on the temperature sent to the model.
pub const MAX_TEMPERATURE: f32 = 0.5;

/// Longest slice of a raw model payload written to the logs.
const RAW_LOG_LIMIT: usize = 512;

/// Tolerance before the soft breakdown invariants are reported.
const PERCENTAGE_DRIFT: f64 = 5.0;

/// Why an estimate could not be produced. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    #[error("API Key is not configured. Cannot get estimate.")]
    Configuration,

    #[error("{}", upstream_message(.0))]
    Upstream(UpstreamFailure),

    #[error("The AI service returned a response that is not valid JSON: {reason}")]
    MalformedResponse { raw: String, reason: String },

    #[error("The AI service returned an estimate that does not match the expected format: {0}")]
    SchemaViolation(String),
}

fn upstream_message(failure: &UpstreamFailure) -> String {
    match failure {
        UpstreamFailure::InvalidCredential(_) => {
            "The provided API Key is not valid. Please check your configuration.".to_string()
        }
        other => format!("Failed to get cost estimate from AI: {}", other),
    }
}

impl From<UpstreamFailure> for EstimateError {
    fn from(failure: UpstreamFailure) -> Self {
        match failure {
            UpstreamFailure::MissingCredential => Self::Configuration,
            other => Self::Upstream(other),
        }
    }
}

/// Produces a cost estimate for a request.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, request: &CostEstimateRequest) -> Result<CostEstimate, EstimateError>;

    /// Whether the underlying capability has a credential.
    fn is_configured(&self) -> bool;
}

/// Liveness check for the AI capability behind an estimator.
#[async_trait]
pub trait AiHealth: Send + Sync {
    async fn check(&self) -> anyhow::Result<()>;
}

/// [`Estimator`] backed by a completion capability.
pub struct EstimateClient<C> {
    capability: Arc<C>,
    model: String,
    temperature: f32,
}

impl<C: CompletionCapability> EstimateClient<C> {
    pub fn new(capability: Arc<C>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            capability,
            model: model.into(),
            temperature: temperature.clamp(0.0, MAX_TEMPERATURE),
        }
    }
}

#[async_trait]
impl<C: CompletionCapability> Estimator for EstimateClient<C> {
    #[instrument(skip(self, request), fields(model = %self.model, project_type = %request.project_type))]
    async fn estimate(&self, request: &CostEstimateRequest) -> Result<CostEstimate, EstimateError> {
        if !self.capability.is_configured() {
            warn!("Estimate requested without an AI credential");
            return Err(EstimateError::Configuration);
        }

        let prompt = build_estimate_prompt(request);
        let completion = CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.prompt,
            response_schema: prompt.schema,
            response_mime_type: "application/json",
            temperature: self.temperature,
        };

        let raw = self.capability.complete(&completion).await.map_err(|e| {
            error!(error = %e, "AI completion failed");
            EstimateError::from(e)
        })?;

        let estimate = parse_estimate(&raw)?;

        info!(
            categories = estimate.cost_breakdown.len(),
            min = estimate.estimated_total_cost.min,
            max = estimate.estimated_total_cost.max,
            "Cost estimate generated"
        );

        Ok(estimate)
    }

    fn is_configured(&self) -> bool {
        self.capability.is_configured()
    }
}

#[async_trait]
impl AiHealth for EstimateClient<GeminiClient> {
    async fn check(&self) -> anyhow::Result<()> {
        self.capability.health_check(&self.model).await
    }
}

/// Parse and validate a raw model payload.
pub fn parse_estimate(raw: &str) -> Result<CostEstimate, EstimateError> {
    let trimmed = raw.trim();

    let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
        warn!(error = %e, raw = %truncate(trimmed), "AI response is not valid JSON");
        EstimateError::MalformedResponse {
            raw: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    let estimate: CostEstimate = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, raw = %truncate(trimmed), "AI response does not match the estimate schema");
        EstimateError::SchemaViolation(e.to_string())
    })?;

    estimate.check_ranges().map_err(|detail| {
        warn!(detail = %detail, "AI estimate failed range checks");
        EstimateError::SchemaViolation(detail)
    })?;

    let percentage_total = estimate.breakdown_percentage_total();
    if !estimate.cost_breakdown.is_empty() && (percentage_total - 100.0).abs() > PERCENTAGE_DRIFT {
        warn!(
            percentage_total = percentage_total,
            "Cost breakdown percentages do not add up to 100"
        );
    }

    Ok(estimate)
}

fn truncate(raw: &str) -> &str {
    match raw.char_indices().nth(RAW_LOG_LIMIT) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
