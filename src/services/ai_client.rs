//! Gemini client for the generative-AI completion capability.
//!
//! The rest of the crate only sees [`CompletionCapability`]: given a prompt and a
//! response schema it returns the raw JSON text the model produced, or an
//! [`UpstreamFailure`]. [`GeminiClient`] implements it over the Generative Language
//! REST API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};
use url::Url;

/// One structured-output completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub response_schema: serde_json::Value,
    pub response_mime_type: &'static str,
    pub temperature: f32,
}

/// Failure reported by (or while reaching) the completion capability.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamFailure {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("{0}")]
    InvalidCredential(String),

    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("model returned no content: {0}")]
    EmptyResponse(String),
}

/// Black-box text/JSON generation capability.
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    /// Whether a credential is available. Checked before any call is made.
    fn is_configured(&self) -> bool;

    /// Issue exactly one completion call and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamFailure>;
}

/// Client for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

/// Error response from the Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing or blank `api_key` is accepted here; callers check
    /// [`CompletionCapability::is_configured`] before issuing requests.
    pub fn new(base_url: &str, api_key: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid Gemini base URL: {}", base_url))?;

        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        tracing::info!(
            base_url = %base_url,
            configured = api_key.is_some(),
            "Gemini client initialized"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn model_url(&self, model: &str, action: Option<&str>) -> Result<Url, UpstreamFailure> {
        let path = match action {
            Some(action) => format!("v1beta/models/{}:{}", model, action),
            None => format!("v1beta/models/{}", model),
        };
        self.base_url
            .join(&path)
            .map_err(|e| UpstreamFailure::Transport(format!("invalid model URL: {}", e)))
    }

    /// Check that the API is reachable and the model exists.
    pub async fn health_check(&self, model: &str) -> Result<()> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Gemini API key is not configured")?;
        let url = self.model_url(model, None)?;

        self.client
            .get(url)
            .header("x-goog-api-key", api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Gemini health check failed")?
            .error_for_status()
            .context("Gemini model unavailable")?;

        Ok(())
    }
}

#[async_trait]
impl CompletionCapability for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamFailure> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            contents: [RequestContent<'a>; 1],
            generation_config: GenerationConfig<'a>,
        }

        #[derive(Serialize)]
        struct RequestContent<'a> {
            role: &'static str,
            parts: [RequestPart<'a>; 1],
        }

        #[derive(Serialize)]
        struct RequestPart<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerationConfig<'a> {
            response_mime_type: &'a str,
            response_schema: &'a serde_json::Value,
            temperature: f32,
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamFailure::MissingCredential)?;
        let url = self.model_url(&request.model, Some("generateContent"))?;

        let body = Body {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type,
                response_schema: &request.response_schema,
                temperature: request.temperature,
            },
        };

        debug!(url = %url, "Gemini request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                UpstreamFailure::Transport(if e.is_timeout() {
                    "request to the AI service timed out".to_string()
                } else {
                    format!("AI service unavailable: {}", e)
                })
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.json::<GeminiErrorResponse>().await.ok();
            return Err(map_error_status(status, error_body));
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to decode Gemini response envelope");
                UpstreamFailure::Transport(format!("invalid AI service response: {}", e))
            })?;

        extract_text(payload)
    }
}

fn map_error_status(status: StatusCode, body: Option<GeminiErrorResponse>) -> UpstreamFailure {
    let (message, api_status) = match body {
        Some(body) => (body.error.message, body.error.status),
        None => (format!("AI service error: {}", status), None),
    };

    let invalid_key = message.contains("API key not valid")
        || matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || api_status.as_deref() == Some("UNAUTHENTICATED");

    if invalid_key {
        error!(status = %status, "Gemini rejected the API key");
        UpstreamFailure::InvalidCredential(message)
    } else {
        error!(status = %status, message = %message, "Gemini error");
        UpstreamFailure::Status {
            status: status.as_u16(),
            message,
        }
    }
}

fn extract_text(payload: GenerateContentResponse) -> Result<String, UpstreamFailure> {
    let block_reason = payload
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);

    let Some(candidate) = payload.candidates.into_iter().next() else {
        return Err(UpstreamFailure::EmptyResponse(
            block_reason.unwrap_or_else(|| "no candidates".to_string()),
        ));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .or(block_reason)
            .unwrap_or_else(|| "empty candidate".to_string());
        return Err(UpstreamFailure::EmptyResponse(reason));
    }

    Ok(text)
}
