use anyhow::{bail, Context, Result};
use std::env;

use crate::services::estimator::MAX_TEMPERATURE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout_seconds: u64,
    pub estimate_temperature: f32,
    /// How long a settled estimate is kept for its form
    pub estimate_slot_ttl_seconds: u64,

    // Demo data
    pub seed_demo_data: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Gemini: a missing key is allowed, estimates then fail as not configured
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string());
        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());
        url::Url::parse(&gemini_base_url)
            .with_context(|| format!("GEMINI_BASE_URL is not a valid URL: {}", gemini_base_url))?;
        let ai_timeout_seconds = lookup("AI_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(120); // 2 minutes default for LLM calls

        let estimate_temperature = match lookup("ESTIMATE_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("ESTIMATE_TEMPERATURE is not a number: {}", raw))?,
            None => MAX_TEMPERATURE,
        };
        if !(0.0..=MAX_TEMPERATURE).contains(&estimate_temperature) {
            bail!(
                "ESTIMATE_TEMPERATURE must be between 0 and {}, got {}",
                MAX_TEMPERATURE,
                estimate_temperature
            );
        }

        let estimate_slot_ttl_seconds = match lookup("ESTIMATE_SLOT_TTL_SECONDS") {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("ESTIMATE_SLOT_TTL_SECONDS is not a whole number: {}", raw)
            })?,
            None => 3600,
        };

        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            ai_timeout_seconds,
            estimate_temperature,
            estimate_slot_ttl_seconds,
            seed_demo_data,
        })
    }
}
