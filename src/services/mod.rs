//! Service layer modules.
//!
//! Contains the Gemini client, the cost estimate pipeline, per-form estimate slots and
//! the derived dashboard metrics.

pub mod ai_client;
pub mod estimate_prompt;
pub mod estimate_slots;
pub mod estimator;
pub mod metrics;

pub use ai_client::{CompletionCapability, GeminiClient};
pub use estimate_slots::EstimateSlots;
pub use estimator::{AiHealth, EstimateClient, EstimateError, Estimator};
