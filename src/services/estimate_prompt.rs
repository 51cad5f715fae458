//! Prompt and response-schema construction for cost estimates.
//!
//! Everything here is pure: the same request always yields the same prompt text, and the
//! schema is a fixed value declaring every `CostEstimate` field as required.

use serde_json::{json, Value};

use crate::domain::estimate::CostEstimateRequest;

/// Placeholder used when the request carries no special features.
pub const NO_FEATURES: &str = "None";

/// Prompt text plus the schema the model must honor.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatePrompt {
    pub prompt: String,
    pub schema: Value,
}

pub fn build_estimate_prompt(request: &CostEstimateRequest) -> EstimatePrompt {
    EstimatePrompt {
        prompt: build_prompt(request),
        schema: response_schema(),
    }
}

/// Render the natural-language instruction for a request.
pub fn build_prompt(request: &CostEstimateRequest) -> String {
    // Blank features fall back to the placeholder; anything else is embedded as given
    let features = if request.features.trim().is_empty() {
        NO_FEATURES
    } else {
        request.features.as_str()
    };

    format!(
        "Analyze the following construction project details and provide a detailed cost estimate.

Project Details:
- Project Type: {project_type}
- Total Area: {area} square feet
- Number of Floors: {floors}
- Quality Level: {quality}
- Primary Materials: {materials}
- Special Features: {features}

Provide a comprehensive cost breakdown, including but not limited to:
- Site preparation, Foundation, Framing, Exterior & Interior finishes, MEP (Mechanical, Electrical, Plumbing), Labor costs, Permits and fees, and a contingency fund.

Return the data in the specified JSON format. The costs should be realistic for a project in a major metropolitan area in the USA.",
        project_type = request.project_type,
        area = request.area,
        floors = request.floors,
        quality = request.quality,
        materials = request.materials,
        features = features,
    )
}

/// Response schema in the Gemini OpenAPI subset.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "estimatedTotalCost": {
                "type": "OBJECT",
                "properties": {
                    "min": { "type": "NUMBER" },
                    "max": { "type": "NUMBER" }
                },
                "required": ["min", "max"],
                "propertyOrdering": ["min", "max"]
            },
            "costBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "cost": { "type": "NUMBER" },
                        "percentage": { "type": "NUMBER" },
                        "details": { "type": "STRING" }
                    },
                    "required": ["category", "cost", "percentage", "details"],
                    "propertyOrdering": ["category", "cost", "percentage", "details"]
                }
            },
            "timelineEstimate": {
                "type": "STRING",
                "description": "A textual description of the estimated project timeline, e.g., '6-8 months'."
            },
            "contingency": {
                "type": "OBJECT",
                "properties": {
                    "percentage": { "type": "NUMBER" },
                    "amount": { "type": "NUMBER" }
                },
                "required": ["percentage", "amount"],
                "propertyOrdering": ["percentage", "amount"]
            },
            "summary": {
                "type": "STRING",
                "description": "A brief summary of the cost estimate, including key assumptions and potential risks."
            }
        },
        "required": [
            "estimatedTotalCost",
            "costBreakdown",
            "timelineEstimate",
            "contingency",
            "summary"
        ],
        "propertyOrdering": [
            "estimatedTotalCost",
            "costBreakdown",
            "timelineEstimate",
            "contingency",
            "summary"
        ]
    })
}
