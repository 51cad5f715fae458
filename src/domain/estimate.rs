//! Cost estimate domain models.
//!
//! `CostEstimateRequest` is what the estimator form submits; `CostEstimate` is the
//! structured payload the AI model must return. Field names on the wire are camelCase
//! because the same names are used in the response schema sent to the model.

use serde::{Deserialize, Serialize};

/// Building category offered by the estimator form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectType {
    #[serde(rename = "Residential House")]
    ResidentialHouse,
    #[serde(rename = "Commercial Office")]
    CommercialOffice,
    #[serde(rename = "Industrial Warehouse")]
    IndustrialWarehouse,
    #[serde(rename = "Bridge")]
    Bridge,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        Self::ResidentialHouse,
        Self::CommercialOffice,
        Self::IndustrialWarehouse,
        Self::Bridge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ResidentialHouse => "Residential House",
            Self::CommercialOffice => "Commercial Office",
            Self::IndustrialWarehouse => "Industrial Warehouse",
            Self::Bridge => "Bridge",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Finish quality tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityLevel {
    Basic,
    Standard,
    Premium,
    Luxury,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 4] = [Self::Basic, Self::Standard, Self::Premium, Self::Luxury];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Project parameters submitted for a cost prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateRequest {
    pub project_type: ProjectType,
    /// Total area in square feet
    pub area: f64,
    pub floors: u32,
    pub quality: QualityLevel,
    pub materials: String,
    #[serde(default)]
    pub features: String,
}

impl CostEstimateRequest {
    /// Check the request invariants: a positive, finite area and at least one floor.
    pub fn validate(&self) -> Result<(), String> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(format!("area must be a positive number, got {}", self.area));
        }
        if self.floors < 1 {
            return Err("floors must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Min/max range of the total project cost (USD).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Contingency {
    pub percentage: f64,
    pub amount: f64,
}

/// One line of the cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdownItem {
    pub category: String,
    pub cost: f64,
    pub percentage: f64,
    pub details: String,
}

/// AI-generated cost estimate. Every field is required when parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub estimated_total_cost: CostRange,
    pub cost_breakdown: Vec<CostBreakdownItem>,
    pub timeline_estimate: String,
    pub contingency: Contingency,
    pub summary: String,
}

impl CostEstimate {
    /// Enforce the hard invariants on a parsed estimate.
    ///
    /// Returns a description of the first violation found. The percentage/cost sums are
    /// not checked here since they come from a generative model and are only approximate.
    pub fn check_ranges(&self) -> Result<(), String> {
        let total = &self.estimated_total_cost;
        non_negative("estimatedTotalCost.min", total.min)?;
        non_negative("estimatedTotalCost.max", total.max)?;
        if total.min > total.max {
            return Err(format!(
                "estimatedTotalCost.min ({}) exceeds estimatedTotalCost.max ({})",
                total.min, total.max
            ));
        }

        percentage("contingency.percentage", self.contingency.percentage)?;
        non_negative("contingency.amount", self.contingency.amount)?;

        for (i, item) in self.cost_breakdown.iter().enumerate() {
            non_negative(&format!("costBreakdown[{}].cost", i), item.cost)?;
            percentage(&format!("costBreakdown[{}].percentage", i), item.percentage)?;
        }

        Ok(())
    }

    /// Sum of the breakdown percentages.
    pub fn breakdown_percentage_total(&self) -> f64 {
        self.cost_breakdown.iter().map(|item| item.percentage).sum()
    }

    /// Sum of the breakdown costs.
    pub fn breakdown_cost_total(&self) -> f64 {
        self.cost_breakdown.iter().map(|item| item.cost).sum()
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a non-negative number, got {}", field, value));
    }
    Ok(())
}

fn percentage(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(format!("{} must be between 0 and 100, got {}", field, value));
    }
    Ok(())
}

// =============================================================================
// Request/Response DTOs for API endpoints
// =============================================================================

/// Estimate submission: the form instance id plus the request fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEstimateRequest {
    pub form_id: uuid::Uuid,
    #[serde(flatten)]
    pub request: CostEstimateRequest,
}

/// Options the estimator form offers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateOptionsResponse {
    pub project_types: Vec<ProjectType>,
    pub quality_levels: Vec<QualityLevel>,
}
