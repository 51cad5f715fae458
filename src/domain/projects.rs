use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Planning,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
            Self::OnHold => write!(f, "On Hold"),
            Self::Planning => write!(f, "Planning"),
        }
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    /// Completion percentage, 0..=100
    pub progress: u8,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub budget: f64,
    pub spent: f64,
}

/// Request DTO for creating a project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub client: String,
    pub deadline: NaiveDate,
    pub budget: f64,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.client.trim().is_empty() {
            return Err("client is required".to_string());
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err("budget must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// Query filter for the project list
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectQuery {
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}
