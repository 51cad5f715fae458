//! Hiring domain types
//!
//! Open job postings and the applicants moving through the hiring pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    Contract,
}

/// Job posting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

/// Applicant pipeline stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicantStage {
    New,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl Default for ApplicantStage {
    fn default() -> Self {
        Self::New
    }
}

/// Applicant entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub stage: ApplicantStage,
    pub applied_date: NaiveDate,
}

/// Request DTO for adding a candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicantRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub job_id: Option<String>,
}

impl CreateApplicantRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("email must be a valid address".to_string());
        }
        Ok(())
    }
}

/// Request DTO for moving an applicant to another stage
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: ApplicantStage,
}
