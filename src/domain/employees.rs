use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub avatar: String,
    pub status: EmployeeStatus,
}

/// Request DTO for adding an employee
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub role: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub hire_date: NaiveDate,
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.role.trim().is_empty() {
            return Err("role is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("email must be a valid address".to_string());
        }
        Ok(())
    }
}
