//! Domain types and DTOs
//!
//! These types define the data structures for the dashboard entities and the
//! AI cost estimate contract.

pub mod employees;
pub mod estimate;
pub mod hiring;
pub mod inventory;
pub mod invoices;
pub mod notifications;
pub mod projects;

// Re-export commonly used types
pub use employees::*;
pub use hiring::*;
pub use inventory::*;
pub use invoices::*;
pub use notifications::*;
pub use projects::*;

// Estimate types are accessed via crate::domain::estimate:: to keep the contract explicit
