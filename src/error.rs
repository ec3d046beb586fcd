//! Error types for loading and exporting plans
//!
//! The projection itself never fails; only the I/O edges around it do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown contribution frequency: {0}")]
    UnknownContributionFrequency(String),

    #[error("Unknown compounding frequency: {0}")]
    UnknownCompoundingFrequency(String),

    #[error("Unknown tax timing: {0}")]
    UnknownTaxTiming(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
