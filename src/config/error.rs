//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be between 0 and 1, got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("Emergency confidence ({emergency}) must not exceed minimum confidence ({minimum})")]
    EmergencyAboveMinimum { emergency: f64, minimum: f64 },

    #[error("Invalid confidence settings: {0}")]
    InvalidConfidence(String),

    #[error("Invalid base weights: {0}")]
    InvalidBaseWeights(String),

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),
}
