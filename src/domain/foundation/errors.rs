//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failures raised by the decision engine components.
///
/// Everything except `NumericFailure` is an input error: raised by the
/// offending component, never retried, and returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error("Invalid criteria: {reason}")]
    InvalidCriteria { reason: String },

    #[error("Degenerate comparison matrix: {reason}")]
    DegenerateMatrix { reason: String },

    #[error("Cannot rank an empty set of alternatives")]
    EmptyAlternativeSet,

    #[error("Alternative '{alternative_id}' has {actual} criterion scores, expected {expected}")]
    DimensionMismatch {
        alternative_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Numeric failure during {stage}: {reason}")]
    NumericFailure { stage: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DecisionError {
    /// Creates an invalid criteria error.
    pub fn invalid_criteria(reason: impl Into<String>) -> Self {
        DecisionError::InvalidCriteria {
            reason: reason.into(),
        }
    }

    /// Creates a degenerate matrix error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        DecisionError::DegenerateMatrix {
            reason: reason.into(),
        }
    }

    /// Creates a numeric failure for the named computation stage.
    pub fn numeric(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        DecisionError::NumericFailure {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the caller's input.
    ///
    /// Internal failures return false and are converted into a blocked
    /// outcome at the pipeline boundary.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, DecisionError::NumericFailure { .. })
    }

    /// Returns the error code used when this error crosses a port boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::InvalidCriteria { .. } => ErrorCode::InvalidCriteria,
            DecisionError::DegenerateMatrix { .. } => ErrorCode::DegenerateMatrix,
            DecisionError::EmptyAlternativeSet => ErrorCode::EmptyAlternativeSet,
            DecisionError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            DecisionError::NumericFailure { .. } => ErrorCode::ComputationFailure,
            DecisionError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Engine input errors
    InvalidCriteria,
    DegenerateMatrix,
    EmptyAlternativeSet,
    DimensionMismatch,

    // Catalog errors
    CatalogNotFound,
    CatalogUnreadable,

    // Gate errors
    InvalidStateTransition,
    Unauthorized,

    // Internal errors
    ComputationFailure,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidCriteria => "INVALID_CRITERIA",
            ErrorCode::DegenerateMatrix => "DEGENERATE_MATRIX",
            ErrorCode::EmptyAlternativeSet => "EMPTY_ALTERNATIVE_SET",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::CatalogNotFound => "CATALOG_NOT_FOUND",
            ErrorCode::CatalogUnreadable => "CATALOG_UNREADABLE",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ComputationFailure => "COMPUTATION_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let (code, field) = match &err {
            ValidationError::EmptyField { field } => (ErrorCode::EmptyField, field.clone()),
            ValidationError::OutOfRange { field, .. } => (ErrorCode::OutOfRange, field.clone()),
            ValidationError::InvalidFormat { field, .. } => (ErrorCode::InvalidFormat, field.clone()),
        };
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

impl From<DecisionError> for DomainError {
    fn from(err: DecisionError) -> Self {
        let code = err.code();
        let domain = DomainError::new(code, err.to_string());
        match err {
            DecisionError::DimensionMismatch { alternative_id, .. } => {
                domain.with_detail("alternative_id", alternative_id)
            }
            DecisionError::NumericFailure { stage, .. } => domain.with_detail("stage", stage),
            _ => domain,
        }
    }
}
