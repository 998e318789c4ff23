//! Validation errors raised by the stat engine

use thiserror::Error;

/// Why a field was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationReason {
    #[error("value is missing")]
    Missing,
    #[error("value is not a finite number")]
    NotFinite,
    #[error("value {0} is not a whole number")]
    NotWholeNumber(f64),
    #[error("value {value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("value {0} must not be negative")]
    Negative(i64),
    #[error("{0}")]
    Inconsistent(String),
}

/// A rejected input, naming the offending field by its stored path
/// (`abilityScores.wis`, `classes[1].level`, ...)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        ValidationError {
            field: field.into(),
            reason,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::Missing)
    }

    pub fn out_of_range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Self::new(field, ValidationReason::OutOfRange { value, min, max })
    }

    pub fn inconsistent(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::Inconsistent(detail.into()))
    }
}
