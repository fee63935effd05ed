//! Range validation for numeric diamond attributes

use thiserror::Error;

use crate::domain::DomainError;

pub const CARAT_RANGE: (f64, f64) = (0.1, 10.0);
pub const TABLE_RANGE: (f64, f64) = (50.0, 80.0);
/// Shared by length, width and depth (mm)
pub const DIMENSION_RANGE: (f64, f64) = (0.1, 11.0);

/// Diamond attribute validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiamondValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("Invalid {field} {value}: must be between {min} and {max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<DiamondValidationError> for DomainError {
    fn from(err: DiamondValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

fn check_range(field: &str, value: f64, range: (f64, f64)) -> Result<(), DiamondValidationError> {
    if !value.is_finite() {
        return Err(DiamondValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    let (min, max) = range;

    if !(min..=max).contains(&value) {
        return Err(DiamondValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }

    Ok(())
}

/// Validate carat weight
pub fn validate_carat(carat: f64) -> Result<(), DiamondValidationError> {
    check_range("carat", carat, CARAT_RANGE)
}

/// Validate table percentage
pub fn validate_table(table: f64) -> Result<(), DiamondValidationError> {
    check_range("table", table, TABLE_RANGE)
}

/// Validate one of the x/y/z dimensions
pub fn validate_dimension(field: &str, value: f64) -> Result<(), DiamondValidationError> {
    check_range(field, value, DIMENSION_RANGE)
}
