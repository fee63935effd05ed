//! Diamond domain - input attributes and their validation

mod entity;
mod validation;

#[cfg(test)]
pub use entity::fixtures;
pub use entity::{Clarity, Color, Cut, PredictionForm, PredictionInput};
pub use validation::{
    validate_carat, validate_dimension, validate_table, DiamondValidationError, CARAT_RANGE,
    DIMENSION_RANGE, TABLE_RANGE,
};
