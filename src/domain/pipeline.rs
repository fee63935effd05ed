//! Prediction pipeline: encode, assemble, predict

use tracing::debug;

use crate::domain::artifacts::Artifacts;
use crate::domain::diamond::PredictionInput;
use crate::domain::DomainError;

/// Categorical columns, in the order the encoder was fit on
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["cut", "color", "clarity"];

/// Numeric columns, appended after the encoded categoricals
pub const NUMERIC_COLUMNS: [&str; 5] = ["carat", "table", "x", "y", "z"];

/// Total width of the regressor's feature row
pub const FEATURE_COUNT: usize = CATEGORICAL_COLUMNS.len() + NUMERIC_COLUMNS.len();

/// Feature column names in regressor order
pub fn feature_names() -> Vec<&'static str> {
    CATEGORICAL_COLUMNS
        .iter()
        .chain(NUMERIC_COLUMNS.iter())
        .copied()
        .collect()
}

/// Build the single feature row for `input`.
///
/// Layout: `[cut, color, clarity, carat, table, x, y, z]`.
pub fn build_features(artifacts: &Artifacts, input: &PredictionInput) -> Result<Vec<f64>, DomainError> {
    let encoded = artifacts
        .categorical_encoder
        .transform(&input.categorical_row())?;

    if encoded.len() != CATEGORICAL_COLUMNS.len() {
        return Err(DomainError::encoding(format!(
            "Encoder produced {} columns, expected {}",
            encoded.len(),
            CATEGORICAL_COLUMNS.len()
        )));
    }

    let mut features = Vec::with_capacity(FEATURE_COUNT);
    features.extend(encoded);
    features.extend(input.numeric_row());

    Ok(features)
}

/// Predict the price of one diamond.
///
/// Pure given fixed artifacts. A negative regressor output is floored at
/// zero; a non-finite one is a `Prediction` error.
pub fn predict_price(artifacts: &Artifacts, input: &PredictionInput) -> Result<f64, DomainError> {
    let features = build_features(artifacts, input)?;

    if let Some(expected) = artifacts.regressor.num_features() {
        if expected != features.len() {
            return Err(DomainError::prediction(format!(
                "Regressor expects {} features, got {}",
                expected,
                features.len()
            )));
        }
    }

    let raw = artifacts.regressor.predict(&features)?;

    if !raw.is_finite() {
        return Err(DomainError::prediction(format!(
            "Regressor returned a non-finite value: {}",
            raw
        )));
    }

    debug!(?features, raw, "Regressor output");

    Ok(raw.max(0.0))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::artifacts::NumericTransformer;
    use crate::domain::artifacts::mock::{
        mock_artifacts, IdentityTransformers, MockEncoder, MockRegressor,
    };
    use crate::domain::diamond::fixtures::{ideal_form, ideal_input};
    use crate::domain::diamond::{Clarity, Color, Cut, PredictionForm};

    #[test]
    fn test_feature_layout() {
        let features = build_features(&mock_artifacts(), &ideal_input()).unwrap();

        // Ideal=4, D=6, IF=7 then carat, table, x, y, z
        assert_eq!(features, vec![4.0, 6.0, 7.0, 1.0, 57.0, 6.0, 6.0, 3.7]);
        assert_eq!(feature_names(), vec!["cut", "color", "clarity", "carat", "table", "x", "y", "z"]);
    }

    #[test]
    fn test_predict_price() {
        let price = predict_price(&mock_artifacts(), &ideal_input()).unwrap();
        assert_eq!(price, 100.0 * (4.0 + 6.0 + 7.0) + 1000.0);
    }

    /// Fails every transform so any call would surface as an error
    #[derive(Debug)]
    struct RejectingTransformers;

    impl NumericTransformer for RejectingTransformers {
        fn transform(&self, column: &str, _value: f64) -> Result<f64, DomainError> {
            Err(DomainError::prediction(format!("transform called for '{}'", column)))
        }

        fn columns(&self) -> Vec<String> {
            vec!["carat".to_string()]
        }
    }

    #[test]
    fn test_numeric_transformers_are_not_applied() {
        let artifacts = Artifacts::new(
            Arc::new(MockRegressor::new(0.0, vec![100.0, 100.0, 100.0, 1000.0, 0.0, 0.0, 0.0, 0.0])),
            Arc::new(MockEncoder::diamond()),
            Arc::new(RejectingTransformers),
        );

        let price = predict_price(&artifacts, &ideal_input()).unwrap();
        assert_eq!(price, predict_price(&mock_artifacts(), &ideal_input()).unwrap());
        assert_eq!(artifacts.summary().transformer_columns, vec!["carat"]);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let artifacts = mock_artifacts();
        let input = ideal_input();

        let first = predict_price(&artifacts, &input).unwrap();
        let second = predict_price(&artifacts, &input).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_valid_inputs_give_finite_non_negative_prices() {
        let artifacts = Artifacts::new(
            Arc::new(MockRegressor::new(-5000.0, vec![10.0; FEATURE_COUNT])),
            Arc::new(MockEncoder::diamond()),
            Arc::new(IdentityTransformers),
        );

        for cut in Cut::ALL {
            for color in Color::ALL {
                for clarity in Clarity::ALL {
                    for carat in [0.1, 2.5, 10.0] {
                        let form = PredictionForm {
                            carat,
                            cut: cut.label().to_string(),
                            color: color.label().to_string(),
                            clarity: clarity.label().to_string(),
                            ..ideal_form()
                        };
                        let input = PredictionInput::try_from(form).unwrap();
                        let price = predict_price(&artifacts, &input).unwrap();
                        assert!(price.is_finite());
                        assert!(price >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_shape_mismatch_is_prediction_error() {
        let artifacts = Artifacts::new(
            Arc::new(MockRegressor::new(0.0, vec![1.0; 6])),
            Arc::new(MockEncoder::diamond()),
            Arc::new(IdentityTransformers),
        );

        let err = predict_price(&artifacts, &ideal_input()).unwrap_err();
        assert!(matches!(err, DomainError::Prediction { .. }));
    }

    #[test]
    fn test_non_finite_output_is_prediction_error() {
        let artifacts = Artifacts::new(
            Arc::new(MockRegressor::new(f64::NAN, vec![0.0; FEATURE_COUNT])),
            Arc::new(MockEncoder::diamond()),
            Arc::new(IdentityTransformers),
        );

        let err = predict_price(&artifacts, &ideal_input()).unwrap_err();
        assert!(matches!(err, DomainError::Prediction { .. }));
    }
}
