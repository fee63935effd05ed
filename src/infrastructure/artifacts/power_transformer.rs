//! Yeo-Johnson power transforms fit per numeric column

use serde::Deserialize;

use crate::domain::{DomainError, NumericTransformer};

#[derive(Debug, Clone, Deserialize)]
struct PowerColumn {
    name: String,
    lambda: f64,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    std: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct TransformerDump {
    columns: Vec<PowerColumn>,
}

/// One Yeo-Johnson transformer per column, optionally standardized
#[derive(Debug, Clone)]
pub struct PowerTransformerSet {
    columns: Vec<PowerColumn>,
}

impl PowerTransformerSet {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let dump: TransformerDump = serde_json::from_slice(bytes).map_err(|e| {
            DomainError::resource_load(format!("Invalid power transformer JSON: {}", e))
        })?;

        for column in &dump.columns {
            if !column.lambda.is_finite() {
                return Err(DomainError::resource_load(format!(
                    "Non-finite lambda for column '{}'",
                    column.name
                )));
            }
            if matches!(column.std, Some(std) if std <= 0.0) {
                return Err(DomainError::resource_load(format!(
                    "Non-positive std for column '{}'",
                    column.name
                )));
            }
        }

        Ok(Self {
            columns: dump.columns,
        })
    }
}

/// Yeo-Johnson transform of a single value
pub fn yeo_johnson(value: f64, lambda: f64) -> f64 {
    const EPS: f64 = 1e-12;

    if value >= 0.0 {
        if lambda.abs() < EPS {
            value.ln_1p()
        } else {
            ((value + 1.0).powf(lambda) - 1.0) / lambda
        }
    } else if (lambda - 2.0).abs() < EPS {
        -(-value).ln_1p()
    } else {
        -((1.0 - value).powf(2.0 - lambda) - 1.0) / (2.0 - lambda)
    }
}

impl NumericTransformer for PowerTransformerSet {
    fn transform(&self, column: &str, value: f64) -> Result<f64, DomainError> {
        let spec = self
            .columns
            .iter()
            .find(|c| c.name == column)
            .ok_or_else(|| {
                DomainError::prediction(format!("No power transformer for column '{}'", column))
            })?;

        let transformed = yeo_johnson(value, spec.lambda);

        Ok(match (spec.mean, spec.std) {
            (Some(mean), Some(std)) => (transformed - mean) / std,
            _ => transformed,
        })
    }

    fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}
