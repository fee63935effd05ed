//! Ordinal encoder fit offline, one category list per column

use serde::Deserialize;

use crate::domain::{CategoricalEncoder, DomainError};

#[derive(Debug, Clone, Deserialize)]
struct EncoderColumn {
    name: String,
    categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EncoderDump {
    columns: Vec<EncoderColumn>,
}

/// Maps each category to its index in the fitted category list
#[derive(Debug, Clone)]
pub struct OrdinalEncoder {
    columns: Vec<EncoderColumn>,
}

impl OrdinalEncoder {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let dump: EncoderDump = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::resource_load(format!("Invalid encoder JSON: {}", e)))?;

        if dump.columns.is_empty() {
            return Err(DomainError::resource_load("Encoder has no columns"));
        }

        for column in &dump.columns {
            if column.categories.is_empty() {
                return Err(DomainError::resource_load(format!(
                    "Encoder column '{}' has no categories",
                    column.name
                )));
            }
        }

        Ok(Self {
            columns: dump.columns,
        })
    }
}

impl CategoricalEncoder for OrdinalEncoder {
    fn transform(&self, row: &[&str]) -> Result<Vec<f64>, DomainError> {
        if row.len() != self.columns.len() {
            return Err(DomainError::encoding(format!(
                "Expected {} categorical values, got {}",
                self.columns.len(),
                row.len()
            )));
        }

        row.iter()
            .zip(&self.columns)
            .map(|(value, column)| {
                column
                    .categories
                    .iter()
                    .position(|category| category == value)
                    .map(|rank| rank as f64)
                    .ok_or_else(|| {
                        DomainError::encoding(format!(
                            "Unknown category '{}' for column '{}'",
                            value, column.name
                        ))
                    })
            })
            .collect()
    }

    fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn categories(&self, column: &str) -> Option<Vec<String>> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.categories.clone())
    }
}
