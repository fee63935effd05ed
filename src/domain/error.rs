use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Failed to load resources: {message}")]
    ResourceLoad { message: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Prediction error: {message}")]
    Prediction { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn resource_load(message: impl Into<String>) -> Self {
        Self::ResourceLoad {
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::ResourceLoad { .. } => "resource_load_error",
            Self::Encoding { .. } => "encoding_error",
            Self::Prediction { .. } => "prediction_error",
            Self::Export { .. } => "export_error",
            Self::Validation { .. } => "validation_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}
