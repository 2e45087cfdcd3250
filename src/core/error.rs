//! Error types for planet creation and configuration

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Invalid planet configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Planet '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a `PlanetConfig` is rejected before any property is derived.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("planet name must be 1-{max_len} characters, got {len}")]
    InvalidName { len: usize, max_len: usize },

    #[error("incompatible settings: {reason}")]
    Incompatible { reason: String },
}

impl ValidationError {
    /// Name of the offending field, if the error is tied to one slider.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::OutOfRange { field, .. } => Some(*field),
            ValidationError::NotFinite { field } => Some(*field),
            ValidationError::InvalidName { .. } => Some("name"),
            ValidationError::Incompatible { .. } => None,
        }
    }
}
