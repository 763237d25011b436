//! Error types for PNBA Core

use crate::graph::Distance;
use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using PNBA's Error
pub type Result<T> = std::result::Result<T, Error>;

/// PNBA error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Distance overflow: {left} + {right}")]
    Overflow { left: Distance, right: Distance },

    #[error("Search task failed: {0}")]
    TaskFailed(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for an invalid-argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// True for errors caused by distances exceeding the representable range
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}
