//! Error types for the nutrition tracker core

use thiserror::Error;

/// Errors produced by the core operations
///
/// Every operation that returns one of these has left no partial state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Nothing to log: {0}")]
    EmptyInput(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CoreError::InvalidInput(message.into())
    }

    pub fn external(message: impl Into<String>) -> Self {
        CoreError::ExternalService(message.into())
    }
}

/// Result alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
