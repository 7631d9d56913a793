//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A variable name can never be referenced by a `${name}` token.
    #[error("invalid variable name: {0:?}")]
    InvalidVariableName(String),

    /// A build configuration is missing a required field.
    #[error("invalid build configuration: {0}")]
    InvalidBuildConfiguration(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
