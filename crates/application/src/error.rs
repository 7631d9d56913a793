//! Application error types

use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Tokens remained unresolved where complete resolution was required.
    #[error("unresolved variables: {}", .0.join(", "))]
    Unresolved(Vec<String>),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
