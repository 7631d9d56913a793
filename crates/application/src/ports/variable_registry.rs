//! Variable registry port
//!
//! Defines the name-keyed store variables are registered in and looked up from.

use std::sync::Arc;

use stencil_domain::DomainError;

use crate::variables::Variable;

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The variable name can never be referenced by a token.
    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),
}

impl From<DomainError> for RegistryError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidVariableName(name) => Self::InvalidName(name),
            other => Self::InvalidName(other.to_string()),
        }
    }
}

/// Registry of named variables.
///
/// Implementations must be safe to read while another caller registers:
/// a lookup sees either the previous definition or the new one, never a
/// partially registered entry.
pub trait VariableRegistry: Send + Sync {
    /// Registers a variable under its name.
    ///
    /// An existing variable with the same name is replaced (last writer wins)
    /// and returned.
    ///
    /// # Errors
    /// Returns `RegistryError::InvalidName` if the name cannot be referenced.
    fn register_variable(
        &self,
        variable: Arc<dyn Variable>,
    ) -> Result<Option<Arc<dyn Variable>>, RegistryError>;

    /// Looks up a variable by its exact, case-sensitive name.
    fn get_variable(&self, name: &str) -> Option<Arc<dyn Variable>>;

    /// Removes a variable, returning it if it was registered.
    fn unregister_variable(&self, name: &str) -> Option<Arc<dyn Variable>>;

    /// Returns every registered variable, sorted by name.
    fn variables(&self) -> Vec<Arc<dyn Variable>>;

    /// Returns true if a variable is registered under `name`.
    fn contains(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }
}
