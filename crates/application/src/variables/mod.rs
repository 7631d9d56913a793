//! Variable provider contract
//!
//! A [`Variable`] is a named unit of resolution registered in a
//! [`VariableRegistry`](crate::ports::VariableRegistry). A
//! [`VariableContribution`] groups the variables one platform feature
//! registers at setup.

mod build_target;
mod static_value;
mod workspace;

use async_trait::async_trait;
use serde_json::Value;

use stencil_domain::{ContextKey, ResolutionContext, VariableDescriptor};

use crate::ports::{BuildManagerError, PromptError, RegistryError, VariableRegistry};

pub use build_target::{
    BUILD_TARGET_VARIABLE, BuildTargetVariable, BuildVariableContribution, build_target_request,
};
pub use static_value::{StaticVariable, StaticVariableContribution};
pub use workspace::{
    WORKSPACE_ROOT_NAME_VARIABLE, WORKSPACE_ROOT_VARIABLE, WorkspaceVariable,
    WorkspaceVariableContribution,
};

/// Errors a variable can fail with while resolving.
///
/// The resolver never surfaces these to its callers; a failing variable is
/// simply left unresolved.
#[derive(Debug, thiserror::Error)]
pub enum VariableError {
    /// The user abandoned an interaction.
    #[error("Abort")]
    Aborted,

    /// A context payload the variable reads is not present.
    #[error("missing context payload: {0}")]
    MissingContext(ContextKey),

    /// Enumerating build targets failed.
    #[error("target enumeration failed: {0}")]
    Enumeration(#[from] BuildManagerError),

    /// The prompt could not be shown.
    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),

    /// Any other failure.
    #[error("{0}")]
    Failed(String),
}

/// Result type alias for variable resolution.
pub type VariableResult<T> = Result<T, VariableError>;

/// A named, registered unit of resolution.
#[async_trait]
pub trait Variable: Send + Sync {
    /// Unique name, also the token text inside `${...}`.
    fn name(&self) -> &str;

    /// Human-readable documentation. Not used for resolution.
    fn description(&self) -> &str {
        ""
    }

    /// Context keys that must all be present for this variable to apply.
    fn contexts(&self) -> Option<&[ContextKey]> {
        None
    }

    /// Produces the variable's value for `context`.
    ///
    /// Only `Some(Value::String(_))` is substituted; `None` or any other JSON
    /// value means "no value". Variables without a resolution function keep
    /// the default, which produces nothing.
    ///
    /// # Errors
    /// Returns an error if resolution failed or was abandoned.
    async fn resolve(&self, context: &ResolutionContext) -> VariableResult<Option<Value>> {
        let _ = context;
        Ok(None)
    }

    /// Returns the variable's static metadata.
    fn descriptor(&self) -> VariableDescriptor {
        VariableDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            contexts: self.contexts().map(<[ContextKey]>::to_vec),
        }
    }
}

/// A platform feature that registers variables at setup.
pub trait VariableContribution: Send + Sync {
    /// Registers this contribution's variables.
    ///
    /// # Errors
    /// Returns an error if a variable is rejected by the registry.
    fn register_variables(&self, registry: &dyn VariableRegistry) -> Result<(), RegistryError>;
}

/// Runs every contribution against the registry, in order.
///
/// Later contributions replace variables registered earlier under the same name.
///
/// # Errors
/// Stops at and returns the first registration error.
pub fn register_contributions(
    registry: &dyn VariableRegistry,
    contributions: &[&dyn VariableContribution],
) -> Result<(), RegistryError> {
    for contribution in contributions {
        contribution.register_variables(registry)?;
    }
    Ok(())
}
