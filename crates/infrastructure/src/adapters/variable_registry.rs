//! In-memory variable registry

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use stencil_application::ports::{RegistryError, VariableRegistry};
use stencil_application::variables::Variable;
use stencil_domain::validate_variable_name;
use tracing::debug;

/// Process-wide registry holding variables in a name-keyed map.
///
/// Writers take the lock only to swap a whole entry, so readers see either
/// the old definition or the new one.
#[derive(Default)]
pub struct InMemoryVariableRegistry {
    variables: RwLock<HashMap<String, Arc<dyn Variable>>>,
}

impl InMemoryVariableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for InMemoryVariableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVariableRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl VariableRegistry for InMemoryVariableRegistry {
    fn register_variable(
        &self,
        variable: Arc<dyn Variable>,
    ) -> Result<Option<Arc<dyn Variable>>, RegistryError> {
        let name = validate_variable_name(variable.name())?.to_string();
        let previous = self
            .variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), variable);

        if previous.is_some() {
            debug!(variable = %name, "variable re-registered, previous definition replaced");
        } else {
            debug!(variable = %name, "variable registered");
        }
        Ok(previous)
    }

    fn get_variable(&self, name: &str) -> Option<Arc<dyn Variable>> {
        self.variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn unregister_variable(&self, name: &str) -> Option<Arc<dyn Variable>> {
        let removed = self
            .variables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        if removed.is_some() {
            debug!(variable = %name, "variable unregistered");
        }
        removed
    }

    fn variables(&self) -> Vec<Arc<dyn Variable>> {
        let mut variables: Vec<_> = self
            .variables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        variables.sort_by(|a, b| a.name().cmp(b.name()));
        variables
    }
}
