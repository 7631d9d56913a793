//! Constant variables defined in settings

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use stencil_domain::{ResolutionContext, validate_variable_name};

use super::{Variable, VariableContribution, VariableResult};
use crate::ports::{RegistryError, VariableRegistry};

/// A variable that always resolves to the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVariable {
    name: String,
    value: String,
    description: String,
}

impl StaticVariable {
    /// Creates a constant variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: "User-defined constant".to_string(),
        }
    }

    /// Overrides the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the constant value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[async_trait]
impl Variable for StaticVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn resolve(&self, _context: &ResolutionContext) -> VariableResult<Option<Value>> {
        Ok(Some(Value::String(self.value.clone())))
    }
}

/// Registers a set of constant variables.
#[derive(Debug, Clone, Default)]
pub struct StaticVariableContribution {
    values: BTreeMap<String, String>,
}

impl StaticVariableContribution {
    /// Creates the contribution from name/value pairs.
    #[must_use]
    pub const fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl VariableContribution for StaticVariableContribution {
    fn register_variables(&self, registry: &dyn VariableRegistry) -> Result<(), RegistryError> {
        for (name, value) in &self.values {
            validate_variable_name(name)?;
            registry.register_variable(Arc::new(StaticVariable::new(name, value)))?;
        }
        Ok(())
    }
}
