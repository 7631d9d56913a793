//! List variables use case

use std::sync::Arc;

use stencil_domain::{ResolutionContext, VariableDescriptor};

use crate::ports::VariableRegistry;

/// One registered variable and whether it applies to the given context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableListing {
    /// The variable's metadata.
    pub descriptor: VariableDescriptor,
    /// True when every context key the variable requires is present.
    pub applicable: bool,
}

/// Output containing the registered variables.
pub struct ListVariablesOutput {
    /// Variables sorted by name.
    pub variables: Vec<VariableListing>,
}

/// Lists the variables registered in a registry.
pub struct ListVariables {
    registry: Arc<dyn VariableRegistry>,
}

impl ListVariables {
    /// Creates a new `ListVariables` use case.
    #[must_use]
    pub fn new(registry: Arc<dyn VariableRegistry>) -> Self {
        Self { registry }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `context` - Context to check applicability against; `None` is an empty context
    #[must_use]
    pub fn execute(&self, context: Option<&ResolutionContext>) -> ListVariablesOutput {
        let empty = ResolutionContext::new();
        let context = context.unwrap_or(&empty);

        let mut variables: Vec<VariableListing> = self
            .registry
            .variables()
            .iter()
            .map(|variable| {
                let descriptor = variable.descriptor();
                let applicable = descriptor
                    .contexts
                    .as_deref()
                    .is_none_or(|required| context.contains_all(required));
                VariableListing {
                    descriptor,
                    applicable,
                }
            })
            .collect();
        variables.sort_by(|a, b| a.descriptor.name.cmp(&b.descriptor.name));

        ListVariablesOutput { variables }
    }
}
