//! Workspace variables

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use stencil_domain::{ContextKey, ResolutionContext};

use super::{Variable, VariableContribution, VariableError, VariableResult};
use crate::ports::{RegistryError, VariableRegistry};

/// Name of the workspace root path variable.
pub const WORKSPACE_ROOT_VARIABLE: &str = "workspace.root";
/// Name of the workspace root directory name variable.
pub const WORKSPACE_ROOT_NAME_VARIABLE: &str = "workspace.rootName";

const REQUIRED_CONTEXTS: [ContextKey; 1] = [ContextKey::Workspace];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkspaceField {
    Root,
    RootName,
}

/// A variable reading from the open workspace.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceVariable {
    field: WorkspaceField,
}

impl WorkspaceVariable {
    /// `${workspace.root}`: absolute path of the workspace root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            field: WorkspaceField::Root,
        }
    }

    /// `${workspace.rootName}`: last component of the workspace root.
    #[must_use]
    pub const fn root_name() -> Self {
        Self {
            field: WorkspaceField::RootName,
        }
    }
}

#[async_trait]
impl Variable for WorkspaceVariable {
    fn name(&self) -> &str {
        match self.field {
            WorkspaceField::Root => WORKSPACE_ROOT_VARIABLE,
            WorkspaceField::RootName => WORKSPACE_ROOT_NAME_VARIABLE,
        }
    }

    fn description(&self) -> &str {
        match self.field {
            WorkspaceField::Root => "Path of the workspace root directory",
            WorkspaceField::RootName => "Name of the workspace root directory",
        }
    }

    fn contexts(&self) -> Option<&[ContextKey]> {
        Some(&REQUIRED_CONTEXTS)
    }

    async fn resolve(&self, context: &ResolutionContext) -> VariableResult<Option<Value>> {
        let workspace = context
            .workspace()
            .ok_or(VariableError::MissingContext(ContextKey::Workspace))?;

        // Non UTF-8 paths produce no value rather than a lossy one.
        let value = match self.field {
            WorkspaceField::Root => workspace.root().to_str(),
            WorkspaceField::RootName => workspace.root_name(),
        };
        Ok(value.map(|text| Value::String(text.to_string())))
    }
}

/// Registers the workspace variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceVariableContribution;

impl VariableContribution for WorkspaceVariableContribution {
    fn register_variables(&self, registry: &dyn VariableRegistry) -> Result<(), RegistryError> {
        registry.register_variable(Arc::new(WorkspaceVariable::root()))?;
        registry.register_variable(Arc::new(WorkspaceVariable::root_name()))?;
        Ok(())
    }
}
