//! Interactive build target variable
//!
//! Resolves `${build.target}` by asking the user to pick one of the targets
//! the build manager knows for the task's build configuration.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use stencil_domain::{ContextKey, ResolutionContext};

use super::{Variable, VariableContribution, VariableError, VariableResult};
use crate::ports::{
    BuildManager, InputEcho, PickItem, PickItemKind, PickOutcome, PickRequest, RegistryError,
    SelectionPrompt, VariableRegistry,
};

/// Name of the build target variable.
pub const BUILD_TARGET_VARIABLE: &str = "build.target";

const REQUIRED_CONTEXTS: [ContextKey; 1] = [ContextKey::BuildTask];
const PLACEHOLDER: &str = "Enter the target to build...";
const NO_TARGET_DESCRIPTION: &str = "No target";
const INPUT_GROUP: &str = "Input";
const TARGETS_GROUP: &str = "Available Targets";

/// Builds the choice list offered when no target is pinned.
///
/// The first target starts the "Available Targets" group; target order is
/// kept as given.
#[must_use]
pub fn build_target_request(targets: Vec<String>) -> PickRequest {
    let mut request = PickRequest::new(PLACEHOLDER);
    request.fuzzy_match_label = true;
    request.fixed.push(
        PickItem::new(PickItemKind::Fixed, String::new()).with_description(NO_TARGET_DESCRIPTION),
    );
    request.input_echo = Some(InputEcho {
        group_label: INPUT_GROUP.to_string(),
    });
    request.candidates = targets
        .into_iter()
        .enumerate()
        .map(|(index, target)| {
            let item = PickItem::new(PickItemKind::Candidate, target);
            if index == 0 {
                item.with_group(TARGETS_GROUP, true)
            } else {
                item
            }
        })
        .collect();
    request
}

/// The `${build.target}` variable.
pub struct BuildTargetVariable {
    build_manager: Arc<dyn BuildManager>,
    prompt: Arc<dyn SelectionPrompt>,
}

impl BuildTargetVariable {
    /// Creates the variable with its collaborators.
    #[must_use]
    pub fn new(build_manager: Arc<dyn BuildManager>, prompt: Arc<dyn SelectionPrompt>) -> Self {
        Self {
            build_manager,
            prompt,
        }
    }
}

#[async_trait]
impl Variable for BuildTargetVariable {
    fn name(&self) -> &str {
        BUILD_TARGET_VARIABLE
    }

    fn description(&self) -> &str {
        "Build target to use when building the project"
    }

    fn contexts(&self) -> Option<&[ContextKey]> {
        Some(&REQUIRED_CONTEXTS)
    }

    async fn resolve(&self, context: &ResolutionContext) -> VariableResult<Option<Value>> {
        let task = context
            .build_task()
            .ok_or(VariableError::MissingContext(ContextKey::BuildTask))?;

        if let Some(target) = &task.build_target {
            debug!(target = %target, "build target already pinned");
            return Ok(Some(Value::String(target.clone())));
        }

        let configuration = &task.build_configuration;
        let targets = self.build_manager.targets(configuration).await?;
        debug!(
            configuration = %configuration.name,
            target_count = targets.len(),
            "prompting for build target"
        );

        match self.prompt.pick(build_target_request(targets)).await? {
            PickOutcome::Selected(target) => Ok(Some(Value::String(target))),
            PickOutcome::Cancelled => Err(VariableError::Aborted),
        }
    }
}

/// Registers the build variables.
pub struct BuildVariableContribution {
    build_manager: Arc<dyn BuildManager>,
    prompt: Arc<dyn SelectionPrompt>,
}

impl BuildVariableContribution {
    /// Creates the contribution with the collaborators its variables need.
    #[must_use]
    pub fn new(build_manager: Arc<dyn BuildManager>, prompt: Arc<dyn SelectionPrompt>) -> Self {
        Self {
            build_manager,
            prompt,
        }
    }
}

impl VariableContribution for BuildVariableContribution {
    fn register_variables(&self, registry: &dyn VariableRegistry) -> Result<(), RegistryError> {
        registry.register_variable(Arc::new(BuildTargetVariable::new(
            Arc::clone(&self.build_manager),
            Arc::clone(&self.prompt),
        )))?;
        Ok(())
    }
}
