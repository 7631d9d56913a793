//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod build_manager;
mod selection_prompt;
mod variable_registry;

pub use build_manager::{BuildManager, BuildManagerError};
pub use selection_prompt::{
    InputEcho, PickItem, PickItemKind, PickOutcome, PickRequest, PromptError, SelectionPrompt,
};
pub use variable_registry::{RegistryError, VariableRegistry};
