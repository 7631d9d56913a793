//! Stencil Application - Resolution engine, providers and ports
//!
//! This crate defines the application layer with:
//! - Port traits (registry, build manager, selection prompt)
//! - The variable provider contract and the built-in providers
//! - The `${variable}` resolution engine
//! - Use case orchestration

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;
pub mod variables;

#[cfg(test)]
mod test_support;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    BuildManager, BuildManagerError, PickOutcome, PickRequest, PromptError, RegistryError,
    SelectionPrompt, VariableRegistry,
};
pub use use_cases::{
    ListVariables, ListVariablesOutput, ResolveArguments, ResolveArgumentsInput,
    ResolveArgumentsOutput, VariableListing,
};
pub use variable_resolver::{ResolutionResult, VariableResolverService};
pub use variables::{Variable, VariableContribution, VariableError, VariableResult};
