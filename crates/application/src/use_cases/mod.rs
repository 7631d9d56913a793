//! Application use cases (business logic orchestration).

mod list_variables;
mod resolve_arguments;

pub use list_variables::{ListVariables, ListVariablesOutput, VariableListing};
pub use resolve_arguments::{ResolveArguments, ResolveArgumentsInput, ResolveArgumentsOutput};
