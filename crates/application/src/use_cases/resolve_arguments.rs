//! Resolve arguments use case

use stencil_domain::ResolutionContext;

use crate::error::{ApplicationError, ApplicationResult};
use crate::variable_resolver::{ResolutionResult, VariableResolverService};

/// Input for resolving a list of arguments.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgumentsInput {
    /// Strings to resolve, in order.
    pub arguments: Vec<String>,
    /// Context made available to variables.
    pub context: ResolutionContext,
    /// Fail when any token is left unresolved.
    pub strict: bool,
}

/// Output with one detailed result per argument.
#[derive(Debug, Clone)]
pub struct ResolveArgumentsOutput {
    /// Results in argument order.
    pub results: Vec<ResolutionResult>,
}

impl ResolveArgumentsOutput {
    /// Returns the resolved strings in argument order.
    #[must_use]
    pub fn resolved(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.resolved.as_str()).collect()
    }

    /// Returns the distinct unresolved names across all arguments, in order.
    #[must_use]
    pub fn unresolved_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for unresolved in self.results.iter().flat_map(|r| &r.unresolved) {
            if !names.contains(&unresolved.name) {
                names.push(unresolved.name.clone());
            }
        }
        names
    }
}

/// Resolves every argument of a command line, one after another.
pub struct ResolveArguments {
    resolver: VariableResolverService,
}

impl ResolveArguments {
    /// Creates a new `ResolveArguments` use case.
    #[must_use]
    pub const fn new(resolver: VariableResolverService) -> Self {
        Self { resolver }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::Unresolved` in strict mode when any token
    /// could not be resolved.
    pub async fn execute(
        &self,
        input: ResolveArgumentsInput,
    ) -> ApplicationResult<ResolveArgumentsOutput> {
        let mut results = Vec::with_capacity(input.arguments.len());
        for argument in &input.arguments {
            results.push(
                self.resolver
                    .resolve_detailed(argument, Some(&input.context))
                    .await,
            );
        }

        let output = ResolveArgumentsOutput { results };
        if input.strict {
            let unresolved = output.unresolved_names();
            if !unresolved.is_empty() {
                return Err(ApplicationError::Unresolved(unresolved));
            }
        }
        Ok(output)
    }
}
