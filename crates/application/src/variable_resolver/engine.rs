//! Variable resolution engine
//!
//! Resolves `${variable}` references against a [`VariableRegistry`].

use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use stencil_domain::{ResolutionContext, ResolvedVariable, UnresolvedReason, UnresolvedVariable};

use super::parser::{VariableReference, parse_variables};
use crate::ports::VariableRegistry;
use crate::variables::Variable;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The resolved string with every available value substituted.
    pub resolved: String,

    /// Variables that produced a value, in order of first occurrence.
    pub resolved_variables: Vec<ResolvedVariable>,

    /// Token names left verbatim, in order of first occurrence.
    pub unresolved: Vec<UnresolvedVariable>,

    /// Whether every token was substituted.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }

    /// Returns the count of resolved variables.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved_variables.len()
    }

    /// Returns the count of unresolved variables.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// Per-name outcome of one resolve call.
type ValueMap = HashMap<String, Result<String, UnresolvedReason>>;

/// Resolves `${name}` tokens in strings.
///
/// Every call builds its value map from scratch: nothing is cached between
/// calls, and a value is inserted verbatim without being scanned again.
#[derive(Clone)]
pub struct VariableResolverService {
    registry: Arc<dyn VariableRegistry>,
}

impl VariableResolverService {
    /// Creates a resolver reading from `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn VariableRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this resolver reads from.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn VariableRegistry> {
        &self.registry
    }

    /// Resolves the variables in `text`.
    ///
    /// Never fails: tokens that cannot be resolved stay in the output as written.
    pub async fn resolve(&self, text: &str, context: Option<&ResolutionContext>) -> String {
        self.resolve_detailed(text, context).await.resolved
    }

    /// Resolves each element of `items` in order, one after another.
    ///
    /// Elements are independent: an element whose variables fail still
    /// yields a string, and the output has the same length and order.
    pub async fn resolve_array<S: AsRef<str>>(
        &self,
        items: &[S],
        context: Option<&ResolutionContext>,
    ) -> Vec<String> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            resolved.push(self.resolve(item.as_ref(), context).await);
        }
        resolved
    }

    /// Resolves the variables in `text` and reports what happened to each token.
    pub async fn resolve_detailed(
        &self,
        text: &str,
        context: Option<&ResolutionContext>,
    ) -> ResolutionResult {
        let references = parse_variables(text);
        if references.is_empty() {
            return ResolutionResult::no_variables(text);
        }

        let empty = ResolutionContext::new();
        let context = context.unwrap_or(&empty);

        let values = self.resolve_variables(&references, context).await;
        substitute(text, &references, &values)
    }

    /// Looks up each distinct referenced name, gates it on the context, and
    /// resolves every applicable variable concurrently.
    async fn resolve_variables(
        &self,
        references: &[VariableReference],
        context: &ResolutionContext,
    ) -> ValueMap {
        let mut values = ValueMap::new();
        let mut applicable: Vec<Arc<dyn Variable>> = Vec::new();
        let mut seen = HashSet::new();

        for reference in references {
            if !seen.insert(reference.name.as_str()) {
                continue;
            }
            let Some(variable) = self.registry.get_variable(&reference.name) else {
                values.insert(reference.name.clone(), Err(UnresolvedReason::Unknown));
                continue;
            };
            if let Some(required) = variable.contexts() {
                let missing = context.missing(required);
                if !missing.is_empty() {
                    debug!(
                        variable = %reference.name,
                        ?missing,
                        "variable skipped, context missing"
                    );
                    values.insert(
                        reference.name.clone(),
                        Err(UnresolvedReason::MissingContext(missing)),
                    );
                    continue;
                }
            }
            applicable.push(variable);
        }

        debug!(
            references = references.len(),
            applicable = applicable.len(),
            "resolving variables"
        );

        let outcomes = join_all(applicable.iter().map(|variable| async move {
            let outcome = AssertUnwindSafe(variable.resolve(context))
                .catch_unwind()
                .await;
            (variable.name(), outcome)
        }))
        .await;

        for (name, outcome) in outcomes {
            let Ok(outcome) = outcome else {
                warn!(variable = %name, "variable resolution panicked");
                values.insert(
                    name.to_string(),
                    Err(UnresolvedReason::Failed("panicked".to_string())),
                );
                continue;
            };
            let entry = match outcome {
                Ok(Some(Value::String(value))) => Ok(value),
                Ok(Some(other)) => {
                    debug!(variable = %name, value = %other, "variable produced a non-text value");
                    Err(UnresolvedReason::NoValue)
                }
                Ok(None) => Err(UnresolvedReason::NoValue),
                Err(error) => {
                    warn!(variable = %name, error = %error, "variable resolution failed");
                    Err(UnresolvedReason::Failed(error.to_string()))
                }
            };
            values.insert(name.to_string(), entry);
        }

        values
    }
}

/// Rewrites `text`, replacing each token that has a value.
fn substitute(text: &str, references: &[VariableReference], values: &ValueMap) -> ResolutionResult {
    let mut resolved_vars = Vec::new();
    let mut unresolved = Vec::new();
    let mut reported = HashSet::new();
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for var_ref in references {
        // Append text before this variable
        result.push_str(&text[last_end..var_ref.span.start]);

        let first_occurrence = reported.insert(var_ref.name.as_str());
        match values.get(&var_ref.name) {
            Some(Ok(value)) => {
                result.push_str(value);
                if first_occurrence {
                    resolved_vars.push(ResolvedVariable {
                        name: var_ref.name.clone(),
                        value: value.clone(),
                    });
                }
            }
            outcome => {
                // Keep the original ${variable} for unresolved
                result.push_str(&text[var_ref.span.clone()]);
                if first_occurrence {
                    let reason = match outcome {
                        Some(Err(reason)) => reason.clone(),
                        _ => UnresolvedReason::Unknown,
                    };
                    unresolved.push(UnresolvedVariable {
                        name: var_ref.name.clone(),
                        reason,
                    });
                }
            }
        }

        last_end = var_ref.span.end;
    }

    // Append remaining text after last variable
    result.push_str(&text[last_end..]);

    ResolutionResult {
        resolved: result,
        resolved_variables: resolved_vars,
        is_complete: unresolved.is_empty(),
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        Behavior, FakeBuildManager, FakeVariable, MapRegistry, RendezvousVariable, ScriptedPrompt,
    };
    use crate::variables::{
        BuildTargetVariable, VariableContribution, WorkspaceVariableContribution,
    };
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use stencil_domain::{BuildConfiguration, BuildTaskContext, ContextKey, WorkspaceContext};
    use tokio::sync::Barrier;

    fn service_with(variables: Vec<Arc<dyn Variable>>) -> VariableResolverService {
        let registry = MapRegistry::default();
        for variable in variables {
            assert!(registry.register_variable(variable).is_ok());
        }
        VariableResolverService::new(Arc::new(registry))
    }

    fn build_context(target: Option<&str>) -> ResolutionContext {
        let mut task = BuildTaskContext::new(BuildConfiguration::new("debug", "build/debug"));
        task.build_target = target.map(str::to_string);
        ResolutionContext::new().with(task)
    }

    #[tokio::test]
    async fn test_resolve_no_variables() {
        let service = service_with(vec![Arc::new(FakeVariable::text("v", "Z"))]);
        assert_eq!(service.resolve("Hello, World!", None).await, "Hello, World!");
        assert_eq!(service.resolve("", None).await, "");
    }

    #[tokio::test]
    async fn test_unknown_variable_is_kept() {
        let service = service_with(Vec::new());
        let result = service.resolve_detailed("run ${nope} now", None).await;
        assert_eq!(result.resolved, "run ${nope} now");
        assert!(!result.is_complete);
        assert_eq!(
            result.unresolved,
            vec![UnresolvedVariable {
                name: "nope".to_string(),
                reason: UnresolvedReason::Unknown,
            }]
        );
    }

    #[tokio::test]
    async fn test_context_gating() {
        let variable =
            Arc::new(FakeVariable::text("task", "X").requiring(&[ContextKey::BuildTask]));
        let service = service_with(vec![variable.clone()]);

        let without = service.resolve_detailed("${task}", None).await;
        assert_eq!(without.resolved, "${task}");
        assert_eq!(
            without.unresolved[0].reason,
            UnresolvedReason::MissingContext(vec![ContextKey::BuildTask])
        );
        assert_eq!(variable.calls(), 0);

        let unrelated = ResolutionContext::new().with(WorkspaceContext::new("/tmp"));
        assert_eq!(service.resolve("${task}", Some(&unrelated)).await, "${task}");

        let with = service.resolve("${task}", Some(&build_context(None))).await;
        assert_eq!(with, "X");
        assert_eq!(variable.calls(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_on_resolved_text() {
        let service = service_with(vec![Arc::new(FakeVariable::text("v", "value"))]);
        let once = service.resolve("a ${v} b", None).await;
        let twice = service.resolve(&once, None).await;
        assert_eq!(once, "a value b");
        assert_eq!(twice, once);
    }

    #[tokio::test]
    async fn test_duplicate_occurrences_resolve_once() {
        let variable = Arc::new(FakeVariable::text("v", "Z"));
        let service = service_with(vec![variable.clone()]);

        let result = service.resolve_detailed("${v} and ${v}", None).await;

        assert_eq!(result.resolved, "Z and Z");
        assert_eq!(variable.calls(), 1);
        assert_eq!(result.resolved_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_array_preserves_order() {
        let service = service_with(vec![Arc::new(FakeVariable::text("v", "A"))]);
        let resolved = service
            .resolve_array(&["${v}", "lit", "${unknown}"], None)
            .await;
        assert_eq!(resolved, vec!["A", "lit", "${unknown}"]);
    }

    #[tokio::test]
    async fn test_resolve_array_isolates_failures() {
        let service = service_with(vec![
            Arc::new(FakeVariable::with_behavior("bad", Behavior::Fail)),
            Arc::new(FakeVariable::text("good", "ok")),
        ]);
        let resolved = service
            .resolve_array(&["${bad}".to_string(), "${good}".to_string()], None)
            .await;
        assert_eq!(resolved, vec!["${bad}", "ok"]);
    }

    #[tokio::test]
    async fn test_non_text_and_empty_results_are_kept() {
        let service = service_with(vec![
            Arc::new(FakeVariable::with_behavior("num", Behavior::Value(Value::from(42)))),
            Arc::new(FakeVariable::with_behavior("none", Behavior::Nothing)),
        ]);
        let result = service.resolve_detailed("${num}-${none}", None).await;
        assert_eq!(result.resolved, "${num}-${none}");
        assert!(
            result
                .unresolved
                .iter()
                .all(|u| u.reason == UnresolvedReason::NoValue)
        );
    }

    #[tokio::test]
    async fn test_empty_string_value_substitutes() {
        let service = service_with(vec![Arc::new(FakeVariable::text("blank", ""))]);
        assert_eq!(service.resolve("[${blank}]", None).await, "[]");
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let service = service_with(vec![
            Arc::new(FakeVariable::with_behavior("bad", Behavior::Abort)),
            Arc::new(FakeVariable::text("good", "G")),
        ]);
        let result = service.resolve_detailed("${bad}/${good}", None).await;
        assert_eq!(result.resolved, "${bad}/G");
        assert_eq!(
            result.unresolved[0].reason,
            UnresolvedReason::Failed("Abort".to_string())
        );
    }

    #[tokio::test]
    async fn test_value_is_not_rescanned() {
        let service = service_with(vec![
            Arc::new(FakeVariable::text("outer", "${inner}")),
            Arc::new(FakeVariable::text("inner", "nope")),
        ]);
        assert_eq!(service.resolve("${outer}", None).await, "${inner}");
    }

    #[tokio::test]
    async fn test_empty_token_left_as_is() {
        let service = service_with(vec![Arc::new(FakeVariable::text("v", "Z"))]);
        assert_eq!(service.resolve("${} ${v}", None).await, "${} Z");
    }

    #[tokio::test]
    async fn test_empty_token_matches_empty_name() {
        let service = service_with(vec![Arc::new(FakeVariable::text("", "E"))]);
        assert_eq!(service.resolve("[${}]", None).await, "[E]");
    }

    #[tokio::test]
    async fn test_variables_resolve_concurrently() {
        let barrier = Arc::new(Barrier::new(2));
        let service = service_with(vec![
            Arc::new(RendezvousVariable::new("a", "A", barrier.clone())),
            Arc::new(RendezvousVariable::new("b", "B", barrier)),
        ]);

        let resolved = tokio::time::timeout(
            Duration::from_secs(5),
            service.resolve("${a}-${b}", None),
        )
        .await;

        assert_eq!(resolved.ok().as_deref(), Some("A-B"));
    }

    #[tokio::test]
    async fn test_panicking_variable_is_contained() {
        let service = service_with(vec![
            Arc::new(FakeVariable::with_behavior("bad", Behavior::Panic)),
            Arc::new(FakeVariable::text("good", "ok")),
        ]);

        let result = service.resolve_detailed("${bad} ${good}", None).await;

        assert_eq!(result.resolved, "${bad} ok");
        assert!(matches!(
            result.unresolved[0].reason,
            UnresolvedReason::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let service = service_with(vec![Arc::new(FakeVariable::text("Name", "x"))]);
        assert_eq!(service.resolve("${name} ${Name}", None).await, "${name} x");
    }

    #[tokio::test]
    async fn test_no_caching_across_calls() {
        let variable = Arc::new(FakeVariable::text("v", "Z"));
        let service = service_with(vec![variable.clone()]);
        service.resolve("${v}", None).await;
        service.resolve("${v}", None).await;
        assert_eq!(variable.calls(), 2);
    }

    #[tokio::test]
    async fn test_re_registration_replaces_variable() {
        let registry = Arc::new(MapRegistry::default());
        let service = VariableResolverService::new(registry.clone());
        assert!(registry.register_variable(Arc::new(FakeVariable::text("v", "old"))).is_ok());
        assert_eq!(service.resolve("${v}", None).await, "old");

        let replaced = registry.register_variable(Arc::new(FakeVariable::text("v", "new")));
        assert!(matches!(replaced, Ok(Some(_))));
        assert_eq!(service.resolve("${v}", None).await, "new");
    }

    #[tokio::test]
    async fn test_build_target_pinned() {
        let manager = Arc::new(FakeBuildManager::with_targets(&["debug", "release"]));
        let prompt = Arc::new(ScriptedPrompt::selecting("release"));
        let service = service_with(vec![Arc::new(BuildTargetVariable::new(
            manager.clone(),
            prompt.clone(),
        ))]);

        let resolved = service
            .resolve("make ${build.target}", Some(&build_context(Some("debug"))))
            .await;

        assert_eq!(resolved, "make debug");
        assert_eq!(manager.calls(), 0);
        assert!(prompt.requests().is_empty());
    }

    #[tokio::test]
    async fn test_build_target_selected() {
        let manager = Arc::new(FakeBuildManager::with_targets(&["debug", "release"]));
        let prompt = Arc::new(ScriptedPrompt::selecting("release"));
        let service = service_with(vec![Arc::new(BuildTargetVariable::new(manager, prompt))]);

        let resolved = service
            .resolve("make ${build.target}", Some(&build_context(None)))
            .await;

        assert_eq!(resolved, "make release");
    }

    #[tokio::test]
    async fn test_build_target_cancelled_stays_unresolved() {
        let manager = Arc::new(FakeBuildManager::with_targets(&["debug", "release"]));
        let prompt = Arc::new(ScriptedPrompt::cancelling());
        let service = service_with(vec![
            Arc::new(BuildTargetVariable::new(manager, prompt)),
            Arc::new(FakeVariable::text("v", "ok")),
        ]);

        let resolved = service
            .resolve("make ${build.target} ${v}", Some(&build_context(None)))
            .await;

        assert_eq!(resolved, "make ${build.target} ok");
    }

    #[tokio::test]
    async fn test_workspace_contribution_end_to_end() {
        let registry = Arc::new(MapRegistry::default());
        assert!(WorkspaceVariableContribution.register_variables(registry.as_ref()).is_ok());
        let service = VariableResolverService::new(registry);
        let context = ResolutionContext::new().with(WorkspaceContext::new("/work/app"));

        let resolved = service
            .resolve("cd ${workspace.root} # ${workspace.rootName}", Some(&context))
            .await;

        assert_eq!(resolved, "cd /work/app # app");
    }
}
