//! Test doubles shared by the unit tests of this crate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Barrier;

use stencil_domain::{BuildConfiguration, ContextKey, ResolutionContext, validate_variable_name};

use crate::ports::{
    BuildManager, BuildManagerError, PickOutcome, PickRequest, PromptError, RegistryError,
    SelectionPrompt, VariableRegistry,
};
use crate::variables::{Variable, VariableError, VariableResult};

#[derive(Default)]
pub struct MapRegistry {
    variables: Mutex<BTreeMap<String, Arc<dyn Variable>>>,
}

impl VariableRegistry for MapRegistry {
    fn register_variable(
        &self,
        variable: Arc<dyn Variable>,
    ) -> Result<Option<Arc<dyn Variable>>, RegistryError> {
        let name = validate_variable_name(variable.name())?.to_string();
        Ok(self
            .variables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, variable))
    }

    fn get_variable(&self, name: &str) -> Option<Arc<dyn Variable>> {
        self.variables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn unregister_variable(&self, name: &str) -> Option<Arc<dyn Variable>> {
        self.variables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    fn variables(&self) -> Vec<Arc<dyn Variable>> {
        self.variables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

/// What a [`FakeVariable`] does when resolved.
#[derive(Clone)]
pub enum Behavior {
    Value(Value),
    Nothing,
    Fail,
    Abort,
    Panic,
}

/// A scripted variable that counts its resolutions.
pub struct FakeVariable {
    name: String,
    contexts: Option<Vec<ContextKey>>,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeVariable {
    pub fn text(name: &str, value: &str) -> Self {
        Self::with_behavior(name, Behavior::Value(Value::String(value.to_string())))
    }

    pub fn with_behavior(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            contexts: None,
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn requiring(mut self, contexts: &[ContextKey]) -> Self {
        self.contexts = Some(contexts.to_vec());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Variable for FakeVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn contexts(&self) -> Option<&[ContextKey]> {
        self.contexts.as_deref()
    }

    async fn resolve(&self, _context: &ResolutionContext) -> VariableResult<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match &self.behavior {
            Behavior::Value(value) => Ok(Some(value.clone())),
            Behavior::Nothing => Ok(None),
            Behavior::Fail => Err(VariableError::Failed("boom".to_string())),
            Behavior::Abort => Err(VariableError::Aborted),
            #[allow(clippy::panic)]
            Behavior::Panic => panic!("variable {} blew up", self.name),
        }
    }
}

/// A variable that only produces its value once every variable sharing
/// the barrier is resolving at the same time.
pub struct RendezvousVariable {
    name: String,
    value: String,
    barrier: Arc<Barrier>,
}

impl RendezvousVariable {
    pub fn new(name: &str, value: &str, barrier: Arc<Barrier>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            barrier,
        }
    }
}

#[async_trait]
impl Variable for RendezvousVariable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve(&self, _context: &ResolutionContext) -> VariableResult<Option<Value>> {
        self.barrier.wait().await;
        Ok(Some(Value::String(self.value.clone())))
    }
}

/// A build manager returning fixed targets, or failing.
pub struct FakeBuildManager {
    targets: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeBuildManager {
    pub fn with_targets(targets: &[&str]) -> Self {
        Self {
            targets: Some(targets.iter().map(|t| (*t).to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            targets: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildManager for FakeBuildManager {
    async fn targets(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<String>, BuildManagerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets
            .clone()
            .ok_or_else(|| BuildManagerError::NotFound(configuration.name.clone()))
    }
}

/// A prompt that records requests and answers with a fixed outcome.
pub struct ScriptedPrompt {
    outcome: PickOutcome,
    requests: Mutex<Vec<PickRequest>>,
}

impl ScriptedPrompt {
    pub fn selecting(value: &str) -> Self {
        Self {
            outcome: PickOutcome::Selected(value.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcome: PickOutcome::Cancelled,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PickRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SelectionPrompt for ScriptedPrompt {
    async fn pick(&self, request: PickRequest) -> Result<PickOutcome, PromptError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        Ok(self.outcome.clone())
    }
}
