//! Resolution context passed to variables
//!
//! Holds the typed payloads a caller makes available for one resolve call.

use std::collections::BTreeMap;

use super::key::ContextKey;
use super::payload::{BuildTaskContext, ContextPayload, WorkspaceContext};

/// Caller-supplied payloads keyed by [`ContextKey`].
///
/// Each key holds at most one payload. The resolver only asks whether keys
/// are present; variables read the payloads they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    payloads: BTreeMap<ContextKey, ContextPayload>,
}

impl ResolutionContext {
    /// Creates a new empty resolution context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a payload and returns the context, replacing any payload with the same key.
    #[must_use]
    pub fn with(mut self, payload: impl Into<ContextPayload>) -> Self {
        self.insert(payload);
        self
    }

    /// Stores a payload under its key. Returns the payload it replaced.
    pub fn insert(&mut self, payload: impl Into<ContextPayload>) -> Option<ContextPayload> {
        let payload = payload.into();
        self.payloads.insert(payload.key(), payload)
    }

    /// Removes the payload stored under `key`.
    pub fn remove(&mut self, key: ContextKey) -> Option<ContextPayload> {
        self.payloads.remove(&key)
    }

    /// Returns the payload stored under `key`.
    #[must_use]
    pub fn get(&self, key: ContextKey) -> Option<&ContextPayload> {
        self.payloads.get(&key)
    }

    /// Returns true if a payload is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: ContextKey) -> bool {
        self.payloads.contains_key(&key)
    }

    /// Returns the keys from `required` that have no payload, in the given order.
    #[must_use]
    pub fn missing(&self, required: &[ContextKey]) -> Vec<ContextKey> {
        required
            .iter()
            .copied()
            .filter(|key| !self.contains(*key))
            .collect()
    }

    /// Returns true if every key in `required` has a payload.
    #[must_use]
    pub fn contains_all(&self, required: &[ContextKey]) -> bool {
        required.iter().all(|key| self.contains(*key))
    }

    /// Returns the build task payload, if present.
    #[must_use]
    pub fn build_task(&self) -> Option<&BuildTaskContext> {
        match self.get(ContextKey::BuildTask) {
            Some(ContextPayload::BuildTask(context)) => Some(context),
            _ => None,
        }
    }

    /// Returns the workspace payload, if present.
    #[must_use]
    pub fn workspace(&self) -> Option<&WorkspaceContext> {
        match self.get(ContextKey::Workspace) {
            Some(ContextPayload::Workspace(context)) => Some(context),
            _ => None,
        }
    }

    /// Returns the number of payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Returns true if the context carries no payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
