//! Typed context payloads

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::key::ContextKey;
use crate::error::{DomainError, DomainResult};

/// A named build configuration: where and how a project is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    /// Human-readable configuration name (e.g. `debug`).
    pub name: String,

    /// Build directory the configuration operates in.
    pub directory: PathBuf,
}

impl BuildConfiguration {
    /// Creates a new build configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }

    /// Checks that the configuration has a name and a directory.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidBuildConfiguration` when either is empty.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidBuildConfiguration(
                "name must not be empty".to_string(),
            ));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(DomainError::InvalidBuildConfiguration(format!(
                "configuration '{}' has no directory",
                self.name
            )));
        }
        Ok(())
    }
}

/// Payload for [`ContextKey::BuildTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTaskContext {
    /// Configuration the task builds with.
    pub build_configuration: BuildConfiguration,

    /// Target already chosen for this task, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_target: Option<String>,
}

impl BuildTaskContext {
    /// Creates a build task context without a pinned target.
    #[must_use]
    pub const fn new(build_configuration: BuildConfiguration) -> Self {
        Self {
            build_configuration,
            build_target: None,
        }
    }

    /// Pins the build target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.build_target = Some(target.into());
        self
    }
}

/// Payload for [`ContextKey::Workspace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceContext {
    /// Root directory of the open workspace.
    pub root: PathBuf,
}

impl WorkspaceContext {
    /// Creates a workspace context rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the last path component of the root, if it has one.
    #[must_use]
    pub fn root_name(&self) -> Option<&str> {
        self.root.file_name().and_then(|name| name.to_str())
    }
}

/// A payload stored in a [`ResolutionContext`](super::ResolutionContext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextPayload {
    /// Build task metadata.
    BuildTask(BuildTaskContext),
    /// Open workspace metadata.
    Workspace(WorkspaceContext),
}

impl ContextPayload {
    /// Returns the key this payload is stored under.
    #[must_use]
    pub const fn key(&self) -> ContextKey {
        match self {
            Self::BuildTask(_) => ContextKey::BuildTask,
            Self::Workspace(_) => ContextKey::Workspace,
        }
    }
}

impl From<BuildTaskContext> for ContextPayload {
    fn from(context: BuildTaskContext) -> Self {
        Self::BuildTask(context)
    }
}

impl From<WorkspaceContext> for ContextPayload {
    fn from(context: WorkspaceContext) -> Self {
        Self::Workspace(context)
    }
}
