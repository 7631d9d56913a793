//! Project settings persistence.
//!
//! Settings live in a YAML file, `.stencil.yaml` in the working directory
//! unless another path is given.

use std::path::{Path, PathBuf};

use stencil_domain::{DomainError, StencilSettings};
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_yaml_bytes};

/// Default settings file name.
pub const SETTINGS_FILE_NAME: &str = ".stencil.yaml";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The file parsed but its contents are inconsistent.
    #[error("Invalid settings in {path}: {source}")]
    Invalid {
        /// Settings file.
        path: PathBuf,
        /// What is wrong.
        source: DomainError,
    },
}

/// Repository for one settings file.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    /// Creates a repository for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for `.stencil.yaml` inside `directory`.
    #[must_use]
    pub fn in_directory(directory: &Path) -> Self {
        Self::new(directory.join(SETTINGS_FILE_NAME))
    }

    /// Path of the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the settings.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub async fn load(&self) -> Result<StencilSettings, SettingsError> {
        if !fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(StencilSettings::default());
        }

        let content = fs::read(&self.path).await?;
        let settings: StencilSettings = from_yaml_bytes(&content)?;
        settings.validate().map_err(|source| SettingsError::Invalid {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            configurations = settings.build_configurations.len(),
            variables = settings.variables.len(),
            "loaded settings"
        );
        Ok(settings)
    }
}
