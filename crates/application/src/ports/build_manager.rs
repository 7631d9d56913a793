//! Build manager port
//!
//! Enumerates the build targets known for a build configuration.

use async_trait::async_trait;

use stencil_domain::BuildConfiguration;

/// Errors that can occur while enumerating build targets.
#[derive(Debug, thiserror::Error)]
pub enum BuildManagerError {
    /// The configuration's build directory or build file is missing.
    #[error("Build configuration not found: {0}")]
    NotFound(String),

    /// I/O error while reading build files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for listing the targets a build configuration can build.
#[async_trait]
pub trait BuildManager: Send + Sync {
    /// Returns the targets of `configuration`, in the order the manager prefers.
    ///
    /// # Errors
    /// Returns an error if the targets cannot be enumerated.
    async fn targets(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<String>, BuildManagerError>;
}
