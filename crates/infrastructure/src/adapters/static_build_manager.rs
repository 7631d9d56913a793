//! Settings-backed build manager

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use stencil_application::ports::{BuildManager, BuildManagerError};
use stencil_domain::BuildConfiguration;
use tracing::debug;

/// Serves fixed target lists keyed by configuration name.
///
/// Configurations without a list are delegated to the fallback manager,
/// if one is set.
#[derive(Clone, Default)]
pub struct StaticBuildManager {
    targets: BTreeMap<String, Vec<String>>,
    fallback: Option<Arc<dyn BuildManager>>,
}

impl StaticBuildManager {
    /// Creates a manager serving the given target lists.
    #[must_use]
    pub const fn new(targets: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            targets,
            fallback: None,
        }
    }

    /// Sets the manager consulted for configurations without a fixed list.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn BuildManager>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl std::fmt::Debug for StaticBuildManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticBuildManager")
            .field("targets", &self.targets)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[async_trait]
impl BuildManager for StaticBuildManager {
    async fn targets(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<String>, BuildManagerError> {
        if let Some(targets) = self.targets.get(&configuration.name) {
            debug!(configuration = %configuration.name, "serving fixed targets");
            return Ok(targets.clone());
        }

        match &self.fallback {
            Some(fallback) => fallback.targets(configuration).await,
            None => Err(BuildManagerError::NotFound(format!(
                "no targets configured for '{}'",
                configuration.name
            ))),
        }
    }
}
