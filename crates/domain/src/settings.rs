//! Stencil Settings Domain Model
//!
//! Defines the project settings the resolver is configured with.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::context::BuildConfiguration;
use crate::error::{DomainError, DomainResult};
use crate::variable::validate_variable_name;

/// Project settings, usually loaded from `.stencil.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilSettings {
    /// Known build configurations.
    pub build_configurations: Vec<BuildConfiguration>,

    /// Name of the configuration used when none is requested explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_configuration: Option<String>,

    /// Fixed target lists per configuration name. Configurations without an
    /// entry have their targets read from the build files.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, Vec<String>>,

    /// Constant variables (name -> value).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl StencilSettings {
    /// Finds a configuration by name.
    #[must_use]
    pub fn configuration_named(&self, name: &str) -> Option<&BuildConfiguration> {
        self.build_configurations.iter().find(|c| c.name == name)
    }

    /// Picks the configuration to build with.
    ///
    /// An explicit `name` wins; otherwise the active configuration; otherwise
    /// the first one listed.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidBuildConfiguration` if a requested name is unknown.
    pub fn select_configuration(
        &self,
        name: Option<&str>,
    ) -> DomainResult<Option<&BuildConfiguration>> {
        match name.or(self.active_configuration.as_deref()) {
            Some(name) => self
                .configuration_named(name)
                .map(Some)
                .ok_or_else(|| {
                    DomainError::InvalidBuildConfiguration(format!(
                        "unknown configuration '{name}'"
                    ))
                }),
            None => Ok(self.build_configurations.first()),
        }
    }

    /// Checks configurations, their names, and variable names.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> DomainResult<()> {
        let mut names = BTreeSet::new();
        for configuration in &self.build_configurations {
            configuration.validate()?;
            if !names.insert(configuration.name.as_str()) {
                return Err(DomainError::InvalidBuildConfiguration(format!(
                    "duplicate configuration '{}'",
                    configuration.name
                )));
            }
        }

        if let Some(active) = &self.active_configuration
            && !names.contains(active.as_str())
        {
            return Err(DomainError::InvalidBuildConfiguration(format!(
                "active configuration '{active}' is not defined"
            )));
        }

        for name in self.variables.keys() {
            validate_variable_name(name)?;
        }
        Ok(())
    }
}
