//! Makefile-based build manager
//!
//! Enumerates the explicit rule targets of the makefile in a build
//! configuration's directory.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use stencil_application::ports::{BuildManager, BuildManagerError};
use stencil_domain::BuildConfiguration;
use tokio::fs;
use tracing::debug;

/// File names GNU make looks for, in lookup order.
const MAKEFILE_NAMES: [&str; 3] = ["GNUmakefile", "makefile", "Makefile"];

/// A rule line: one or more target names, then `:` or `::`, not `:=`.
static RULE_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_][^:=#\s]*(?:[ \t]+[^:=#\s]+)*)[ \t]*::?(?:[^:=]|$)").ok()
});

/// Extracts explicit target names from makefile source, in order of first appearance.
///
/// Special targets (leading `.`), pattern rules (`%`), and names built from
/// variables (`$`) are skipped.
#[must_use]
pub fn parse_makefile_targets(source: &str) -> Vec<String> {
    let Some(rule_line) = RULE_LINE.as_ref() else {
        return Vec::new();
    };

    let mut targets: Vec<String> = Vec::new();
    for line in source.lines() {
        let Some(captures) = rule_line.captures(line) else {
            continue;
        };
        for name in captures[1].split_whitespace() {
            if name.starts_with('.') || name.contains(['%', '$']) {
                continue;
            }
            if !targets.iter().any(|existing| existing == name) {
                targets.push(name.to_string());
            }
        }
    }
    targets
}

/// Reads targets from the makefile of each build configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakefileBuildManager;

impl MakefileBuildManager {
    /// Creates a new makefile build manager.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn find_makefile(directory: &Path) -> Option<PathBuf> {
        for name in MAKEFILE_NAMES {
            let candidate = directory.join(name);
            if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                return Some(candidate);
            }
        }
        None
    }
}

#[async_trait]
impl BuildManager for MakefileBuildManager {
    async fn targets(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<String>, BuildManagerError> {
        let Some(path) = Self::find_makefile(&configuration.directory).await else {
            return Err(BuildManagerError::NotFound(format!(
                "no makefile in {}",
                configuration.directory.display()
            )));
        };

        let source = fs::read_to_string(&path).await?;
        let targets = parse_makefile_targets(&source);
        debug!(
            configuration = %configuration.name,
            makefile = %path.display(),
            target_count = targets.len(),
            "enumerated makefile targets"
        );
        Ok(targets)
    }
}
