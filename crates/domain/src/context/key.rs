//! Context key identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one kind of payload a caller can place in a resolution context.
///
/// Variables declare the keys they need; the resolver only checks that the
/// keys are present and never looks at the payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextKey {
    /// A build task is being prepared (carries a [`BuildTaskContext`](super::BuildTaskContext)).
    BuildTask,
    /// A workspace is open (carries a [`WorkspaceContext`](super::WorkspaceContext)).
    Workspace,
}

impl ContextKey {
    /// Returns the stable identifier of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildTask => "buildTask",
            Self::Workspace => "workspace",
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
