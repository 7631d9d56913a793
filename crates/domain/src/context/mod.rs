//! Resolution context domain types

mod key;
mod payload;
mod resolution;

pub use key::ContextKey;
pub use payload::{BuildConfiguration, BuildTaskContext, ContextPayload, WorkspaceContext};
pub use resolution::ResolutionContext;
