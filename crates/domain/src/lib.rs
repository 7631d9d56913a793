//! Stencil Domain - Core resolution types
//!
//! This crate defines the domain model for the Stencil variable resolver.
//! All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod error;
pub mod settings;
pub mod variable;

pub use context::{
    BuildConfiguration, BuildTaskContext, ContextKey, ContextPayload, ResolutionContext,
    WorkspaceContext,
};
pub use error::{DomainError, DomainResult};
pub use settings::StencilSettings;
pub use variable::{
    ResolvedVariable, UnresolvedReason, UnresolvedVariable, VariableDescriptor,
    is_line_terminator, is_valid_variable_name, validate_variable_name,
};
