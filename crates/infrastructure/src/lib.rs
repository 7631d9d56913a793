//! Stencil Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings persistence.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{
    InMemoryVariableRegistry, MakefileBuildManager, StaticBuildManager, TerminalSelectionPrompt,
};
pub use persistence::{SETTINGS_FILE_NAME, SettingsError, SettingsRepository};
pub use serialization::{SerializationError, from_yaml_bytes};
