//! Adapter implementations of the application ports.

mod makefile_build_manager;
mod static_build_manager;
mod terminal_prompt;
mod variable_registry;

pub use makefile_build_manager::{MakefileBuildManager, parse_makefile_targets};
pub use static_build_manager::StaticBuildManager;
pub use terminal_prompt::{TerminalSelectionPrompt, fuzzy_matches, visible_items};
pub use variable_registry::InMemoryVariableRegistry;
