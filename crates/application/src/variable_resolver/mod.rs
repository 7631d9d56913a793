//! Variable resolution module
//!
//! Provides parsing and resolution of `${variable}` syntax in strings.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use stencil_application::variable_resolver::VariableResolverService;
//! use stencil_application::variables::StaticVariable;
//! use stencil_infrastructure::InMemoryVariableRegistry;
//!
//! let registry = Arc::new(InMemoryVariableRegistry::new());
//! registry.register_variable(Arc::new(StaticVariable::new("host", "localhost")))?;
//!
//! let resolver = VariableResolverService::new(registry);
//! let result = resolver.resolve("http://${host}/api ${other}", None).await;
//! assert_eq!(result, "http://localhost/api ${other}");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolverService};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
