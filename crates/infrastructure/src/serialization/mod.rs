//! YAML deserialization for Stencil settings files.

mod yaml;

pub use yaml::*;
