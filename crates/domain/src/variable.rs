//! Variable metadata and resolution outcome types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ContextKey;
use crate::error::{DomainError, DomainResult};

/// Returns true for characters that end a line and can never appear inside a token.
#[must_use]
pub const fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Validates a variable name.
///
/// A name is valid when a `${name}` token can refer to it: it contains
/// neither `}` nor a line terminator. The empty name is referenced by `${}`.
/// Names are case-sensitive.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    !name.chars().any(|ch| ch == '}' || is_line_terminator(ch))
}

/// Checks a variable name, returning it unchanged when valid.
///
/// # Errors
/// Returns `DomainError::InvalidVariableName` if the name cannot be referenced.
pub fn validate_variable_name(name: &str) -> DomainResult<&str> {
    if is_valid_variable_name(name) {
        Ok(name)
    } else {
        Err(DomainError::InvalidVariableName(name.to_string()))
    }
}

/// Static description of a registered variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    /// Token name.
    pub name: String,

    /// Human-readable documentation.
    #[serde(default)]
    pub description: String,

    /// Context keys that must be present for the variable to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<ContextKey>>,
}

/// A variable that produced a textual value during one resolve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// Variable name.
    pub name: String,
    /// Value substituted for every occurrence of the token.
    pub value: String,
}

/// Why a token was left in the output verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No variable is registered under the name.
    Unknown,
    /// The variable requires context keys the caller did not supply.
    MissingContext(Vec<ContextKey>),
    /// The variable produced nothing, or something other than text.
    NoValue,
    /// The variable failed or its interaction was abandoned.
    Failed(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown variable"),
            Self::MissingContext(keys) => {
                let keys: Vec<&str> = keys.iter().map(|key| key.as_str()).collect();
                write!(f, "missing context: {}", keys.join(", "))
            }
            Self::NoValue => f.write_str("no value produced"),
            Self::Failed(message) => write!(f, "resolution failed: {message}"),
        }
    }
}

/// A token name that stayed unresolved, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedVariable {
    /// Name inside the `${...}` delimiters.
    pub name: String,
    /// Why no substitution happened.
    pub reason: UnresolvedReason,
}
