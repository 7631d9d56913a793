//! Variable parser for `${variable}` syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

use stencil_domain::is_line_terminator;

const TOKEN_OPEN: &str = "${";
const TOKEN_CLOSE: char = '}';

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `${` and `}`), exactly as written.
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all variable references.
///
/// A reference is `${` followed by the shortest run of characters up to the
/// next `}`. Names are not trimmed and may be empty. A line terminator before
/// the closing brace means no reference starts at that `$`.
///
/// # Examples
///
/// ```
/// use stencil_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("make ${build.target} -C ${workspace.root}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "build.target");
/// assert_eq!(refs[1].name, "workspace.root");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = input[search_from..].find(TOKEN_OPEN) {
        let start = search_from + offset;
        let name_start = start + TOKEN_OPEN.len();
        let rest = &input[name_start..];

        match rest.find(|ch: char| ch == TOKEN_CLOSE || is_line_terminator(ch)) {
            Some(end) if rest[end..].starts_with(TOKEN_CLOSE) => {
                let span_end = name_start + end + TOKEN_CLOSE.len_utf8();
                references.push(VariableReference::new(&rest[..end], start..span_end));
                search_from = span_end;
            }
            // Retry from the next byte; `$` is always one byte wide.
            _ => search_from = start + 1,
        }
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    !parse_variables(input).is_empty()
}

/// Extracts just the variable names from the input without full parsing info.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}
