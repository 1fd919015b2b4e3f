//! Variable parser for `{{variable}}` syntax
//!
//! Parses strings to extract variable references with their positions.
//! Whitespace just inside the braces is ignored (`{{ host }}` names `host`);
//! a name that still contains whitespace is not a reference.

use std::ops::Range;

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `{{ }}`).
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

/// Parses a string and extracts all variable references, in order.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parser::parse_variables;
///
/// let refs = parse_variables("{{base_url}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "base_url");
/// assert_eq!(refs[1].name, "id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find("{{") {
        let start = cursor + offset;
        let inner_start = start + 2;

        let Some(close) = input[inner_start..].find("}}") else {
            break;
        };
        let inner_end = inner_start + close;
        let name = input[inner_start..inner_end].trim();

        if name.is_empty() || name.contains(char::is_whitespace) {
            // Not a placeholder; a later `{{` may still open one.
            cursor = start + 1;
            continue;
        }

        let end = inner_end + 2;
        references.push(VariableReference::new(name, start..end));
        cursor = end;
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    input.contains("{{") && !parse_variables(input).is_empty()
}

/// Extracts the distinct variable names of the input, in first-seen order.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for reference in parse_variables(input) {
        if !names.contains(&reference.name) {
            names.push(reference.name);
        }
    }
    names
}
