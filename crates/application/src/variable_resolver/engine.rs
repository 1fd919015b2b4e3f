//! Variable resolution engine
//!
//! Resolves `{{variable}}` references according to precedence rules.
//!
//! Substitution is a single pass over the parsed references: a resolved
//! value is inserted literally and never scanned again, so a value that
//! itself contains `{{...}}` is not resolved transitively.

use std::borrow::Cow;

use courier_domain::{ResolutionContext, ResolvedVariable};

use super::parser::parse_variables;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The resolved string with all known variables substituted.
    pub resolved: String,

    /// Variables that were successfully resolved.
    pub resolved_variables: Vec<ResolvedVariable>,

    /// Variable names that could not be resolved (left verbatim).
    pub unresolved: Vec<String>,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Returns true if every reference was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// The variable resolution engine.
#[derive(Debug, Clone, Default)]
pub struct VariableResolver {
    context: ResolutionContext,
}

impl VariableResolver {
    /// Creates a new resolver with the given context.
    #[must_use]
    pub const fn new(context: ResolutionContext) -> Self {
        Self { context }
    }

    /// Creates a new resolver with an empty context.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a reference to the current context.
    #[must_use]
    pub const fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Replaces every resolvable `{{name}}` in `input`.
    ///
    /// Input without references is returned borrowed.
    #[must_use]
    pub fn substitute<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let references = parse_variables(input);
        if references.is_empty() {
            return Cow::Borrowed(input);
        }

        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;
        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);
            match self.context.resolve(&var_ref.name) {
                Some(resolved) => result.push_str(&resolved.value),
                None => result.push_str(&input[var_ref.span.clone()]),
            }
            last_end = var_ref.span.end;
        }
        result.push_str(&input[last_end..]);

        Cow::Owned(result)
    }

    /// Resolves all variables in the input string, reporting what was found.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_vars = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(resolved) = self.context.resolve(&var_ref.name) {
                result.push_str(&resolved.value);
                resolved_vars.push(resolved);
            } else {
                // Keep the original {{variable}} for unresolved
                result.push_str(&input[var_ref.span.clone()]);
                if !unresolved.contains(&var_ref.name) {
                    unresolved.push(var_ref.name.clone());
                }
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        ResolutionResult {
            resolved: result,
            resolved_variables: resolved_vars,
            unresolved,
        }
    }

    /// Checks which variables in the input would be unresolved.
    /// Useful for validation before sending a request.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        self.resolve(input).unresolved
    }

    /// Resolves just the value of a single variable.
    #[must_use]
    pub fn resolve_value(&self, name: &str) -> Option<String> {
        self.context.resolve_value(name)
    }
}
