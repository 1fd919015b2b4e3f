//! Environment and variable domain types

mod resolution;
mod variable;

pub use resolution::{FolderScope, ResolutionContext, ResolvedVariable, VariableScope};
pub use variable::{EnvVariable, Environment, GLOBAL_ENVIRONMENT};
