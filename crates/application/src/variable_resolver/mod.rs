//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings, and
//! of `{name}` path tokens.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::VariableResolver;
//! use courier_domain::{Environment, ResolutionContext};
//!
//! let env = Environment::new("development").with_variable("host", "localhost");
//! let ctx = ResolutionContext::from_sources(Vec::new(), Some(&env), None);
//! let resolver = VariableResolver::new(ctx);
//!
//! assert_eq!(resolver.substitute("http://{{host}}/api"), "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;
pub mod path;

pub use engine::{ResolutionResult, VariableResolver};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
pub use path::{apply_path_params, detect_path_params};
