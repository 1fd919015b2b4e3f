//! Importers turning foreign request formats into collection requests.

mod curl;

pub use curl::{CurlImportError, ParsedCurl, parse_curl};
