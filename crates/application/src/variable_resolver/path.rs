//! Path parameter tokens
//!
//! `{name}` tokens in a URL template are filled from an explicit map, never
//! from environments or folders. A brace that is part of `{{...}}` never
//! starts or ends a path token.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

#[allow(clippy::expect_used)]
static PATH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("path token pattern is valid"));

/// A `{name}` token and its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathToken<'a> {
    name: &'a str,
    start: usize,
    end: usize,
}

fn path_tokens(url: &str) -> Vec<PathToken<'_>> {
    let bytes = url.as_bytes();
    PATH_TOKEN
        .captures_iter(url)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            let preceded = whole.start() > 0 && bytes[whole.start() - 1] == b'{';
            let followed = bytes.get(whole.end()) == Some(&b'}');
            (!preceded && !followed).then(|| PathToken {
                name: name.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Lists the distinct path parameter names of a URL template, in order.
#[must_use]
pub fn detect_path_params(url: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in path_tokens(url) {
        if !names.iter().any(|n| n == token.name) {
            names.push(token.name.to_string());
        }
    }
    names
}

/// Replaces every path token that has a non-empty value in `params`.
///
/// Tokens without a value are left as written.
#[must_use]
pub fn apply_path_params(url: &str, params: &IndexMap<String, String>) -> String {
    let mut result = String::with_capacity(url.len());
    let mut last_end = 0;

    for token in path_tokens(url) {
        let Some(value) = params.get(token.name).filter(|v| !v.is_empty()) else {
            continue;
        };
        result.push_str(&url[last_end..token.start]);
        result.push_str(value);
        last_end = token.end;
    }
    result.push_str(&url[last_end..]);

    result
}
