//! cURL command import.
//!
//! Understands the subset of curl flags people paste from browser dev tools
//! and API docs:
//! - `-X` / `--request`
//! - `-H` / `--header`
//! - `-d`, `--data`, `--data-raw`, `--data-binary`, `--data-urlencode`
//!   (several are joined with `&`; a body turns a GET into a POST)
//! - `-u` / `--user` (sent as a Basic `Authorization` header)
//!
//! Other flags are ignored. Long flags also accept the `--flag=value` form.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use courier_domain::{BodyType, HttpMethod, Request};
use indexmap::IndexMap;
use url::Url;

/// Longest generated request name before it is shortened.
const MAX_NAME_LEN: usize = 30;

/// Errors that can occur while importing a curl command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurlImportError {
    /// The command is empty.
    #[error("Empty curl command")]
    Empty,

    /// A quote was opened and never closed.
    #[error("Unterminated quote in curl command")]
    UnterminatedQuote,

    /// No URL argument was found.
    #[error("No URL found in curl command")]
    MissingUrl,

    /// The method is not one the client can send.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
}

/// The parts of a curl command that map onto a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCurl {
    /// Request method
    pub method: HttpMethod,
    /// URL, with `http://` added when no scheme was given
    pub url: String,
    /// Headers in command order, later duplicates win
    pub headers: IndexMap<String, String>,
    /// Body, if any data flag was given
    pub body: Option<String>,
}

impl ParsedCurl {
    /// Derives a request name from the last path segment, or the host.
    #[must_use]
    pub fn suggested_name(&self) -> String {
        let name = Url::parse(&self.url)
            .ok()
            .and_then(|url| {
                let segment = url
                    .path_segments()
                    .and_then(|mut s| s.next_back())
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string);
                segment.or_else(|| url.host_str().map(ToString::to_string))
            })
            .unwrap_or_else(|| "Imported Request".to_string());

        if name.chars().count() > MAX_NAME_LEN {
            let short: String = name.chars().take(MAX_NAME_LEN - 3).collect();
            format!("{short}...")
        } else {
            name
        }
    }

    /// Builds a request in `collection_id` named after the URL.
    #[must_use]
    pub fn into_request(self, collection_id: &str) -> Request {
        let name = self.suggested_name();
        let body_type = self
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .and_then(|(_, v)| body_type_for(v));

        let mut request = Request::new(collection_id, name).with_target(self.method, self.url);
        request.headers = self.headers;
        request.body = self.body;
        request.body_type = body_type;
        request
    }
}

fn body_type_for(content_type: &str) -> Option<BodyType> {
    let content_type = content_type.to_lowercase();
    if content_type.contains("json") {
        Some(BodyType::Json)
    } else if content_type.contains("xml") {
        Some(BodyType::Xml)
    } else if content_type.contains("html") {
        Some(BodyType::Html)
    } else if content_type.contains("yaml") {
        Some(BodyType::Yaml)
    } else if content_type.contains("javascript") {
        Some(BodyType::Javascript)
    } else if content_type.starts_with("text/") || content_type.contains("x-www-form-urlencoded") {
        Some(BodyType::Text)
    } else {
        None
    }
}

/// Parses a curl command line.
///
/// # Errors
///
/// Returns an error for an empty command, an unclosed quote, a missing URL or
/// an unsupported method.
pub fn parse_curl(command: &str) -> Result<ParsedCurl, CurlImportError> {
    let tokens = tokenize(command)?;
    if tokens.is_empty() {
        return Err(CurlImportError::Empty);
    }

    let mut method: Option<String> = None;
    let mut url: Option<String> = None;
    let mut headers = IndexMap::new();
    let mut body: Option<String> = None;

    let mut args = tokens.into_iter().peekable();
    if args.peek().is_some_and(|first| first == "curl") {
        args.next();
    }

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg, None),
        };

        match flag.as_str() {
            "-X" | "--request" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    method = Some(value.to_uppercase());
                }
            }
            "-H" | "--header" => {
                let header = inline.or_else(|| args.next()).unwrap_or_default();
                if let Some((key, value)) = header.split_once(':') {
                    headers.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-urlencode" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    body = Some(match body {
                        Some(existing) => format!("{existing}&{value}"),
                        None => value,
                    });
                    if method.as_deref().is_none_or(|m| m == "GET") {
                        method = Some("POST".to_string());
                    }
                }
            }
            "-u" | "--user" => {
                if let Some(credentials) = inline.or_else(|| args.next()) {
                    headers.insert(
                        "Authorization".to_string(),
                        format!("Basic {}", STANDARD.encode(credentials)),
                    );
                }
            }
            other if !other.starts_with('-') && url.is_none() => {
                url = Some(other.to_string());
            }
            other => {
                tracing::debug!(flag = other, "Ignoring curl argument");
            }
        }
    }

    let url = url.ok_or(CurlImportError::MissingUrl)?;
    let url = if url.contains("://") {
        url
    } else {
        format!("http://{url}")
    };

    let method = match method {
        Some(name) => name
            .parse()
            .map_err(|_| CurlImportError::UnsupportedMethod(name))?,
        None => HttpMethod::Get,
    };

    Ok(ParsedCurl {
        method,
        url,
        headers,
        body,
    })
}

/// Splits a shell command into arguments.
///
/// Single quotes are literal, double quotes allow `\` escapes, and a
/// backslash before a newline continues the line.
fn tokenize(input: &str) -> Result<Vec<String>, CurlImportError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if !in_single => match chars.next() {
                Some('\n' | '\r') => {}
                Some(escaped) => {
                    current.push(escaped);
                    has_token = true;
                }
                None => {}
            },
            '\'' if !in_double => {
                in_single = !in_single;
                has_token = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                has_token = true;
            }
            c if c.is_whitespace() && !in_single && !in_double => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_single || in_double {
        return Err(CurlImportError::UnterminatedQuote);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
