//! Text views of a materialized request
//!
//! Both views render the already-assembled headers and body, so they always
//! agree with what the executor receives.

use courier_domain::{FormDataEntry, FormEntryType};

use super::{MaterializedRequest, RequestBody};

/// Quotes `value` for a POSIX shell, escaping `'` as `'\''`.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn form_part(entry: &FormDataEntry) -> String {
    match entry.entry_type {
        FormEntryType::Text => format!("{}={}", entry.key, entry.value),
        FormEntryType::File => format!("{}=@{}", entry.key, entry.value),
    }
}

/// Renders the request as HTTP/1.1 message text.
#[must_use]
pub fn raw_http(request: &MaterializedRequest) -> String {
    let mut raw = format!("{} {} HTTP/1.1\n", request.method, request.url);
    for (key, value) in &request.headers {
        raw.push_str(&format!("{key}: {value}\n"));
    }
    raw.push('\n');

    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Text(text) => raw.push_str(text),
        RequestBody::Multipart(entries) => {
            let parts: Vec<String> = entries.iter().map(form_part).collect();
            raw.push_str(&parts.join("\n"));
        }
    }

    raw
}

/// Renders the request as a multi-line curl command.
#[must_use]
pub fn curl_command(request: &MaterializedRequest) -> String {
    let mut parts = vec![format!(
        "curl -X {} {}",
        request.method,
        shell_quote(&request.url)
    )];

    for (key, value) in &request.headers {
        parts.push(format!("-H {}", shell_quote(&format!("{key}: {value}"))));
    }

    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Text(text) => parts.push(format!("-d {}", shell_quote(text))),
        RequestBody::Multipart(entries) => {
            parts.extend(
                entries
                    .iter()
                    .map(|e| format!("-F {}", shell_quote(&form_part(e)))),
            );
        }
    }

    parts.join(" \\\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::HttpMethod;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn request(body: RequestBody) -> MaterializedRequest {
        let mut headers = IndexMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        MaterializedRequest::assemble(HttpMethod::Post, "https://api.test/x?a=1".to_string(), headers, body)
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_raw_http_text_body() {
        let req = request(RequestBody::Text("hello".to_string()));
        assert_eq!(
            raw_http(&req),
            "POST https://api.test/x?a=1 HTTP/1.1\nAccept: application/json\n\nhello"
        );
    }

    #[test]
    fn test_curl_escapes_single_quotes() {
        let req = request(RequestBody::Text(r#"{"name":"O'Brien"}"#.to_string()));
        assert_eq!(
            curl_command(&req),
            "curl -X POST 'https://api.test/x?a=1' \\\n  -H 'Accept: application/json' \\\n  -d '{\"name\":\"O'\\''Brien\"}'"
        );
    }

    #[test]
    fn test_multipart_views() {
        let req = request(RequestBody::Multipart(vec![
            FormDataEntry {
                key: "name".to_string(),
                value: "avatar".to_string(),
                entry_type: FormEntryType::Text,
            },
            FormDataEntry {
                key: "file".to_string(),
                value: "/tmp/a.png".to_string(),
                entry_type: FormEntryType::File,
            },
        ]));

        assert!(raw_http(&req).ends_with("\n\nname=avatar\nfile=@/tmp/a.png"));
        let curl = curl_command(&req);
        assert!(curl.contains("-F 'name=avatar'"));
        assert!(curl.contains("-F 'file=@/tmp/a.png'"));
    }
}
