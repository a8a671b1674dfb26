//! Curl command generation
//!
//! Converts a [`ParsedRequest`] back into a canonical curl command. Parsing
//! the generated command yields an equivalent request.

use crate::models::{Body, FormFieldKind, ParsedRequest};

/// Generate a single-line curl command for the request
pub fn to_curl_command(request: &ParsedRequest) -> String {
    command_parts(request).join(" ")
}

/// Generate a curl command with one option per line, joined by `\` continuations
pub fn to_curl_command_multiline(request: &ParsedRequest) -> String {
    let parts = command_parts(request);
    let mut lines: Vec<String> = Vec::new();
    let mut iter = parts.into_iter().peekable();

    while let Some(part) = iter.next() {
        let takes_value = part.starts_with('-');
        match (takes_value, iter.peek()) {
            (true, Some(_)) => {
                let value = iter.next().unwrap_or_default();
                lines.push(format!("{} {}", part, value));
            }
            _ => lines.push(part),
        }
    }

    lines.join(" \\\n  ")
}

fn command_parts(request: &ParsedRequest) -> Vec<String> {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    // Only spell out the method when the parser would not infer it
    if request.method != request.implied_method() {
        parts.push("-X".to_string());
        parts.push(shell_escape(&request.method));
    }

    for header in &request.headers {
        parts.push("-H".to_string());
        parts.push(shell_escape(&format!("{}: {}", header.key, header.value)));
    }

    match &request.body {
        Some(Body::Raw { raw }) => {
            parts.push("--data-raw".to_string());
            parts.push(shell_escape(raw));
        }
        Some(Body::Formdata { formdata }) => {
            for field in formdata {
                match field.kind {
                    FormFieldKind::File => {
                        parts.push("-F".to_string());
                        parts.push(shell_escape(&format!("{}=@{}", field.key, field.value)));
                    }
                    // A leading '@' would turn -F into a file upload
                    FormFieldKind::Text if field.value.starts_with('@') => {
                        parts.push("--form-string".to_string());
                        parts.push(shell_escape(&format!("{}={}", field.key, field.value)));
                    }
                    FormFieldKind::Text => {
                        parts.push("-F".to_string());
                        parts.push(shell_escape(&format!("{}={}", field.key, field.value)));
                    }
                }
            }
        }
        None => {}
    }

    // URL (always last)
    if let Some(url) = &request.url {
        parts.push(shell_escape(url));
    }

    parts
}

/// Shell-escape a string for safe inclusion in a command
fn shell_escape(s: &str) -> String {
    let needs_escaping = s.chars().any(|c| {
        matches!(c, ' ' | '\'' | '"' | '\\' | '$' | '`' | '!' | '*' | '?' |
                    '[' | ']' | '{' | '}' | '(' | ')' | '<' | '>' | '|' |
                    '&' | ';' | '#' | '~' | '\n' | '\t')
    });

    if !needs_escaping && !s.is_empty() && !s.starts_with('-') {
        return s.to_string();
    }

    // Use single quotes and escape any single quotes within
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl;
    use crate::models::{FormField, Header};

    fn request(method: &str, body: Option<Body>) -> ParsedRequest {
        ParsedRequest {
            method: method.to_string(),
            url: Some("https://api.example.com/users?page=1".to_string()),
            headers: vec![
                Header::new("Content-Type", "application/json"),
                Header::new("X-Time", "12:30:00"),
            ],
            body,
        }
    }

    #[test]
    fn test_shell_escape_simple() {
        assert_eq!(shell_escape("hello"), "hello");
        assert_eq!(shell_escape("hello world"), "'hello world'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_escape_quotes() {
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn test_shell_escape_special_chars() {
        assert_eq!(shell_escape("$HOME"), "'$HOME'");
        assert_eq!(shell_escape("a & b"), "'a & b'");
        assert_eq!(shell_escape("-v"), "'-v'");
    }

    #[test]
    fn test_implied_method_is_omitted() {
        let cmd = to_curl_command(&request("POST", Some(Body::raw(r#"{"a":1}"#))));
        assert!(!cmd.contains("-X"));
        assert!(cmd.starts_with("curl -H 'Content-Type: application/json'"));
        assert!(cmd.ends_with("'https://api.example.com/users?page=1'"));
    }

    #[test]
    fn test_explicit_method_is_kept() {
        let cmd = to_curl_command(&request("GET", Some(Body::raw("x"))));
        assert!(cmd.starts_with("curl -X GET "));
    }

    #[test]
    fn test_round_trip() {
        let cases = vec![
            request("GET", None),
            request("DELETE", None),
            request("POST", Some(Body::raw(r#"{"name":"it's me"}"#))),
            request("PUT", Some(Body::raw(""))),
            request(
                "POST",
                Some(Body::Formdata {
                    formdata: vec![
                        FormField::parse("name=John").unwrap(),
                        FormField::parse("avatar=@me.png").unwrap(),
                        FormField {
                            key: "handle".to_string(),
                            value: "@john".to_string(),
                            kind: FormFieldKind::Text,
                        },
                    ],
                }),
            ),
        ];

        for original in cases {
            let single = parse_curl(&to_curl_command(&original)).unwrap();
            assert_eq!(single, original);
            let multi = parse_curl(&to_curl_command_multiline(&original)).unwrap();
            assert_eq!(multi, original);
        }
    }

    #[test]
    fn test_multiline_layout() {
        let cmd = to_curl_command_multiline(&request("DELETE", None));
        let lines: Vec<&str> = cmd.lines().collect();
        assert_eq!(lines[0], "curl \\");
        assert_eq!(lines[1], "  -X DELETE \\");
        assert_eq!(lines.last().copied(), Some("  'https://api.example.com/users?page=1'"));
    }
}
