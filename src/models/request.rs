//! Parsed request value types
//!
//! A [`ParsedRequest`] is the structured form of a curl invocation: method,
//! target URL, ordered headers and an optional body. It is a plain value with
//! no identity; callers merge it into whatever request editor they own.

use serde::{Deserialize, Serialize};

/// A single request header as it appeared in the command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a header string "Name: Value"
    ///
    /// Splits at the first colon only, so values such as URLs or timestamps
    /// keep their own colons. Returns `None` when there is no colon at all.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once(':')?;
        Some(Self::new(name.trim(), value.trim()))
    }
}

/// Whether a multipart field carries inline text or names a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    #[default]
    Text,
    File,
}

/// A `-F key=value` multipart field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: FormFieldKind,
}

impl FormField {
    /// Parse a form field "key=value" or "key=@path"
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = raw.split_once('=')?;
        let field = match value.strip_prefix('@') {
            Some(path) => Self {
                key: key.to_string(),
                value: path.to_string(),
                kind: FormFieldKind::File,
            },
            None => Self {
                key: key.to_string(),
                value: value.to_string(),
                kind: FormFieldKind::Text,
            },
        };
        Some(field)
    }
}

/// Request body, tagged by its `mode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Body {
    /// Raw text taken verbatim from a data flag
    Raw { raw: String },
    /// Multipart fields from `-F`
    Formdata { formdata: Vec<FormField> },
}

impl Body {
    pub fn raw(content: impl Into<String>) -> Self {
        Body::Raw { raw: content.into() }
    }
}

/// Structured form of a curl command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Default for ParsedRequest {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            url: None,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl ParsedRequest {
    /// All header values for `name`, compared case-insensitively, in order
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// The method the parser infers when no method flag is given
    pub fn implied_method(&self) -> &'static str {
        if self.body.is_some() { "POST" } else { "GET" }
    }
}
