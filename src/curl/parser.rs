//! cURL command parsing
//!
//! Turns a pasted curl invocation into a [`ParsedRequest`]. Extraction is
//! best-effort: once the input is recognised as a curl command, every field
//! that cannot be found is simply left out.
//!
//! # Example
//!
//! ```
//! use curlimport::curl::parse_curl;
//!
//! let request = parse_curl(
//!     r#"curl -H 'Content-Type: application/json' -d '{"name":"John"}' https://api.example.com/users"#,
//! ).unwrap();
//!
//! assert_eq!(request.method, "POST");
//! assert_eq!(request.url.as_deref(), Some("https://api.example.com/users"));
//! ```

use std::str::FromStr;

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::lexer::{normalize, tokenize, Token};
use crate::errors::{CurlImportError, Result};
use crate::models::{Body, FormField, FormFieldKind, Header, ParsedRequest};

/// Fallback URL scan over the whole command line
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i:https?)://[^\s'"]+"#).expect("Invalid URL regex")
});

/// What to do when a curl command carries no recognisable URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingUrl {
    /// Return the request with `url` unset
    #[default]
    Allow,
    /// Fail with [`CurlImportError::MissingUrl`]
    Reject,
}

impl FromStr for MissingUrl {
    type Err = CurlImportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(MissingUrl::Allow),
            "reject" => Ok(MissingUrl::Reject),
            other => Err(CurlImportError::Config(format!(
                "missing_url must be \"allow\" or \"reject\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Parser settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub missing_url: MissingUrl,
}

/// Parse a curl command with default options
///
/// Returns `None` only when the input does not start with `curl`.
pub fn parse_curl(cmd: &str) -> Option<ParsedRequest> {
    parse_curl_command(cmd, &ParseOptions::default()).ok()
}

/// Parse a curl command string into a [`ParsedRequest`]
pub fn parse_curl_command(cmd: &str, options: &ParseOptions) -> Result<ParsedRequest> {
    let line = normalize(cmd);
    if !is_curl_command(&line) {
        return Err(CurlImportError::NotCurl);
    }

    let tokens = tokenize(&line);
    trace!(?tokens, "Tokenized curl command");

    // The first word is the curl program itself
    let mut scan = Scan::default();
    scan.walk(tokens.get(1..).unwrap_or_default());

    if scan.url.is_none() {
        if let Some(found) = URL_RE.find(&line) {
            debug!(url = found.as_str(), "No URL argument, using first URL in command text");
            scan.url = Some(found.as_str().to_string());
        }
    }

    if scan.url.is_none() && options.missing_url == MissingUrl::Reject {
        return Err(CurlImportError::MissingUrl);
    }

    Ok(scan.finish())
}

/// Case-insensitive check for the leading `curl` keyword
fn is_curl_command(line: &str) -> bool {
    line.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("curl"))
}

fn is_http_url(text: &str) -> bool {
    let lower = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The curl options this parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opt {
    Request,
    Header,
    Data(DataKind),
    Form,
    FormString,
    Url,
    UserAgent,
    Referer,
    Cookie,
    User,
    OAuth2Bearer,
    Head,
    Get,
    /// Recognised, takes an argument, has no effect on the request
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataKind {
    Plain,
    UrlEncode,
    Json,
}

impl Opt {
    fn takes_arg(self) -> bool {
        !matches!(self, Opt::Head | Opt::Get)
    }
}

/// Long options that take an argument without affecting the request
///
/// Their argument is consumed so it can never be picked up as the URL.
const SKIPPED_LONG: &[&str] = &[
    "abstract-unix-socket", "alt-svc", "aws-sigv4", "cacert", "capath", "cert",
    "cert-type", "ciphers", "config", "connect-timeout", "connect-to", "continue-at",
    "cookie-jar", "create-file-mode", "crlfile", "curves", "delegation",
    "dns-interface", "dns-ipv4-addr", "dns-ipv6-addr", "dns-servers", "doh-url",
    "dump-header", "ech", "egd-file", "engine", "etag-compare", "etag-save",
    "expect100-timeout", "ftp-account", "ftp-alternative-to-user", "ftp-method",
    "ftp-port", "ftp-ssl-ccc-mode", "happy-eyeballs-timeout-ms", "haproxy-clientip",
    "hostpubmd5", "hostpubsha256", "hsts", "interface", "ip-tos", "ipfs-gateway",
    "keepalive-cnt", "keepalive-time", "key", "key-type", "krb", "libcurl",
    "limit-rate", "local-port", "login-options", "mail-auth", "mail-from",
    "mail-rcpt", "max-filesize", "max-redirs", "max-time", "netrc-file", "noproxy",
    "output", "output-dir", "pass", "pinnedpubkey", "preproxy", "proto",
    "proto-default", "proto-redir", "proxy", "proxy-cacert", "proxy-capath",
    "proxy-cert", "proxy-cert-type", "proxy-ciphers", "proxy-crlfile",
    "proxy-header", "proxy-key", "proxy-key-type", "proxy-pass",
    "proxy-pinnedpubkey", "proxy-service-name", "proxy-tls13-ciphers",
    "proxy-tlsauthtype", "proxy-tlspassword", "proxy-tlsuser", "proxy-user",
    "proxy1.0", "pubkey", "quote", "random-file", "range", "rate", "request-target",
    "resolve", "retry", "retry-delay", "retry-max-time", "sasl-authzid",
    "service-name", "sigalgs", "socks4", "socks4a", "socks5",
    "socks5-gssapi-service", "socks5-hostname", "speed-limit", "speed-time",
    "ssl-sessions", "stderr", "telnet-option", "tftp-blksize", "time-cond",
    "tls-max", "tls13-ciphers", "tlsauthtype", "tlspassword", "tlsuser", "trace",
    "trace-ascii", "trace-config", "unix-socket", "upload-file", "url-query",
    "user-agent-file", "variable", "vlan-priority", "write-out",
];

fn long_opt(name: &str) -> Option<Opt> {
    let opt = match name {
        "request" => Opt::Request,
        "header" => Opt::Header,
        "data" | "data-raw" | "data-binary" | "data-ascii" => Opt::Data(DataKind::Plain),
        "data-urlencode" => Opt::Data(DataKind::UrlEncode),
        "json" => Opt::Data(DataKind::Json),
        "form" => Opt::Form,
        "form-string" => Opt::FormString,
        "url" => Opt::Url,
        "user-agent" => Opt::UserAgent,
        "referer" => Opt::Referer,
        "cookie" => Opt::Cookie,
        "user" => Opt::User,
        "oauth2-bearer" => Opt::OAuth2Bearer,
        "head" => Opt::Head,
        "get" => Opt::Get,
        name if SKIPPED_LONG.contains(&name) => Opt::Skip,
        _ => return None,
    };
    Some(opt)
}

fn short_opt(flag: char) -> Option<Opt> {
    let opt = match flag {
        'X' => Opt::Request,
        'H' => Opt::Header,
        'd' => Opt::Data(DataKind::Plain),
        'F' => Opt::Form,
        'A' => Opt::UserAgent,
        'e' => Opt::Referer,
        'b' => Opt::Cookie,
        'u' => Opt::User,
        'I' => Opt::Head,
        'G' => Opt::Get,
        'o' | 'm' | 'x' | 'E' | 'c' | 'T' | 'w' | 'r' | 'U' | 'K' | 'D' | 'Y' | 'y' | 'z'
        | 'C' | 'P' | 'Q' | 't' => Opt::Skip,
        _ => return None,
    };
    Some(opt)
}

/// Body collected while walking the tokens
#[derive(Debug)]
enum PendingBody {
    Raw(String),
    Form(Vec<FormField>),
}

/// Accumulated state of one walk over a token list
#[derive(Debug, Default)]
struct Scan {
    method: Option<String>,
    head: bool,
    get: bool,
    url: Option<String>,
    headers: Vec<Header>,
    body: Option<PendingBody>,
}

impl Scan {
    fn walk(&mut self, tokens: &[Token]) {
        let mut rest = tokens.iter();
        let mut only_positional = false;

        while let Some(token) = rest.next() {
            let text = token.text.as_str();

            if only_positional || !text.starts_with('-') || text == "-" {
                self.positional(token);
                continue;
            }

            if text == "--" {
                only_positional = true;
                continue;
            }

            if let Some(long) = text.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (long, None),
                };
                let Some(opt) = long_opt(name) else {
                    debug!(flag = text, "Ignoring unsupported curl option");
                    continue;
                };
                if !opt.takes_arg() {
                    self.apply(opt, "");
                    continue;
                }
                match inline {
                    Some(value) => self.apply_value(opt, value, token.unterminated),
                    None => self.apply_next(opt, rest.next()),
                }
                continue;
            }

            // Short options may be clustered: -sSL, -XPOST, -sH'A: b'
            let cluster = &text[1..];
            for (pos, flag) in cluster.char_indices() {
                let Some(opt) = short_opt(flag) else {
                    continue;
                };
                if !opt.takes_arg() {
                    self.apply(opt, "");
                    continue;
                }
                let attached = &cluster[pos + flag.len_utf8()..];
                if attached.is_empty() {
                    self.apply_next(opt, rest.next());
                } else {
                    self.apply_value(opt, attached, token.unterminated);
                }
                break;
            }
        }
    }

    fn positional(&mut self, token: &Token) {
        if token.unterminated {
            debug!(word = %token.text, "Dropping word with unterminated quote");
            return;
        }
        if self.url.is_none() && is_http_url(&token.text) {
            self.url = Some(token.text.clone());
        } else {
            trace!(word = %token.text, "Ignoring positional argument");
        }
    }

    fn apply_next(&mut self, opt: Opt, value: Option<&Token>) {
        match value {
            Some(token) => self.apply_value(opt, &token.text, token.unterminated),
            None => debug!(?opt, "Option is missing its argument"),
        }
    }

    fn apply_value(&mut self, opt: Opt, value: &str, unterminated: bool) {
        if unterminated {
            debug!(?opt, "Dropping option argument with unterminated quote");
            return;
        }
        self.apply(opt, value);
    }

    fn apply(&mut self, opt: Opt, value: &str) {
        match opt {
            Opt::Request => self.set_method(value),
            Opt::Header => match Header::parse(value) {
                Some(header) => self.headers.push(header),
                None => debug!(header = value, "Dropping header without a colon"),
            },
            Opt::Data(kind) => self.set_data(kind, value),
            Opt::Form => match FormField::parse(value) {
                Some(field) => self.push_form(field),
                None => debug!(field = value, "Dropping form field without '='"),
            },
            Opt::FormString => match value.split_once('=') {
                Some((key, text)) => self.push_form(FormField {
                    key: key.to_string(),
                    value: text.to_string(),
                    kind: FormFieldKind::Text,
                }),
                None => debug!(field = value, "Dropping form field without '='"),
            },
            Opt::Url => {
                if self.url.is_some() {
                    trace!(url = value, "Ignoring URL after the first");
                } else if is_http_url(value) {
                    self.url = Some(value.to_string());
                } else {
                    debug!(url = value, "Ignoring --url value without http:// or https://");
                }
            }
            Opt::UserAgent => self.headers.push(Header::new("User-Agent", value)),
            Opt::Referer => self.headers.push(Header::new("Referer", value)),
            Opt::Cookie => {
                if value.contains('=') {
                    self.headers.push(Header::new("Cookie", value));
                } else {
                    debug!(file = value, "Ignoring cookie file");
                }
            }
            Opt::User => {
                let credentials = if value.contains(':') {
                    value.to_string()
                } else {
                    format!("{}:", value)
                };
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                self.headers.push(Header::new("Authorization", format!("Basic {}", encoded)));
            }
            Opt::OAuth2Bearer => {
                self.headers.push(Header::new("Authorization", format!("Bearer {}", value)));
            }
            Opt::Head => self.head = true,
            Opt::Get => self.get = true,
            Opt::Skip => trace!(value, "Skipping option argument"),
        }
    }

    fn set_method(&mut self, value: &str) {
        if self.method.is_some() {
            debug!(method = value, "Ignoring repeated method option");
            return;
        }
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            debug!(method = value, "Ignoring method that is not a plain token of letters");
            return;
        }
        self.method = Some(value.to_ascii_uppercase());
    }

    fn set_data(&mut self, kind: DataKind, value: &str) {
        if self.body.is_some() {
            debug!("Ignoring data option after the first body");
            return;
        }
        let raw = match kind {
            DataKind::Plain => value.to_string(),
            DataKind::UrlEncode => encode_data_urlencode(value),
            DataKind::Json => {
                self.headers.push(Header::new("Content-Type", "application/json"));
                self.headers.push(Header::new("Accept", "application/json"));
                value.to_string()
            }
        };
        self.body = Some(PendingBody::Raw(raw));
    }

    fn push_form(&mut self, field: FormField) {
        match &mut self.body {
            None => self.body = Some(PendingBody::Form(vec![field])),
            Some(PendingBody::Form(fields)) => fields.push(field),
            Some(PendingBody::Raw(_)) => debug!(key = %field.key, "Ignoring form field after raw body"),
        }
    }

    fn finish(self) -> ParsedRequest {
        let mut url = self.url;
        let mut body = match self.body {
            Some(PendingBody::Raw(raw)) => Some(Body::Raw { raw }),
            Some(PendingBody::Form(formdata)) => Some(Body::Formdata { formdata }),
            None => None,
        };

        // -G sends the data as a query string instead of a body
        if self.get {
            match (&body, url.as_mut()) {
                (Some(Body::Raw { raw }), Some(target)) => {
                    target.push(if target.contains('?') { '&' } else { '?' });
                    target.push_str(raw);
                    body = None;
                }
                (Some(Body::Raw { .. }), None) => {
                    debug!("No URL to carry -G data, keeping it as the body");
                }
                _ => {}
            }
        }

        let method = match self.method {
            Some(method) => method,
            None if self.head => "HEAD".to_string(),
            None if self.get => "GET".to_string(),
            None if body.is_some() => "POST".to_string(),
            None => "GET".to_string(),
        };

        ParsedRequest {
            method,
            url,
            headers: self.headers,
            body,
        }
    }
}

/// Encode a `--data-urlencode` argument the way curl does
///
/// `content` and `=content` encode the whole content, `name=content` keeps
/// the name and encodes the content. File forms (`@file`, `name@file`) are
/// passed through untouched since the parser never reads files.
fn encode_data_urlencode(arg: &str) -> String {
    match arg.split_once('=') {
        Some(("", content)) => urlencoding::encode(content).into_owned(),
        Some((name, content)) => format!("{}={}", name, urlencoding::encode(content)),
        None if arg.contains('@') => arg.to_string(),
        None => urlencoding::encode(arg).into_owned(),
    }
}
