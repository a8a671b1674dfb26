//! curlimport library interface
//!
//! Parses pasted curl commands into structured HTTP requests and renders
//! them back into canonical curl commands.
//!
//! # Module Organization
//!
//! - [`curl`] - Shell lexer, curl parser and curl generator
//! - [`models`] - The [`ParsedRequest`](models::ParsedRequest) value types
//! - [`errors`] - Error types (CurlImportError, Result)
//! - [`config`] - `config.toml` loading
//! - [`core`] - CLI execution logic

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod curl;
pub mod errors;
pub mod logging;
pub mod models;
pub mod status;

pub use curl::{parse_curl, parse_curl_command, to_curl_command, MissingUrl, ParseOptions};
pub use errors::{CurlImportError, Result};
pub use models::{Body, FormField, FormFieldKind, Header, ParsedRequest};
