//! cURL import and export
//!
//! - **Import**: parse a pasted curl command into a [`ParsedRequest`]
//! - **Export**: render a [`ParsedRequest`] back into a canonical curl command
//!
//! ```text
//! curl -X POST -H 'Content-Type: application/json' -d '{"name":"John"}' https://api.example.com/users
//! ```
//!
//! becomes
//!
//! ```text
//! {"method":"POST","url":"https://api.example.com/users",
//!  "headers":[{"key":"Content-Type","value":"application/json"}],
//!  "body":{"mode":"raw","raw":"{\"name\":\"John\"}"}}
//! ```
//!
//! [`ParsedRequest`]: crate::models::ParsedRequest

pub mod generate;
pub mod lexer;
pub mod parser;

pub use generate::{to_curl_command, to_curl_command_multiline};
pub use parser::{parse_curl, parse_curl_command, MissingUrl, ParseOptions};
