//! Data types shared by the parser, the generator and the CLI

pub mod request;

pub use request::{Body, FormField, FormFieldKind, Header, ParsedRequest};
