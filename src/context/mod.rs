//! Process environment seen by the CLI

pub mod environment;

pub use environment::{Environment, CONFIG_DIR_ENV};
