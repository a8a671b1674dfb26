//! CLI argument definitions using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// curlimport - convert curl commands into structured HTTP requests
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "curlimport", version, about, long_about = None)]
pub struct Args {
    /// The curl command to parse, quoted as a single argument.
    /// Read from --file or stdin when omitted
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Read the curl command from a file
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "command")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Fail when the command has no http:// or https:// URL
    #[arg(long = "require-url", action = ArgAction::SetTrue, overrides_with = "allow_missing_url")]
    pub require_url: bool,

    /// Accept commands without a URL (overrides the config file)
    #[arg(long = "allow-missing-url", action = ArgAction::SetTrue, overrides_with = "require_url")]
    pub allow_missing_url: bool,

    /// Output format for structured logging: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Show traceback on error
    #[arg(long = "traceback", action = ArgAction::SetTrue)]
    pub traceback: bool,

    /// Debug mode (implies --traceback)
    #[arg(long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

/// How the parsed request is printed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,
    /// JSON on a single line
    Compact,
    /// Canonical curl command on one line
    Curl,
    /// Canonical curl command, one option per line
    CurlMultiline,
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
