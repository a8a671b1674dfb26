//! Environment struct (stdin/stdout/etc.)

use std::io::{self, Stdin, Stdout};
use std::path::PathBuf;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "CURLIMPORT_CONFIG_DIR";

/// Execution environment
pub struct Environment {
    pub stdin: Stdin,
    pub stdout: Stdout,
    pub stdin_isatty: bool,
    pub program_name: String,
    pub config_dir: Option<PathBuf>,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stdin_isatty: atty::is(atty::Stream::Stdin),
            program_name: "curlimport".to_string(),
            config_dir: std::env::var_os(CONFIG_DIR_ENV)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }
}
