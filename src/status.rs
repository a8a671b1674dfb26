//! Exit status codes for the CLI
//!
//! curlimport follows standard Unix exit code conventions:
//! - 0: the command was parsed and printed
//! - 1: any error (not a curl command, missing URL under `--require-url`,
//!   unreadable input, bad arguments)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}
