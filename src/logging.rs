//! Structured logging setup
//!
//! Log events go to stderr so they never mix with the parsed output on
//! stdout. The filter comes from `CURLIMPORT_LOG` (e.g. `curlimport=trace`),
//! falling back to `warn`, or `debug` when `--debug` is given.

use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "CURLIMPORT_LOG";

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(format: LogFormat, debug: bool) {
    let filter = if debug {
        EnvFilter::new("curlimport=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::trace!("Logging already initialized");
    }
}
