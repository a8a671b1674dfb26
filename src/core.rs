use std::io::{Read, Write};

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Args, LogFormat, OutputFormat};
use crate::config::Config;
use crate::context::Environment;
use crate::curl::{parse_curl_command, to_curl_command, to_curl_command_multiline, MissingUrl, ParseOptions};
use crate::errors::{CurlImportError, Result};
use crate::logging;
use crate::models::ParsedRequest;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Loads configuration, parses arguments, reads the curl command and prints
/// the parsed request.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = std::path::Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    let config = match Config::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };

    let merged_args = merge_default_options(args, &config);

    let traceback = merged_args.iter().any(|a| a == "--traceback" || a == "--debug");

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    logging::init(parsed.log_format.unwrap_or(LogFormat::Text), parsed.debug);
    debug!(config_dir = %config.config_dir.display(), "Configuration loaded");

    match program(&parsed, &config, &mut env) {
        Ok(status) => status,
        Err(e) => handle_error(e, traceback),
    }
}

/// Parse the curl command named by `args` and print it to stdout
pub fn program(args: &Args, config: &Config, env: &mut Environment) -> Result<ExitStatus> {
    if args.debug {
        debug!(?args, "Arguments");
    }

    let input = read_input(args, env)?;
    let options = resolve_parse_options(args, config);
    let request = parse_curl_command(&input, &options)?;

    info!(
        method = %request.method,
        url = request.url.as_deref().unwrap_or(""),
        headers = request.headers.len(),
        has_body = request.body.is_some(),
        "Parsed curl command"
    );

    let output = render(&request, args.format)?;
    writeln!(env.stdout, "{}", output)?;
    Ok(ExitStatus::Success)
}

/// Render a parsed request in the requested output format
pub fn render(request: &ParsedRequest, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(request)?,
        OutputFormat::Compact => serde_json::to_string(request)?,
        OutputFormat::Curl => to_curl_command(request),
        OutputFormat::CurlMultiline => to_curl_command_multiline(request),
    };
    Ok(output)
}

/// The command comes from the positional argument, `--file`, or piped stdin
fn read_input(args: &Args, env: &mut Environment) -> Result<String> {
    if let Some(command) = &args.command {
        return Ok(command.clone());
    }

    if let Some(path) = &args.file {
        debug!(path = %path.display(), "Reading curl command from file");
        return Ok(std::fs::read_to_string(path)?);
    }

    if env.stdin_isatty {
        return Err(CurlImportError::Argument(format!(
            "no curl command given\n\nusage: {} [OPTIONS] \"curl ...\"  (or pipe the command on stdin)",
            env.program_name
        )));
    }

    let mut input = String::new();
    env.stdin.read_to_string(&mut input)?;
    Ok(input)
}

/// Command-line flags override the config file's parser settings
fn resolve_parse_options(args: &Args, config: &Config) -> ParseOptions {
    let mut options = config.parse_options;
    if args.require_url {
        options.missing_url = MissingUrl::Reject;
    } else if args.allow_missing_url {
        options.missing_url = MissingUrl::Allow;
    }
    options
}

fn merge_default_options(args: Vec<String>, config: &Config) -> Vec<String> {
    if config.default_options.is_empty() {
        return args;
    }

    // Values of flags (e.g. "--format", "curl") stay next to their flag
    let mut defaults = Vec::with_capacity(config.default_options.len());
    let mut positional = Vec::new();
    let mut iter = config.default_options.iter().peekable();
    while let Some(opt) = iter.next() {
        if !opt.starts_with('-') {
            positional.push(opt);
            continue;
        }
        defaults.push(opt.clone());
        if !opt.contains('=') {
            if let Some(value) = iter.next_if(|next| !next.starts_with('-')) {
                defaults.push(value.clone());
            }
        }
    }

    if !positional.is_empty() {
        eprintln!("Warning: Positional arguments in default_options are ignored: {:?}", positional);
    }

    if defaults.is_empty() {
        return args;
    }

    let mut merged = Vec::with_capacity(args.len() + defaults.len());

    if let Some(program) = args.first() {
        merged.push(program.clone());
    }

    merged.extend(defaults);
    merged.extend(args.into_iter().skip(1));

    merged
}

fn handle_error(error: CurlImportError, traceback: bool) -> ExitStatus {
    if traceback {
        eprintln!("Error: {:?}", error);
    }
    eprintln!("Error: {}", error.user_message());

    // All errors return the same exit code (1) following Unix conventions
    ExitStatus::Error
}
