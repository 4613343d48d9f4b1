use crate::config::{
    GeneratorConfig, DEFAULT_AUTH_HEADER, DEFAULT_AUTH_TOKEN, DEFAULT_ERROR_TYPE,
    DEFAULT_ROUTE_MARKER, DEFAULT_VALIDATOR_ATTR,
};
use crate::generator::{format_file, generate_file, GenerationReport};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for apigen
///
/// Reads one Rust source file and writes the bind/validate/serve module for
/// its annotated records and handlers.
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(version, about = "Generate request binding, validation and dispatch code", long_about = None)]
pub struct Cli {
    /// Rust source file with annotated records and handlers
    pub input: PathBuf,

    /// Generated module to write (overwritten)
    pub output: PathBuf,

    /// Doc comment prefix that marks a route handler
    #[arg(long, env = "APIGEN_ROUTE_MARKER", default_value = DEFAULT_ROUTE_MARKER)]
    pub marker: String,

    /// Field attribute carrying validation rules
    #[arg(long, env = "APIGEN_VALIDATOR_ATTR", default_value = DEFAULT_VALIDATOR_ATTR)]
    pub attr: String,

    /// Structured error type constructed by the generated code
    #[arg(long, env = "APIGEN_ERROR_TYPE", default_value = DEFAULT_ERROR_TYPE)]
    pub error_type: String,

    /// Header checked by handlers declared with `"auth": true`
    #[arg(long, env = "APIGEN_AUTH_HEADER", default_value = DEFAULT_AUTH_HEADER)]
    pub auth_header: String,

    /// Expected value of the auth header
    #[arg(long, env = "APIGEN_AUTH_TOKEN", default_value = DEFAULT_AUTH_TOKEN)]
    pub auth_token: String,

    /// Run rustfmt on the output
    #[arg(long, default_value_t = false)]
    pub fmt: bool,
}

impl Cli {
    /// Generator settings selected by the flags
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            route_marker: self.marker.clone(),
            validator_attr: self.attr.clone(),
            error_type: self.error_type.clone(),
            auth_header: self.auth_header.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

/// Parse the process arguments and run
pub fn run_cli() -> anyhow::Result<GenerationReport> {
    execute(&Cli::parse())
}

/// Run one generation as described by `cli`
pub fn execute(cli: &Cli) -> anyhow::Result<GenerationReport> {
    let config = cli.config();
    config.validate().context("invalid generator settings")?;

    let report = generate_file(&cli.input, &cli.output, &config).with_context(|| {
        format!(
            "generating {} from {}",
            cli.output.display(),
            cli.input.display()
        )
    })?;

    if cli.fmt {
        format_file(&cli.output)?;
        info!(output = %cli.output.display(), "formatted");
    }
    Ok(report)
}
