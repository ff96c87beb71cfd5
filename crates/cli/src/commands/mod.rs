//! CLI definition and execution
//!
//! objprobe has a single operation, so the probe arguments are flattened
//! into the top-level parser next to the global output flags.

use clap::Parser;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

pub mod probe;

/// objprobe - check that an object exists in S3-compatible storage
///
/// Issues one metadata-only request for BUCKET/KEY and prints the object's
/// content type, size and modification time, or the storage service's error.
#[derive(Parser, Debug)]
#[command(name = "objprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(flatten)]
    pub probe: probe::ProbeArgs,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    probe::execute(cli.probe, output_config).await
}
