//! objprobe - S3 object existence checker
//!
//! Checks whether one object exists in an S3-compatible bucket and prints
//! its metadata, or the error the storage service returned.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use objprobe::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
