//! calfetch CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calfetch_client::cli::Cli;
use calfetch_client::commands::events;
use calfetch_client::error::ClientError;
use calfetch_core::{TracingConfig, init_tracing};
use calfetch_providers::credentials::setup_instructions;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing.with_format(cli.log_format.into())) {
        eprintln!("warning: {}", e);
    }

    match events::execute(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        // Downstream reader closed (e.g. `calfetch | head -1`).
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(ClientError::ConfigMissing(path)) => {
            eprintln!("error: {} not found\n", path.display());
            eprintln!("{}", setup_instructions(&path));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
