//! # prlink CLI Entry Point
//!
//! Parses arguments, sets up tracing on stderr and runs the command. Stdout
//! only ever carries the rendered snippet.

use std::process::ExitCode;

use clap::Parser;
use prlink_cli::cli::{Cli, handle_cli, report_error};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cmd = Cli::parse();

  // Set up tracing based on verbosity level
  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match handle_cli(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      report_error(&err);
      ExitCode::FAILURE
    }
  }
}
