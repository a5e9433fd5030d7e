//! Spotstream - resolve Spotify track links to YouTube audio.
//!
//! Logs go to stderr so `spotstream stream` can write audio to stdout.

use std::process::ExitCode;

use clap::Parser;
use spotstream::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spotstream=info")))
        .init();

    cli::run_command(&args)
}
