//! Command-line interface for spotstream.
//!
//! This module provides CLI commands for resolving, streaming and validating
//! Spotify track links, plus update and config housekeeping.

mod commands;

pub use commands::{Cli, Commands, parse_option, run_command};
