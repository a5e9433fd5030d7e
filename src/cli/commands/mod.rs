//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `resolve`: track lookup and link validation
//! - `stream`: audio streaming to a file or stdout
//! - `settings`: update check and config file

mod resolve;
mod settings;
mod stream;

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;

use crate::{config, updater};

pub use resolve::{cmd_info, cmd_validate};
pub use settings::{cmd_check_update, cmd_config};
pub use stream::cmd_stream;

/// Spotstream CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a Spotify track link and show its YouTube match
    Info {
        /// Spotify track URL
        url: String,
        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stream a Spotify track's audio to a file or stdout
    Stream {
        /// Spotify track URL
        url: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Transcoder option as KEY=VALUE; VALUE is parsed as JSON, else taken as text
        #[arg(long = "opt", value_name = "KEY=VALUE", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },
    /// Check whether a URL is a Spotify link of the given kind
    Validate {
        /// URL to check
        url: String,
        /// Link kind: track, album or playlist
        #[arg(short, long, default_value = "track")]
        kind: String,
    },
    /// Check for a newer release now
    CheckUpdate,
    /// Show the config file location
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// Every command except `check-update` starts the background update check.
pub fn run_command(cli: &Cli) -> anyhow::Result<ExitCode> {
    let rt = Runtime::new()?;
    let config = config::load();

    if !matches!(cli.command, Commands::CheckUpdate) {
        let _ = updater::spawn_once(rt.handle(), &config.updates);
    }

    match &cli.command {
        Commands::Info { url, json } => {
            cmd_info(&rt, &config, url, *json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Stream {
            url,
            output,
            options,
        } => {
            cmd_stream(&rt, &config, url, output.as_ref(), options)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { url, kind } => Ok(cmd_validate(url, kind)),
        Commands::CheckUpdate => {
            cmd_check_update(&rt, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { init } => {
            cmd_config(*init)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Parse a `KEY=VALUE` transcoder option.
///
/// `seek=30` gives a number, `opusEncoded=true` a bool,
/// `encoderArgs=["-af","bass=g=5"]` an array; anything that isn't valid
/// JSON (`fmt=mp3`) is kept as a string.
pub fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in {:?}", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Format milliseconds as `m:ss`
pub(crate) fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_option_values() {
        assert_eq!(parse_option("seek=30").unwrap(), ("seek".to_string(), json!(30)));
        assert_eq!(
            parse_option("opusEncoded=true").unwrap(),
            ("opusEncoded".to_string(), json!(true))
        );
        assert_eq!(parse_option("fmt=mp3").unwrap(), ("fmt".to_string(), json!("mp3")));
        assert_eq!(
            parse_option(r#"encoderArgs=["-af","bass=g=5"]"#).unwrap().1,
            json!(["-af", "bass=g=5"])
        );
        // Only the first '=' splits
        assert_eq!(parse_option("a=b=c").unwrap().1, json!("b=c"));
    }

    #[test]
    fn test_parse_option_rejects_malformed() {
        assert!(parse_option("seek").is_err());
        assert!(parse_option("=5").is_err());
    }

    #[test]
    fn test_parse_stream_args() {
        let cli = Cli::try_parse_from([
            "spotstream",
            "stream",
            "https://open.spotify.com/track/abc",
            "-o",
            "out.pcm",
            "--opt",
            "seek=10",
            "--opt",
            "fmt=s16le",
        ])
        .unwrap();

        match cli.command {
            Commands::Stream {
                url,
                output,
                options,
            } => {
                assert_eq!(url, "https://open.spotify.com/track/abc");
                assert_eq!(output, Some(PathBuf::from("out.pcm")));
                assert_eq!(options.len(), 2);
                assert_eq!(options[0], ("seek".to_string(), json!(10)));
            }
            _ => panic!("expected stream command"),
        }
    }

    #[test]
    fn test_validate_kind_defaults_to_track() {
        let cli = Cli::try_parse_from(["spotstream", "validate", "x"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { ref kind, .. } if kind == "track"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(215_000), "3:35");
        assert_eq!(format_duration(3_601_999), "60:01");
    }
}
