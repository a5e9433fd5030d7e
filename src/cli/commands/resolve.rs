//! Track lookup and link validation commands.

use std::process::ExitCode;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::resolver::DefaultResolver;
use crate::validate::{LinkKind, classify_url, validate_url_str};

use super::format_duration;

/// Resolve a track link and print the match
pub fn cmd_info(rt: &Runtime, config: &Config, url: &str, json: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let resolver = DefaultResolver::from_config(config);
        let meta = resolver.resolve_track_info(url).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&meta)?);
            return Ok(());
        }

        println!("✓ {} - {}", meta.artist(), meta.title());
        println!();
        println!("  ID:        {}", meta.id());
        println!("  Spotify:   {}", meta.canonical_url());
        match meta.duration_ms() {
            Some(ms) => println!("  Duration:  {}", format_duration(ms)),
            None => println!("  Duration:  unknown"),
        }
        if !meta.thumbnail_url().is_empty() {
            println!("  Artwork:   {}", meta.thumbnail_url());
        }
        Ok(())
    })
}

/// Print whether `url` is a link of `kind`; failure exit status if not
pub fn cmd_validate(url: &str, kind: &str) -> ExitCode {
    if validate_url_str(url, kind) {
        println!("✓ valid {} link", kind);
        return ExitCode::SUCCESS;
    }

    match classify_url(url) {
        Some(actual) => println!("✗ not a {} link (it is a {} link)", kind, actual),
        None if kind.parse::<LinkKind>().is_err() => {
            println!("✗ unknown link kind {:?} (expected track, album or playlist)", kind)
        }
        None => println!("✗ not a Spotify {} link", kind),
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_exit_codes() {
        let track = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=1";
        assert_eq!(cmd_validate(track, "track"), ExitCode::SUCCESS);
        assert_eq!(cmd_validate(track, "album"), ExitCode::FAILURE);
        assert_eq!(cmd_validate(track, "artist"), ExitCode::FAILURE);
        assert_eq!(cmd_validate("hello", "track"), ExitCode::FAILURE);
    }
}
