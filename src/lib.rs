//! Spotstream - play Spotify track links from YouTube audio.
//!
//! Given a Spotify track URL, look up the track's title and artist through
//! Spotify's public embed page, find the best matching YouTube video, and
//! either describe the match ([`resolve_track_info`]) or open it as a live
//! audio stream through yt-dlp ([`open_stream`]).
//!
//! ```ignore
//! let meta = spotstream::resolve_track_info(
//!     "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=abc",
//! )
//! .await?;
//! println!("{} - {} ({:?} ms)", meta.artist(), meta.title(), meta.duration_ms());
//! ```
//!
//! The free functions build fresh clients from the default configuration on
//! every call. Use [`Resolver`] directly to inject other collaborators.

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod updater;
pub mod validate;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result, UpstreamError};
pub use resolver::{AudioStream, DefaultResolver, Resolver, StreamOptions, TrackMetadata};
pub use updater::UpdateStatus;
pub use validate::{LinkKind, classify_url, strip_query, validate_url, validate_url_str};

/// Resolve a Spotify track link to metadata about its YouTube match.
///
/// Fails with [`Error::InvalidUrl`] before any network traffic when `url`
/// is not a track link.
pub async fn resolve_track_info(url: &str) -> Result<TrackMetadata> {
    DefaultResolver::from_config(&config::load())
        .resolve_track_info(url)
        .await
}

/// Resolve a Spotify track link and open the matched audio.
///
/// `options` are handed to the transcoder as-is; see [`StreamOptions`].
pub async fn open_stream(url: &str, options: StreamOptions) -> Result<AudioStream> {
    DefaultResolver::from_config(&config::load())
        .open_stream(url, options)
        .await
}

/// Compare this build with the latest published release.
///
/// Logs a warning when outdated; never fails.
pub async fn check_update() -> UpdateStatus {
    updater::check(&config::load().updates).await
}
