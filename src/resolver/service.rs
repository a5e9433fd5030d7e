//! Resolver service - orchestrates track lookup and stream acquisition
//!
//! Both public operations share the same pipeline:
//! 1. Validate the link (no network on failure)
//! 2. Fetch the Spotify preview; anything but a track is "not found"
//! 3. Search YouTube for "{track} {artist}"
//! 4. If nothing came back, search once more for "{track}" alone
//! 5. Reject a missing hit or a hit with zero views
//!
//! [`Resolver::resolve_track_info`] then builds a [`TrackMetadata`];
//! [`Resolver::open_stream`] hands the video to the transcoder instead.
//!
//! There are no retries beyond the single fallback query. Collaborator
//! errors are returned exactly as the collaborator produced them.

use super::domain::{TrackMetadata, TrackPreview, VideoCandidate};
use super::spotify::SpotifyPreviewClient;
use super::traits::{MetadataApi, TranscoderApi, VideoSearchApi};
use super::transcode::{AudioStream, StreamOptions, YtDlpTranscoder};
use super::youtube::{SearchLocale, YouTubeSearchClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::validate::{is_track_url, strip_query};

/// Track resolver over a set of collaborators.
///
/// Holds no mutable state; one instance can serve concurrent calls.
pub struct Resolver<M, S, T> {
    metadata: M,
    search: S,
    transcoder: T,
}

/// Resolver wired to Spotify, YouTube and yt-dlp
pub type DefaultResolver = Resolver<SpotifyPreviewClient, YouTubeSearchClient, YtDlpTranscoder>;

impl<M, S, T> Resolver<M, S, T>
where
    M: MetadataApi,
    S: VideoSearchApi,
    T: TranscoderApi,
{
    /// Create a resolver from explicit collaborators
    pub fn new(metadata: M, search: S, transcoder: T) -> Self {
        Self {
            metadata,
            search,
            transcoder,
        }
    }

    /// Resolve a Spotify track link to its metadata.
    ///
    /// Succeeds only if Spotify reports a track and YouTube has a matching
    /// video with a nonzero view count.
    pub async fn resolve_track_info(&self, url: &str) -> Result<TrackMetadata> {
        let (preview, video) = self.find_match(url).await?;
        let metadata = TrackMetadata::from_match(preview, &video);

        tracing::info!(
            "Resolved {} to {} ({} views)",
            metadata.id(),
            video.url,
            video.views
        );
        Ok(metadata)
    }

    /// Resolve a Spotify track link and open its audio stream.
    ///
    /// `options` go to the transcoder untouched.
    pub async fn open_stream(&self, url: &str, options: StreamOptions) -> Result<AudioStream> {
        let (_, video) = self.find_match(url).await?;

        tracing::info!("Opening audio stream for {}", video.url);
        let stream = self.transcoder.open(&video.url, &options).await?;
        Ok(stream)
    }

    /// Steps 1-5 shared by both operations
    async fn find_match(&self, url: &str) -> Result<(TrackPreview, VideoCandidate)> {
        if !is_track_url(url) {
            return Err(Error::invalid_url(url));
        }

        let link = strip_query(url);
        tracing::debug!("Fetching preview for {}", link);

        let preview = match self.metadata.get_preview(link).await? {
            Some(preview) if preview.is_track() => preview,
            Some(preview) => {
                tracing::debug!("Preview for {} is a {:?}, not a track", link, preview.kind);
                return Err(Error::TrackNotFound);
            }
            None => return Err(Error::TrackNotFound),
        };

        let mut video = self.search.search_one(&preview.primary_query()).await?;
        if video.is_none() {
            tracing::debug!("No results for {:?}, retrying with title only", preview.primary_query());
            video = self.search.search_one(&preview.fallback_query()).await?;
        }

        match video {
            Some(video) if video.is_viable() => Ok((preview, video)),
            Some(video) => {
                tracing::debug!("Rejecting {}: zero views", video.url);
                Err(Error::TrackNotFound)
            }
            None => Err(Error::TrackNotFound),
        }
    }
}

impl DefaultResolver {
    /// Build the production resolver from configuration.
    ///
    /// Every resolver gets its own HTTP client; nothing is pooled across
    /// resolvers.
    pub fn from_config(config: &Config) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(config.http.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
                reqwest::Client::new()
            });

        let locale = SearchLocale {
            client_version: config.youtube.client_version.clone(),
            hl: config.youtube.hl.clone(),
            gl: config.youtube.gl.clone(),
        };

        Resolver::new(
            SpotifyPreviewClient::with_base_url(http_client.clone(), &config.spotify.base_url),
            YouTubeSearchClient::with_base_url(http_client, &config.youtube.base_url, locale),
            YtDlpTranscoder::with_paths(&config.transcoder.yt_dlp_path, &config.transcoder.ffmpeg_path),
        )
    }
}

impl Default for DefaultResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
