//! Trait definitions for the external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! substitute the mocks in [`mocks`].
//!
//! # Example
//!
//! ```ignore
//! use spotstream::resolver::traits::VideoSearchApi;
//!
//! async fn top_hit<S: VideoSearchApi>(search: &S) {
//!     let hit = search.search_one("Song Artist").await?;
//! }
//! ```

use async_trait::async_trait;

use super::domain::{TrackPreview, VideoCandidate};
use super::spotify::SpotifyPreviewClient;
use super::transcode::{AudioStream, StreamOptions, YtDlpTranscoder};
use super::youtube::YouTubeSearchClient;
use crate::error::UpstreamError;

/// Track metadata preview lookup.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Preview for a (query-stripped) Spotify link, or `None` if Spotify has nothing.
    async fn get_preview(&self, url: &str) -> Result<Option<TrackPreview>, UpstreamError>;
}

/// Video search.
#[async_trait]
pub trait VideoSearchApi: Send + Sync {
    /// Top ranked video for a free-text query, or `None` if there are no hits.
    async fn search_one(&self, query: &str) -> Result<Option<VideoCandidate>, UpstreamError>;
}

/// Video-to-audio stream acquisition.
#[async_trait]
pub trait TranscoderApi: Send + Sync {
    /// Open a live audio stream for a video. `options` are passed through as given.
    async fn open(
        &self,
        video_url: &str,
        options: &StreamOptions,
    ) -> Result<AudioStream, UpstreamError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for SpotifyPreviewClient {
    async fn get_preview(&self, url: &str) -> Result<Option<TrackPreview>, UpstreamError> {
        self.get_preview(url).await
    }
}

#[async_trait]
impl VideoSearchApi for YouTubeSearchClient {
    async fn search_one(&self, query: &str) -> Result<Option<VideoCandidate>, UpstreamError> {
        self.search_one(query).await
    }
}

#[async_trait]
impl TranscoderApi for YtDlpTranscoder {
    async fn open(
        &self,
        video_url: &str,
        options: &StreamOptions,
    ) -> Result<AudioStream, UpstreamError> {
        YtDlpTranscoder::open(self, video_url, options)
    }
}
