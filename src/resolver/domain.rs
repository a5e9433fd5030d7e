//! Internal domain models for track resolution.
//!
//! These types are OUR types - they don't change when the Spotify embed page
//! or the YouTube search payload change. Collaborator responses get
//! converted into these types by the adapters.

use serde::{Deserialize, Serialize};

/// Resolved track, as handed back to callers.
///
/// Title, artist, link and artwork come from Spotify; the duration comes
/// from the matched video since the preview endpoint does not expose one.
/// Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    title: String,
    artist: String,
    #[serde(rename = "url")]
    canonical_url: String,
    id: String,
    /// Milliseconds
    #[serde(rename = "duration")]
    duration_ms: Option<u64>,
    #[serde(rename = "thumbnail")]
    thumbnail_url: String,
}

impl TrackMetadata {
    /// Combine a track preview with its matched video.
    pub(crate) fn from_match(preview: TrackPreview, video: &VideoCandidate) -> Self {
        let id = last_path_segment(&preview.link).to_string();
        Self {
            title: preview.track,
            artist: preview.artist,
            canonical_url: preview.link,
            id,
            duration_ms: video.duration_ms,
            thumbnail_url: preview.image,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Spotify link as reported by the preview endpoint
    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    /// Spotify track ID (last path segment of the canonical URL)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Duration estimate in milliseconds, taken from the matched video
    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }
}

/// Spotify entity type tag, as reported by the preview endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewKind {
    Track,
    Album,
    Playlist,
    Artist,
    Episode,
    Other(String),
}

impl PreviewKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "track" => Self::Track,
            "album" => Self::Album,
            "playlist" => Self::Playlist,
            "artist" => Self::Artist,
            "episode" => Self::Episode,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Metadata returned by the Spotify preview endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPreview {
    pub kind: PreviewKind,
    /// Entity name (album or playlist name for non-track links)
    pub title: String,
    /// Name of the (first) track
    pub track: String,
    /// Artist names joined with " & "
    pub artist: String,
    /// Canonical open.spotify.com link
    pub link: String,
    /// Largest cover image URL
    pub image: String,
    /// Release date (ISO string), when known
    pub date: Option<String>,
    pub description: Option<String>,
    /// 30 second preview clip
    pub audio_preview: Option<String>,
}

impl TrackPreview {
    pub fn is_track(&self) -> bool {
        self.kind == PreviewKind::Track
    }

    /// `"{track} {artist}"`
    pub fn primary_query(&self) -> String {
        format!("{} {}", self.track, self.artist)
    }

    /// `"{track}"` alone, used when the primary query finds nothing
    pub fn fallback_query(&self) -> String {
        self.track.clone()
    }
}

/// A video search hit. Owned by the search collaborator; the resolver only
/// reads `url`, `views` and `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoCandidate {
    pub id: String,
    pub url: String,
    pub title: String,
    pub channel: Option<String>,
    pub views: u64,
    /// Milliseconds; `None` for live streams
    pub duration_ms: Option<u64>,
}

impl VideoCandidate {
    /// Zero views marks removed or placeholder uploads.
    pub fn is_viable(&self) -> bool {
        self.views > 0
    }
}

fn last_path_segment(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}
