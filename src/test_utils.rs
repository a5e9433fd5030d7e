//! Test fixtures shared across spotstream tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{mock_preview, mock_video};
//!
//! let preview = TrackPreview {
//!     track: "Custom".to_string(),
//!     ..mock_preview()
//! };
//! ```

use crate::resolver::domain::{PreviewKind, TrackPreview, VideoCandidate};

/// Spotify link used by the fixtures
pub const TRACK_URL: &str = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC";

/// Creates a track-typed preview with sensible defaults.
///
/// Customize with struct update syntax.
pub fn mock_preview() -> TrackPreview {
    TrackPreview {
        kind: PreviewKind::Track,
        title: "Test Track".to_string(),
        track: "Test Track".to_string(),
        artist: "Test Artist".to_string(),
        link: TRACK_URL.to_string(),
        image: "https://i.scdn.co/image/ab67616d0000b273test".to_string(),
        date: Some("2020-01-01T00:00:00Z".to_string()),
        description: None,
        audio_preview: None,
    }
}

/// Creates a preview whose type tag is not `track`.
pub fn mock_preview_of(kind: PreviewKind) -> TrackPreview {
    TrackPreview {
        kind,
        ..mock_preview()
    }
}

/// Creates a viable video candidate (nonzero views, 3:35 long).
pub fn mock_video() -> VideoCandidate {
    VideoCandidate {
        id: "dQw4w9WgXcQ".to_string(),
        url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        title: "Test Artist - Test Track (Official Video)".to_string(),
        channel: Some("Test Artist".to_string()),
        views: 1_000_000,
        duration_ms: Some(215_000),
    }
}

/// Creates a candidate with the given view count.
pub fn mock_video_with_views(views: u64) -> VideoCandidate {
    VideoCandidate {
        views,
        ..mock_video()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_preview_defaults() {
        let preview = mock_preview();
        assert!(preview.is_track());
        assert_eq!(preview.link, TRACK_URL);
    }

    #[test]
    fn test_mock_preview_of_kind() {
        let preview = mock_preview_of(PreviewKind::Album);
        assert!(!preview.is_track());
        assert_eq!(preview.track, "Test Track");
    }

    #[test]
    fn test_mock_video_with_views() {
        assert_eq!(mock_video_with_views(0).views, 0);
        assert!(mock_video().views > 0);
    }
}
