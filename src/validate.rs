//! Spotify link validation.
//!
//! Everything here is pure and synchronous: callers can gate on these
//! checks before touching the network.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `http(s)://open.spotify.com/<kind>/<id>` (or `play.`), ASCII
/// case-insensitive. The kind is captured so one pattern serves all link types.
/// Unicode mode is off so only ASCII letters fold.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^https?://(?:open|play)\.spotify\.com/(track|album|playlist)/[A-Za-z0-9_]+$")
        .expect("link pattern is valid")
});

/// Type of Spotify link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkKind {
    #[default]
    Track,
    Album,
    Playlist,
}

impl LinkKind {
    /// Path segment used by Spotify for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Playlist => "playlist",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized link kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown link kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for LinkKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(Self::Track),
            "album" => Ok(Self::Album),
            "playlist" => Ok(Self::Playlist),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Drop everything from the first `?` onward.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Which kind of Spotify link `url` is, if any.
pub fn classify_url(url: &str) -> Option<LinkKind> {
    let caps = LINK_PATTERN.captures(strip_query(url))?;
    match caps[1].to_ascii_lowercase().as_str() {
        "track" => Some(LinkKind::Track),
        "album" => Some(LinkKind::Album),
        "playlist" => Some(LinkKind::Playlist),
        _ => None,
    }
}

/// Returns true if `url` is a Spotify link of the given kind.
///
/// The query string is ignored, so `...?si=abc` validates the same as the
/// bare link.
pub fn validate_url(url: &str, kind: LinkKind) -> bool {
    classify_url(url) == Some(kind)
}

/// String-typed variant of [`validate_url`]. Unknown kind names always
/// yield false.
pub fn validate_url_str(url: &str, kind: &str) -> bool {
    kind.parse::<LinkKind>()
        .is_ok_and(|kind| validate_url(url, kind))
}

/// Shorthand for `validate_url(url, LinkKind::Track)`.
pub fn is_track_url(url: &str) -> bool {
    validate_url(url, LinkKind::Track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_track_url() {
        assert!(is_track_url("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"));
        assert!(is_track_url("http://play.spotify.com/track/abc123"));
    }

    #[test]
    fn test_query_string_ignored() {
        assert!(is_track_url(
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=1234abcd"
        ));
        assert_eq!(
            strip_query("https://open.spotify.com/track/abc?si=1?x=2"),
            "https://open.spotify.com/track/abc"
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_track_url("HTTPS://OPEN.SPOTIFY.COM/TRACK/ABC123"));
        assert_eq!(
            classify_url("https://open.spotify.com/Album/xyz"),
            Some(LinkKind::Album)
        );
    }

    #[test]
    fn test_kind_must_match() {
        let album = "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3";
        assert!(!is_track_url(album));
        assert!(validate_url(album, LinkKind::Album));
        assert!(!validate_url(album, LinkKind::Playlist));
        assert!(validate_url_str(
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M",
            "playlist"
        ));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(!is_track_url("https://open.spotify.com/track/"));
        assert!(!is_track_url("https://open.spotify.com/track/abc/def"));
        assert!(!is_track_url("https://www.spotify.com/track/abc"));
        assert!(!is_track_url("ftp://open.spotify.com/track/abc"));
        assert!(!is_track_url("spotify:track:abc"));
        assert!(!is_track_url(" https://open.spotify.com/track/abc"));
        assert!(!is_track_url("https://open.spotify.com/track/ab-c"));
        assert!(!is_track_url(""));
    }

    #[test]
    fn test_rejects_non_ascii_case_folds() {
        // Kelvin sign folds to 'k' and long s to 's' under Unicode rules
        assert!(!is_track_url("https://open.spotify.com/track/abc\u{212A}"));
        assert!(!is_track_url("https://open.\u{17F}potify.com/track/abc123"));
        assert!(!is_track_url("https://open.spotify.com/\u{17F}\u{212A}/abc123"));
        assert_eq!(classify_url("https://open.spotify.com/trac\u{212A}/abc"), None);
    }

    #[test]
    fn test_unknown_kind_is_false() {
        let url = "https://open.spotify.com/track/abc";
        assert!(!validate_url_str(url, "artist"));
        assert!(!validate_url_str(url, "Track"));
        assert!(!validate_url_str(url, ""));
        assert!("episode".parse::<LinkKind>().is_err());
    }

    #[test]
    fn test_kind_default_is_track() {
        assert_eq!(LinkKind::default(), LinkKind::Track);
        assert_eq!(LinkKind::Playlist.to_string(), "playlist");
    }

    proptest! {
        #[test]
        fn prop_track_urls_validate(
            scheme in "https?",
            id in "[A-Za-z0-9]{1,32}",
            query in proptest::option::of("[a-z_]{1,10}=[A-Za-z0-9]{0,10}"),
        ) {
            let base = format!("{scheme}://open.spotify.com/track/{id}");
            let url = match query {
                Some(q) => format!("{base}?{q}"),
                None => base.clone(),
            };
            prop_assert!(validate_url(&url, LinkKind::Track));
            let with_utm = format!("{base}?utm_source=x");
            prop_assert!(validate_url(&with_utm, LinkKind::Track));
        }

        #[test]
        fn prop_query_does_not_change_result(url in "\\PC{0,60}") {
            let with_query = format!("{url}?utm_source=x");
            prop_assert_eq!(
                validate_url(&url, LinkKind::Track),
                validate_url(&with_query, LinkKind::Track)
            );
        }

        #[test]
        fn prop_unknown_kinds_never_validate(
            kind in "[a-z]{0,12}".prop_filter("not a known kind", |k| {
                !matches!(k.as_str(), "track" | "album" | "playlist")
            }),
            url in "\\PC{0,60}",
        ) {
            prop_assert!(!validate_url_str(&url, &kind));
            prop_assert!(!validate_url_str("https://open.spotify.com/track/abc", &kind));
        }
    }
}
