//! Adapter layer: Convert embed page DTOs to domain models
//!
//! This is the ONLY place where Spotify DTO types are converted to domain types.

use super::dto;
use crate::resolver::domain::{PreviewKind, TrackPreview};

const OPEN_SPOTIFY: &str = "https://open.spotify.com";

/// Convert the embed page state to a preview.
///
/// Returns `None` when the page carries no entity (unknown or removed IDs).
/// `requested_url` is used as the link when the entity URI is malformed.
pub fn to_preview(data: dto::NextData, requested_url: &str) -> Option<TrackPreview> {
    let entity = data.props.page_props.state?.data?.entity?;

    let kind = PreviewKind::from_tag(&entity.entity_type);
    let image = largest_image(&entity).unwrap_or_default();
    let link = uri_to_link(&entity.uri).unwrap_or_else(|| requested_url.to_string());
    let date = entity.release_date.as_ref().and_then(|d| d.iso_string.clone());

    // Albums and playlists describe their first track
    let (track, artist, audio_preview) = if kind == PreviewKind::Track {
        (
            entity.name.clone(),
            join_artists(&entity.artists).or_else(|| entity.subtitle.clone()),
            entity.audio_preview.as_ref().map(|a| a.url.clone()),
        )
    } else {
        match entity.track_list.first() {
            Some(first) => (
                first.title.clone(),
                first.subtitle.clone(),
                first.audio_preview.as_ref().map(|a| a.url.clone()),
            ),
            None => (entity.name.clone(), entity.subtitle.clone(), None),
        }
    };

    Some(TrackPreview {
        kind,
        title: entity.name,
        track,
        artist: artist.unwrap_or_default(),
        link,
        image,
        date,
        description: entity.description.or(entity.subtitle),
        audio_preview,
    })
}

/// `spotify:track:abc` -> `https://open.spotify.com/track/abc`
fn uri_to_link(uri: &str) -> Option<String> {
    let mut parts = uri.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("spotify"), Some(kind), Some(id), None) if !kind.is_empty() && !id.is_empty() => {
            Some(format!("{OPEN_SPOTIFY}/{kind}/{id}"))
        }
        _ => None,
    }
}

fn join_artists(artists: &[dto::Artist]) -> Option<String> {
    if artists.is_empty() {
        return None;
    }
    Some(
        artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" & "),
    )
}

/// Widest cover image, from coverArt or (for some tracks) visualIdentity
fn largest_image(entity: &dto::Entity) -> Option<String> {
    let sources = entity
        .cover_art
        .as_ref()
        .map(|c| c.sources.as_slice())
        .filter(|s| !s.is_empty())
        .or_else(|| entity.visual_identity.as_ref().map(|v| v.image.as_slice()))?;

    sources
        .iter()
        .max_by_key(|img| img.width.or(img.max_width).unwrap_or(0))
        .map(|img| img.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTED: &str = "https://open.spotify.com/track/requested";

    fn make_entity(entity_type: &str) -> dto::Entity {
        dto::Entity {
            entity_type: entity_type.to_string(),
            name: "Name".to_string(),
            uri: format!("spotify:{entity_type}:abc123"),
            id: None,
            title: None,
            subtitle: None,
            description: None,
            artists: vec![],
            cover_art: None,
            visual_identity: None,
            release_date: None,
            duration: None,
            audio_preview: None,
            track_list: vec![],
        }
    }

    fn wrap(entity: Option<dto::Entity>) -> dto::NextData {
        dto::NextData {
            props: dto::Props {
                page_props: dto::PageProps {
                    state: Some(dto::State {
                        data: Some(dto::StateData { entity }),
                    }),
                    status: None,
                },
            },
        }
    }

    fn image(url: &str, width: u32) -> dto::ImageSource {
        dto::ImageSource {
            url: url.to_string(),
            width: Some(width),
            height: Some(width),
            max_width: None,
        }
    }

    #[test]
    fn test_convert_track() {
        let mut entity = make_entity("track");
        entity.artists = vec![
            dto::Artist {
                name: "Queen".to_string(),
                uri: None,
            },
            dto::Artist {
                name: "David Bowie".to_string(),
                uri: None,
            },
        ];
        entity.cover_art = Some(dto::CoverArt {
            sources: vec![image("small", 64), image("large", 640), image("mid", 300)],
        });
        entity.audio_preview = Some(dto::AudioPreview {
            url: "preview.mp3".to_string(),
        });

        let preview = to_preview(wrap(Some(entity)), REQUESTED).unwrap();

        assert!(preview.is_track());
        assert_eq!(preview.track, "Name");
        assert_eq!(preview.artist, "Queen & David Bowie");
        assert_eq!(preview.link, "https://open.spotify.com/track/abc123");
        assert_eq!(preview.image, "large");
        assert_eq!(preview.audio_preview.as_deref(), Some("preview.mp3"));
    }

    #[test]
    fn test_convert_album_uses_first_track() {
        let mut entity = make_entity("album");
        entity.subtitle = Some("Album Artist".to_string());
        entity.track_list = vec![dto::TrackListItem {
            uri: None,
            title: "Opener".to_string(),
            subtitle: Some("Track Artist".to_string()),
            duration: Some(1000),
            audio_preview: None,
        }];

        let preview = to_preview(wrap(Some(entity)), REQUESTED).unwrap();

        assert_eq!(preview.kind, PreviewKind::Album);
        assert_eq!(preview.title, "Name");
        assert_eq!(preview.track, "Opener");
        assert_eq!(preview.artist, "Track Artist");
    }

    #[test]
    fn test_missing_entity_is_none() {
        assert!(to_preview(wrap(None), REQUESTED).is_none());

        let not_found = dto::NextData {
            props: dto::Props {
                page_props: dto::PageProps {
                    state: None,
                    status: Some(404),
                },
            },
        };
        assert!(to_preview(not_found, REQUESTED).is_none());
    }

    #[test]
    fn test_malformed_uri_falls_back_to_request() {
        let mut entity = make_entity("track");
        entity.uri = "garbage".to_string();

        let preview = to_preview(wrap(Some(entity)), REQUESTED).unwrap();

        assert_eq!(preview.link, REQUESTED);
    }

    #[test]
    fn test_visual_identity_fallback() {
        let mut entity = make_entity("track");
        entity.visual_identity = Some(dto::VisualIdentity {
            image: vec![dto::ImageSource {
                url: "vi".to_string(),
                width: None,
                height: None,
                max_width: Some(640),
            }],
        });

        let preview = to_preview(wrap(Some(entity)), REQUESTED).unwrap();

        assert_eq!(preview.image, "vi");
    }

    #[test]
    fn test_uri_to_link() {
        assert_eq!(
            uri_to_link("spotify:album:xyz").as_deref(),
            Some("https://open.spotify.com/album/xyz")
        );
        assert!(uri_to_link("spotify:track:").is_none());
        assert!(uri_to_link("spotify:user:a:playlist:b").is_none());
    }
}
