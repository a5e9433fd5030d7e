//! Spotify embed page Data Transfer Objects
//!
//! The embed page (`https://open.spotify.com/embed/<kind>/<id>`) ships its
//! state as JSON inside `<script id="__NEXT_DATA__">`. These types mirror
//! the part of that blob we read: `props.pageProps.state.data.entity`.
//! DO NOT use these types outside the spotify module - convert to domain types.

use serde::{Deserialize, Serialize};

/// Top-level `__NEXT_DATA__` object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NextData {
    pub props: Props,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    pub page_props: PageProps,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PageProps {
    pub state: Option<State>,
    /// Set (e.g. 404) when the embed page could not find the entity
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct State {
    pub data: Option<StateData>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StateData {
    pub entity: Option<Entity>,
}

/// Track, album, playlist, artist or episode
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// "track", "album", "playlist", ...
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    /// `spotify:<type>:<id>`
    pub uri: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub cover_art: Option<CoverArt>,
    pub visual_identity: Option<VisualIdentity>,
    pub release_date: Option<ReleaseDate>,
    /// Milliseconds
    pub duration: Option<u64>,
    pub audio_preview: Option<AudioPreview>,
    /// Present for albums and playlists
    #[serde(default)]
    pub track_list: Vec<TrackListItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoverArt {
    pub sources: Vec<ImageSource>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VisualIdentity {
    pub image: Vec<ImageSource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// visualIdentity images use maxWidth instead of width
    pub max_width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDate {
    pub iso_string: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioPreview {
    pub url: String,
}

/// Entry in an album/playlist track list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackListItem {
    pub uri: Option<String>,
    pub title: String,
    /// Artist names, already joined by Spotify
    pub subtitle: Option<String>,
    pub duration: Option<u64>,
    pub audio_preview: Option<AudioPreview>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the embed page actually ships.
// ============================================================================
