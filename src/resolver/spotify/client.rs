//! Spotify preview client
//!
//! Reads public metadata for a Spotify link from the embed page, which needs
//! no authentication. The page is HTML; the state we want sits in the
//! `__NEXT_DATA__` script tag as JSON.

use scraper::{Html, Selector};

use super::{adapter, dto};
use crate::error::UpstreamError;
use crate::resolver::domain::TrackPreview;
use crate::validate::strip_query;

const SERVICE: &str = "Spotify";

/// Spotify embed page client
pub struct SpotifyPreviewClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SpotifyPreviewClient {
    /// Create a new client against open.spotify.com
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_base_url(http_client, "https://open.spotify.com")
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the preview for a Spotify link.
    ///
    /// Returns `Ok(None)` when Spotify has nothing for the link.
    pub async fn get_preview(&self, url: &str) -> Result<Option<TrackPreview>, UpstreamError> {
        let link = strip_query(url);
        let Some(embed_url) = embed_url(&self.base_url, link) else {
            return Ok(None);
        };

        tracing::debug!("Fetching Spotify preview from {}", embed_url);

        let response = self.http_client.get(&embed_url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let Some(json) = extract_next_data(&html)? else {
            return Err(UpstreamError::Parse(
                "embed page has no __NEXT_DATA__ script".to_string(),
            ));
        };

        let data: dto::NextData =
            serde_json::from_str(&json).map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(adapter::to_preview(data, link))
    }
}

/// `https://open.spotify.com/track/abc` -> `<base>/embed/track/abc`
fn embed_url(base_url: &str, link: &str) -> Option<String> {
    let mut segments = link.trim_end_matches('/').rsplit('/');
    let id = segments.next().filter(|s| !s.is_empty())?;
    let kind = segments.next().filter(|s| !s.is_empty())?;
    Some(format!("{base_url}/embed/{}/{id}", kind.to_ascii_lowercase()))
}

/// Pull the JSON text out of `<script id="__NEXT_DATA__">`.
///
/// Kept synchronous: `Html` is not `Send`, so it must not live across an await.
fn extract_next_data(html: &str) -> Result<Option<String>, UpstreamError> {
    let selector = Selector::parse("script#__NEXT_DATA__")
        .map_err(|e| UpstreamError::Parse(format!("bad selector: {e:?}")))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>()))
}
