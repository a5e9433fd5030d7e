//! YouTube InnerTube search Data Transfer Objects
//!
//! Request and response shapes for `POST /youtubei/v1/search`, the endpoint
//! the YouTube web client itself uses. The response is deeply nested and
//! full of renderer types we don't care about; everything below is optional
//! so unknown renderers (ads, shelves, continuations) just deserialize empty.
//! DO NOT use these types outside the youtube module - convert to domain types.

use serde::{Deserialize, Serialize};

/// `params` value restricting results to videos
pub const VIDEOS_ONLY_FILTER: &str = "EgIQAQ==";

/// Search request body
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub context: RequestContext<'a>,
    pub query: &'a str,
    pub params: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContext<'a> {
    pub client: ClientInfo<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo<'a> {
    pub client_name: &'a str,
    pub client_version: &'a str,
    pub hl: &'a str,
    pub gl: &'a str,
}

/// Search response (only the path down to the video renderers)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchResponse {
    pub contents: Option<Contents>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contents {
    pub two_column_search_results_renderer: Option<TwoColumnSearchResults>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwoColumnSearchResults {
    pub primary_contents: Option<PrimaryContents>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryContents {
    pub section_list_renderer: Option<SectionList>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SectionList {
    pub contents: Vec<Section>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub item_section_renderer: Option<ItemSection>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ItemSection {
    pub contents: Vec<Item>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    pub video_renderer: Option<VideoRenderer>,
}

/// A single video result
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRenderer {
    pub video_id: String,
    pub title: Option<Text>,
    pub owner_text: Option<Text>,
    /// "3:32" or "1:02:03"; absent for live streams
    pub length_text: Option<Text>,
    /// "1,234,567 views", "No views", or runs like ["1.2K", " watching"]
    pub view_count_text: Option<Text>,
}

/// YouTube formatted string: either `simpleText` or a list of runs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Text {
    pub simple_text: Option<String>,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Run {
    pub text: String,
}

impl Text {
    /// Flatten to plain text
    pub fn text(&self) -> String {
        match &self.simple_text {
            Some(text) => text.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
