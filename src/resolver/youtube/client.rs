//! YouTube search client
//!
//! Uses the InnerTube endpoint the YouTube web client talks to. No API key is
//! required, but the client name/version pair must look like a real web
//! client or the response comes back empty.

use super::{adapter, dto};
use crate::error::UpstreamError;
use crate::resolver::domain::VideoCandidate;

const SERVICE: &str = "YouTube";

/// InnerTube client identity and locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocale {
    pub client_version: String,
    /// Interface language, e.g. "en"
    pub hl: String,
    /// Region, e.g. "US"
    pub gl: String,
}

impl Default for SearchLocale {
    fn default() -> Self {
        Self {
            client_version: "2.20250101.00.00".to_string(),
            hl: "en".to_string(),
            gl: "US".to_string(),
        }
    }
}

/// YouTube search client
pub struct YouTubeSearchClient {
    http_client: reqwest::Client,
    base_url: String,
    locale: SearchLocale,
}

impl YouTubeSearchClient {
    /// Create a new client against www.youtube.com
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_base_url(http_client, "https://www.youtube.com", SearchLocale::default())
    }

    /// Create a client with a custom base URL and locale
    pub fn with_base_url(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        locale: SearchLocale,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale,
        }
    }

    /// Search for videos and return the top hit, if any.
    pub async fn search_one(&self, query: &str) -> Result<Option<VideoCandidate>, UpstreamError> {
        let url = format!("{}/youtubei/v1/search?prettyPrint=false", self.base_url);
        let body = dto::SearchRequest {
            context: dto::RequestContext {
                client: dto::ClientInfo {
                    client_name: "WEB",
                    client_version: &self.locale.client_version,
                    hl: &self.locale.hl,
                    gl: &self.locale.gl,
                },
            },
            query,
            params: dto::VIDEOS_ONLY_FILTER,
        };

        tracing::debug!("Searching YouTube for {:?}", query);

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let response = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(adapter::first_video(response))
    }
}
