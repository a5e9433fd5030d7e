//! Crate-wide error types.
//!
//! The resolve and stream paths fail with exactly one of three kinds:
//!
//! - [`Error::InvalidUrl`]: the input is not a track link; no network call was made
//! - [`Error::TrackNotFound`]: the preview was missing or not a track, or no
//!   usable video was found after the fallback query
//! - [`Error::Upstream`]: a collaborator (preview endpoint, video search,
//!   transcoder) failed; the [`UpstreamError`] is carried through untouched
//!
//! The CLI uses `anyhow` on top of these for convenient propagation.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by the resolver and stream provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input did not match the track link pattern
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No track preview, wrong link type, or no viable video match
    #[error("Track not found")]
    TrackNotFound,

    /// Failure inside an external collaborator, passed through as-is
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failures raised by the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from a service
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// Response body could not be understood
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The download/transcode pipeline could not be started
    #[error("Transcoder error: {0}")]
    Transcode(String),
}

impl Error {
    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// Whether this error came from an external collaborator.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
