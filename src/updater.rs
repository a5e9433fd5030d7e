//! Startup update notice.
//!
//! Fetches the latest release tag once per process and logs a warning if it
//! differs from the running version. Nothing here can fail a caller: network
//! and parse problems become a warning too.
//!
//! Set `SPOTSTREAM_NO_UPDATE` to any non-empty value (or `[updates] check =
//! false`) to skip it.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::UpdateConfig;
use crate::error::UpstreamError;

/// Environment variable that disables the check
pub const NO_UPDATE_ENV: &str = "SPOTSTREAM_NO_UPDATE";

/// Version of this build
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static STARTED: AtomicBool = AtomicBool::new(false);

/// Outcome of an update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Outdated { latest: String },
    /// Turned off via environment or config
    Disabled,
    /// Check could not complete (already logged)
    Failed(String),
}

/// Latest-release lookup.
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// Tag name of the latest published release, e.g. `v0.2.0`
    async fn latest_tag(&self) -> Result<String, UpstreamError>;
}

/// GitHub "latest release" client
pub struct GitHubReleaseClient {
    http_client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: String,
}

impl GitHubReleaseClient {
    pub fn new(url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReleaseApi for GitHubReleaseClient {
    async fn latest_tag(&self) -> Result<String, UpstreamError> {
        let response = self
            .http_client
            .get(&self.url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: "GitHub",
                status: status.as_u16(),
            });
        }

        let release = response
            .json::<LatestRelease>()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;
        Ok(release.tag_name)
    }
}

/// Whether an env value turns the check off.
///
/// Only presence counts: unset or empty keeps it on, any other value
/// (including `0` and `false`) disables it.
pub fn flag_disables(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Whether the check is disabled by environment or config
pub fn is_disabled(config: &UpdateConfig) -> bool {
    !config.check || flag_disables(std::env::var(NO_UPDATE_ENV).ok().as_deref())
}

/// Compare the latest release with `current` and log the result.
///
/// Never returns an error; failures are reported as [`UpdateStatus::Failed`].
pub async fn check_for_update<R: ReleaseApi + ?Sized>(api: &R, current: &str) -> UpdateStatus {
    match api.latest_tag().await {
        Ok(tag) if tag == format!("v{current}") => {
            tracing::debug!("spotstream is up to date ({})", tag);
            UpdateStatus::UpToDate
        }
        Ok(tag) => {
            tracing::warn!(
                "spotstream is out of date! Running v{}, latest is {}",
                current,
                tag
            );
            UpdateStatus::Outdated { latest: tag }
        }
        Err(e) => {
            tracing::warn!("Error checking for updates: {}", e);
            tracing::warn!("You can disable this check by setting {}=1", NO_UPDATE_ENV);
            UpdateStatus::Failed(e.to_string())
        }
    }
}

/// Run the check for this build against the configured endpoint.
pub async fn check(config: &UpdateConfig) -> UpdateStatus {
    if is_disabled(config) {
        return UpdateStatus::Disabled;
    }
    let client = GitHubReleaseClient::new(&config.release_url);
    check_for_update(&client, CURRENT_VERSION).await
}

/// Start the check in the background, at most once per process.
///
/// Returns `None` when disabled or already started. The handle can be
/// ignored; the task never affects anything else.
pub fn spawn_once(handle: &Handle, config: &UpdateConfig) -> Option<JoinHandle<UpdateStatus>> {
    if is_disabled(config) {
        tracing::debug!("Update check disabled");
        return None;
    }
    if STARTED.swap(true, Ordering::SeqCst) {
        return None;
    }

    let config = config.clone();
    Some(handle.spawn(async move { check(&config).await }))
}
