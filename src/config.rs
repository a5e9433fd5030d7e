//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\spotstream\config.toml
//! - macOS: ~/Library/Application Support/spotstream/config.toml
//! - Linux: ~/.config/spotstream/config.toml
//!
//! Every section is optional; missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::resolver::transcode::StreamOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shared HTTP settings
    pub http: HttpConfig,

    /// Spotify preview endpoint
    pub spotify: SpotifyConfig,

    /// YouTube search endpoint
    pub youtube: YouTubeConfig,

    /// yt-dlp/ffmpeg pipeline
    pub transcoder: TranscoderConfig,

    /// Startup update check
    pub updates: UpdateConfig,
}

/// Shared HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent sent to Spotify and YouTube
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            // A browser UA; both sites serve stripped pages to unknown clients
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
        }
    }
}

/// Spotify preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    /// Base URL hosting the `/embed/<kind>/<id>` pages
    pub base_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.spotify.com".to_string(),
        }
    }
}

/// YouTube search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Base URL hosting `/youtubei/v1/search`
    pub base_url: String,

    /// InnerTube WEB client version
    pub client_version: String,

    /// Interface language. Abbreviated view counts ("1.2K") are only
    /// parsed in English; other languages fall back to digit-only counts.
    pub hl: String,

    /// Region
    pub gl: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            client_version: "2.20250101.00.00".to_string(),
            hl: "en".to_string(),
            gl: "US".to_string(),
        }
    }
}

/// Transcoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// yt-dlp executable (name on PATH or full path)
    pub yt_dlp_path: PathBuf,

    /// ffmpeg executable (name on PATH or full path)
    pub ffmpeg_path: PathBuf,

    /// Options the CLI passes to every stream (command-line `--opt` wins)
    pub options: StreamOptions,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            options: StreamOptions::default(),
        }
    }
}

/// Update check settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Check for a newer release at startup
    pub check: bool,

    /// Release metadata endpoint (GitHub "latest release" JSON)
    pub release_url: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check: true,
            release_url: "https://api.github.com/repos/spotstream/spotstream/releases/latest"
                .to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spotstream"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults.
///
/// A missing file is normal; an unreadable or invalid one is logged.
pub fn load_from(path: &Path) -> Config {
    match read_config(path) {
        Ok(Some(config)) => {
            tracing::debug!("Loaded config from {:?}", path);
            config
        }
        Ok(None) => {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Config::default()
        }
        Err(e) => {
            tracing::error!("{}; using default configuration", e);
            Config::default()
        }
    }
}

/// Read and parse a config file; `Ok(None)` if it doesn't exist.
pub fn read_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::Read(path.to_path_buf(), e)),
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file, creating its directory.
///
/// The file is replaced in one step: readers see the old or the new
/// contents, never a partial write.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::Write(dir.to_path_buf(), e))?;
    }

    let staged = path.with_extension("toml.tmp");
    std::fs::write(&staged, contents)
        .and_then(|()| std::fs::rename(&staged, path))
        .map_err(|e| {
            let _ = std::fs::remove_file(&staged);
            ConfigError::Write(path.to_path_buf(), e)
        })?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {0:?}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid config {0:?}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config {0:?}: {1}")]
    Write(PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
