//! Audio stream acquisition via yt-dlp (and optionally ffmpeg)
//!
//! This module shells out to `yt-dlp` to download the audio track of a video
//! to stdout. When the caller asks for re-encoding (seek, encoder args,
//! output format, opus), yt-dlp's output is piped through `ffmpeg`.
//!
//! Install:
//! - Windows: `winget install yt-dlp.yt-dlp Gyan.FFmpeg`
//! - macOS: `brew install yt-dlp ffmpeg`
//! - Linux: `pip install yt-dlp` and `apt install ffmpeg`

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncRead, ReadBuf};
use tokio::process::{Child, Command};

use crate::error::UpstreamError;

/// Default yt-dlp format selector
pub const DEFAULT_FORMAT: &str = "bestaudio/best";

/// Default ffmpeg output format when re-encoding without opus
pub const DEFAULT_PCM_FORMAT: &str = "s16le";

/// Options keys that make the pipeline go through ffmpeg
const FFMPEG_KEYS: &[&str] = &["seek", "encoderArgs", "fmt", "opusEncoded", "bitrate"];

/// Caller-supplied transcoder options.
///
/// The resolver forwards these untouched; only the transcoder reads them.
/// Recognized by [`YtDlpTranscoder`]: `format`, `seek`, `encoderArgs`,
/// `fmt`, `opusEncoded`, `bitrate`. Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamOptions(BTreeMap<String, Value>);

impl StreamOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Entries from `other` override entries in `self`.
    pub fn merged_with(mut self, other: StreamOptions) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl FromIterator<(String, Value)> for StreamOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Live audio byte stream.
///
/// Read it with `tokio::io::AsyncReadExt`. Dropping the stream kills the
/// processes feeding it.
pub struct AudioStream {
    reader: Pin<Box<dyn AsyncRead + Send>>,
    // Held only so kill_on_drop fires when the stream goes away
    _children: Vec<Child>,
}

impl AudioStream {
    /// Wrap any async reader (used by tests and custom transcoders).
    pub fn from_reader(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            reader: Box::pin(reader),
            _children: Vec::new(),
        }
    }

    fn with_children(reader: impl AsyncRead + Send + 'static, children: Vec<Child>) -> Self {
        Self {
            reader: Box::pin(reader),
            _children: children,
        }
    }
}

impl AsyncRead for AudioStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        self.reader.as_mut().poll_read(cx, buf)
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream")
            .field("processes", &self._children.len())
            .finish_non_exhaustive()
    }
}

/// Transcoder backed by the yt-dlp and ffmpeg executables
#[derive(Debug, Clone)]
pub struct YtDlpTranscoder {
    yt_dlp_path: PathBuf,
    ffmpeg_path: PathBuf,
}

impl YtDlpTranscoder {
    /// Use `yt-dlp` and `ffmpeg` from PATH
    pub fn new() -> Self {
        Self::with_paths("yt-dlp", "ffmpeg")
    }

    pub fn with_paths(yt_dlp_path: impl Into<PathBuf>, ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Start downloading `video_url` and return its audio as a stream.
    ///
    /// Fails only if a process cannot be started; download errors later on
    /// show up as an early end of stream.
    pub fn open(&self, video_url: &str, options: &StreamOptions) -> Result<AudioStream, UpstreamError> {
        let mut downloader = Command::new(&self.yt_dlp_path)
            .args(yt_dlp_args(video_url, options))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| UpstreamError::Transcode(format!("Failed to run yt-dlp: {}", e)))?;

        let download = downloader
            .stdout
            .take()
            .ok_or_else(|| UpstreamError::Transcode("yt-dlp stdout unavailable".to_string()))?;

        let Some(args) = ffmpeg_args(options) else {
            tracing::debug!("Streaming {} through yt-dlp", video_url);
            return Ok(AudioStream::with_children(download, vec![downloader]));
        };

        tracing::debug!("Streaming {} through yt-dlp | ffmpeg {:?}", video_url, args);

        let ffmpeg_stdin: Stdio = download
            .try_into()
            .map_err(|e| UpstreamError::Transcode(format!("Failed to pipe yt-dlp output: {}", e)))?;

        let mut encoder = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(ffmpeg_stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| UpstreamError::Transcode(format!("Failed to run ffmpeg: {}", e)))?;

        let encoded = encoder
            .stdout
            .take()
            .ok_or_else(|| UpstreamError::Transcode("ffmpeg stdout unavailable".to_string()))?;

        Ok(AudioStream::with_children(encoded, vec![downloader, encoder]))
    }
}

impl Default for YtDlpTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments for `yt-dlp`, writing the selected format to stdout
fn yt_dlp_args(video_url: &str, options: &StreamOptions) -> Vec<String> {
    let format = options
        .get("format")
        .and_then(value_to_arg)
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

    vec![
        "-f".to_string(),
        format,
        "--no-playlist".to_string(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "-o".to_string(),
        "-".to_string(),
        video_url.to_string(),
    ]
}

/// Arguments for `ffmpeg`, or `None` when no re-encoding was requested
fn ffmpeg_args(options: &StreamOptions) -> Option<Vec<String>> {
    if !FFMPEG_KEYS.iter().any(|key| options.get(key).is_some()) {
        return None;
    }

    let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    if let Some(seek) = options.get("seek").and_then(value_to_arg) {
        args.extend(["-ss".to_string(), seek]);
    }

    args.extend(["-i".to_string(), "pipe:0".to_string()]);

    if let Some(Value::Array(extra)) = options.get("encoderArgs") {
        args.extend(extra.iter().filter_map(value_to_arg));
    }

    if let Some(bitrate) = options.get("bitrate").and_then(value_to_arg) {
        args.extend(["-b:a".to_string(), bitrate]);
    }

    let opus = matches!(options.get("opusEncoded"), Some(Value::Bool(true)));
    if opus {
        args.extend(["-acodec", "libopus", "-f", "opus"].iter().map(|s| s.to_string()));
    } else {
        let fmt = options
            .get("fmt")
            .and_then(value_to_arg)
            .unwrap_or_else(|| DEFAULT_PCM_FORMAT.to_string());
        args.extend(["-f".to_string(), fmt]);
    }

    args.extend(["-ar", "48000", "-ac", "2", "pipe:1"].iter().map(|s| s.to_string()));
    Some(args)
}

/// Render a scalar JSON value as a command-line argument
fn value_to_arg(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
