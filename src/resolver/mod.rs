//! Track resolution - turns a Spotify track link into metadata or audio.
//!
//! # Architecture
//!
//! Same layering for each external service:
//! - **Domain models** (`domain.rs`) - our types, independent of any API
//! - **API DTOs** (`spotify/dto.rs`, `youtube/dto.rs`) - exact payload shapes
//! - **Adapters** - convert DTOs to domain models
//! - **Clients** - HTTP clients for the preview and search endpoints
//! - **Transcode** - yt-dlp/ffmpeg subprocess pipeline
//! - **Traits** - seams for injecting collaborators (and mocks)
//! - **Service** - the resolve/stream pipeline itself
//!
//! # Usage
//!
//! ```ignore
//! use spotstream::resolver::DefaultResolver;
//!
//! let resolver = DefaultResolver::default();
//! let meta = resolver
//!     .resolve_track_info("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC")
//!     .await?;
//! println!("{} - {}", meta.artist(), meta.title());
//! ```

pub mod domain;
pub mod service;
pub mod spotify;
pub mod traits;
pub mod transcode;
pub mod youtube;

pub use domain::{PreviewKind, TrackMetadata, TrackPreview, VideoCandidate};
pub use service::{DefaultResolver, Resolver};
pub use traits::{MetadataApi, TranscoderApi, VideoSearchApi};
pub use transcode::{AudioStream, StreamOptions, YtDlpTranscoder};
