//! Spotify preview integration
//!
//! Fetches title, artist, link and artwork for a Spotify link from the public
//! embed page. No API key required.

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_preview;
pub use client::SpotifyPreviewClient;
