//! YouTube video search integration
//!
//! Finds the best matching video for a free-text query. No API key required.

pub mod dto;
mod adapter;
mod client;

pub use adapter::first_video;
pub use client::{SearchLocale, YouTubeSearchClient};
