//! Transcript retrieval abstraction.
//!
//! Provides a trait-based interface for caption sources, with a YouTube
//! implementation backed by yt-dlp.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use crate::video_ref::VideoReference;
use async_trait::async_trait;

/// Caption text for a single video, joined into one string.
///
/// Owned by the orchestrator for the duration of one request; never cached
/// or persisted.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// An empty transcript, meaning no captions were available.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no caption text was retrieved.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the best-available caption text for a video.
    ///
    /// Returns an empty transcript when the video has no caption tracks.
    async fn fetch(&self, reference: &VideoReference) -> Result<Transcript>;
}
