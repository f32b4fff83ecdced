//! Video reference parsing and validation.
//!
//! A [`VideoReference`] can only be constructed from input that is
//! syntactically valid, so downstream components never see malformed
//! references.

use crate::error::{Result, TldwError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Hosts recognized as YouTube frontends.
const RECOGNIZED_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtu.be",
];

fn video_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Matches various YouTube URL formats and bare video IDs
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.|music\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// A syntactically validated reference to a video.
///
/// Immutable once constructed. Holds the raw input and the extracted
/// 11-character video ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    raw: String,
    video_id: String,
}

impl VideoReference {
    /// Parse and validate a video reference.
    ///
    /// Accepts full YouTube URLs on recognized hosts (watch, shorts, embed,
    /// youtu.be short links) and bare 11-character video IDs.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(TldwError::InvalidInput(
                "Video reference is empty".to_string(),
            ));
        }

        // URLs must be well-formed and on a recognized host before the ID
        // pattern is even consulted.
        if trimmed.contains("://") {
            let parsed = Url::parse(trimmed).map_err(|e| {
                TldwError::InvalidInput(format!("Malformed URL '{}': {}", trimmed, e))
            })?;
            let host = parsed.host_str().unwrap_or_default();
            if !RECOGNIZED_HOSTS.contains(&host) {
                return Err(TldwError::InvalidInput(format!(
                    "Unrecognized video host: {}",
                    host
                )));
            }
        }

        let video_id = extract_video_id(trimmed).ok_or_else(|| {
            TldwError::InvalidInput(format!("Could not extract a video ID from '{}'", trimmed))
        })?;

        Ok(Self {
            raw: trimmed.to_string(),
            video_id,
        })
    }

    /// Check whether input would parse as a valid reference.
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// The raw input this reference was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The extracted 11-character video ID.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Canonical watch URL for this reference.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.video_id)
    }
}

/// Extract a video ID from a URL or bare ID.
fn extract_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input)?;

    // Try group 1 (URL format) then group 2 (bare ID)
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch_url() {
        let r = VideoReference::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(r.video_id(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_short_link() {
        let r = VideoReference::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(r.video_id(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_bare_id() {
        let r = VideoReference::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(r.video_id(), "dQw4w9WgXcQ");
        assert_eq!(
            r.watch_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_rejects_unrecognized_host() {
        assert!(VideoReference::parse("https://vimeo.com/12345678901").is_err());
        assert!(!VideoReference::is_valid("https://example.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(VideoReference::parse("").is_err());
        assert!(VideoReference::parse("   ").is_err());
        assert!(VideoReference::parse("not a video").is_err());
        assert!(VideoReference::parse("short").is_err());
    }

    #[test]
    fn test_is_valid_mirrors_parse() {
        assert!(VideoReference::is_valid("dQw4w9WgXcQ"));
        assert!(!VideoReference::is_valid("nope"));
    }
}
