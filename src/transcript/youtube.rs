//! YouTube caption retrieval via yt-dlp.
//!
//! Probes available caption tracks with `yt-dlp --dump-json` and downloads
//! the selected track's json3 payload over HTTP. Language policy: manually
//! authored English captions first, then auto-generated English, then any
//! available language.

use super::{Transcript, TranscriptSource};
use crate::error::{Result, TldwError};
use crate::video_ref::VideoReference;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Transcript source backed by YouTube caption tracks.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
}

impl YoutubeTranscriptSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Probe caption track metadata using yt-dlp.
    async fn probe_tracks(&self, reference: &VideoReference) -> Result<serde_json::Value> {
        let output = Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                &reference.watch_url(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TldwError::ToolNotFound("yt-dlp".to_string())
                } else {
                    TldwError::VideoSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TldwError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                reference.video_id(),
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| TldwError::VideoSource(format!("Failed to parse yt-dlp output: {}", e)))
    }

    /// Download and flatten a json3 caption payload.
    async fn fetch_track(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TldwError::Captions(format!(
                "Caption download returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        Ok(flatten_json3(&payload))
    }
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self), fields(video_id = %reference.video_id()))]
    async fn fetch(&self, reference: &VideoReference) -> Result<Transcript> {
        let metadata = self.probe_tracks(reference).await?;

        let track_url = match select_track(&metadata) {
            Some((lang, kind, url)) => {
                info!("Selected {} caption track ({})", lang, kind);
                url
            }
            None => {
                debug!("No caption tracks available");
                return Ok(Transcript::empty());
            }
        };

        let text = self.fetch_track(&track_url).await?;

        if text.trim().is_empty() {
            warn!("Caption track was empty after flattening");
            return Ok(Transcript::empty());
        }

        Ok(Transcript::new(text))
    }
}

/// Pick the best caption track from yt-dlp metadata.
///
/// Returns `(language, kind, url)`. Preference order: manual "en", auto "en",
/// any manual track, any auto track (lexically first language for the "any"
/// cases, so selection is deterministic).
fn select_track(metadata: &serde_json::Value) -> Option<(String, &'static str, String)> {
    let manual = metadata.get("subtitles");
    let auto = metadata.get("automatic_captions");

    if let Some(url) = track_url_for_lang(manual, "en") {
        return Some(("en".to_string(), "manual", url));
    }
    if let Some(url) = track_url_for_lang(auto, "en") {
        return Some(("en".to_string(), "auto", url));
    }
    if let Some((lang, url)) = first_track(manual) {
        return Some((lang, "manual", url));
    }
    if let Some((lang, url)) = first_track(auto) {
        return Some((lang, "auto", url));
    }

    None
}

fn track_url_for_lang(tracks: Option<&serde_json::Value>, lang: &str) -> Option<String> {
    let entries = tracks?.get(lang)?.as_array()?;
    pick_format(entries)
}

fn first_track(tracks: Option<&serde_json::Value>) -> Option<(String, String)> {
    let map = tracks?.as_object()?;
    let mut langs: Vec<&String> = map.keys().collect();
    langs.sort();

    for lang in langs {
        if let Some(url) = map
            .get(lang)
            .and_then(|v| v.as_array())
            .and_then(|entries| pick_format(entries))
        {
            return Some((lang.clone(), url));
        }
    }
    None
}

/// Prefer the json3 format entry; fall back to the first entry with a URL.
fn pick_format(entries: &[serde_json::Value]) -> Option<String> {
    entries
        .iter()
        .find(|e| e.get("ext").and_then(|x| x.as_str()) == Some("json3"))
        .or_else(|| entries.first())
        .and_then(|e| e.get("url"))
        .and_then(|u| u.as_str())
        .map(|s| s.to_string())
}

/// Join all caption segments of a json3 payload into one string.
fn flatten_json3(payload: &serde_json::Value) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(events) = payload.get("events").and_then(|e| e.as_array()) {
        for event in events {
            let Some(segs) = event.get("segs").and_then(|s| s.as_array()) else {
                continue;
            };
            let line: String = segs
                .iter()
                .filter_map(|seg| seg.get("utf8").and_then(|u| u.as_str()))
                .collect();
            let line = line.trim();
            if !line.is_empty() {
                parts.push(line.replace('\n', " "));
            }
        }
    }

    parts.join(" ")
}
