//! Summarization orchestrator for tldw.
//!
//! Sequences transcript retrieval and the summarizer fallback chain for one
//! request, classifies every outcome into a status, and bounds end-to-end
//! latency with a deadline. The public contract never fails: every request
//! yields a [`SummaryResult`] carrying a correlation id.

use crate::config::Settings;
use crate::error::TldwError;
use crate::summarizer::{
    discover_model, summarize_transcript, LlamaCliGenerator, SummaryOrigin, SummaryOutcome,
    TextGenerator, NO_MEANINGFUL_CONTENT,
};
use crate::transcript::{TranscriptSource, YoutubeTranscriptSource};
use crate::video_ref::VideoReference;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Fixed notice returned when a video has no captions.
pub const NO_TRANSCRIPT_NOTICE: &str = "No transcription available for this video.";

/// Fixed notice returned when the deadline fires before completion.
pub const TIMEOUT_NOTICE: &str = "Summarization did not complete within the time budget.";

/// Generic failure text; the underlying message travels in `detail`.
const GENERIC_FAILURE: &str = "Failed to summarize video.";

/// Classification of a completed summarization request.
///
/// Total and mutually exclusive: every request maps to exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Success,
    NoTranscript,
    Timeout,
    Error,
}

/// Result of one summarization request.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// Summary text, or a fixed notice on non-success paths.
    pub text: String,
    pub status: SummaryStatus,
    /// How the text was derived; `None` on non-success paths.
    pub origin: Option<SummaryOrigin>,
    /// Correlation id, generated once per request.
    pub request_id: Uuid,
    /// Underlying failure message. Exposure to callers is the gateway's
    /// trusted/debug policy decision, not the core's.
    pub detail: Option<String>,
}

impl SummaryResult {
    fn new(request_id: Uuid, status: SummaryStatus, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status,
            origin: None,
            request_id,
            detail: None,
        }
    }
}

/// Coordinates transcript retrieval and summary generation for one request
/// at a time, with no shared mutable state across requests.
pub struct SummarizationOrchestrator {
    transcript_source: Arc<dyn TranscriptSource>,
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    max_tokens: u32,
}

impl SummarizationOrchestrator {
    /// Create an orchestrator with production components.
    ///
    /// Model discovery runs exactly once, here; a missing or invalid model
    /// artifact disables the generative tier for the process lifetime.
    pub fn new(settings: &Settings) -> Self {
        let generator: Option<Arc<dyn TextGenerator>> = discover_model(&settings.model_dir())
            .map(|model| {
                info!("Generative tier enabled with model {}", model.file_name());
                Arc::new(LlamaCliGenerator::new(
                    settings.summarizer.llama_binary.clone(),
                    model,
                )) as Arc<dyn TextGenerator>
            });

        if generator.is_none() {
            info!("Generative tier disabled, heuristic summarization only");
        }

        Self {
            transcript_source: Arc::new(YoutubeTranscriptSource::new()),
            generator,
            timeout: settings.request_timeout(),
            max_tokens: settings.summarizer.max_tokens,
        }
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        transcript_source: Arc<dyn TranscriptSource>,
        generator: Option<Arc<dyn TextGenerator>>,
        timeout: Duration,
        max_tokens: u32,
    ) -> Self {
        Self {
            transcript_source,
            generator,
            timeout,
            max_tokens,
        }
    }

    /// Whether the generative tier is available.
    pub fn has_model(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize one video. Never fails; every outcome is a [`SummaryResult`].
    ///
    /// The whole pipeline runs under the configured deadline. Dropping the
    /// returned future cancels the request: in-flight caption downloads and
    /// inference processes are torn down with it.
    pub async fn summarize(&self, reference: &VideoReference) -> SummaryResult {
        let request_id = Uuid::new_v4();

        match tokio::time::timeout(self.timeout, self.run(reference, request_id)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%request_id, video_id = %reference.video_id(), "Request deadline expired");
                SummaryResult::new(request_id, SummaryStatus::Timeout, TIMEOUT_NOTICE)
            }
        }
    }

    #[instrument(skip(self, reference), fields(%request_id, video_id = %reference.video_id()))]
    async fn run(&self, reference: &VideoReference, request_id: Uuid) -> SummaryResult {
        info!("Starting video summarization");

        let transcript = match self.transcript_source.fetch(reference).await {
            Ok(transcript) => transcript,
            // Transport and not-found failures from the caption layer are
            // control-flow-equivalent to "no captions", logged distinctly.
            Err(
                e @ (TldwError::Captions(_) | TldwError::VideoNotFound(_) | TldwError::Http(_)),
            ) => {
                warn!("Transcript retrieval failed: {}", e);
                return SummaryResult::new(
                    request_id,
                    SummaryStatus::NoTranscript,
                    NO_TRANSCRIPT_NOTICE,
                );
            }
            Err(e) => {
                error!("Transcript source error: {}", e);
                let mut result =
                    SummaryResult::new(request_id, SummaryStatus::Error, GENERIC_FAILURE);
                result.detail = Some(e.to_string());
                return result;
            }
        };

        if transcript.is_empty() {
            info!("No captions available");
            return SummaryResult::new(
                request_id,
                SummaryStatus::NoTranscript,
                NO_TRANSCRIPT_NOTICE,
            );
        }

        info!("Retrieved transcript of {} characters", transcript.len());

        let outcome = summarize_transcript(
            self.generator.as_deref(),
            transcript.text(),
            self.max_tokens,
        )
        .await;

        match outcome {
            SummaryOutcome::Summarized(summary) => {
                info!("Generated {} summary", summary.origin);
                SummaryResult {
                    text: summary.text,
                    status: SummaryStatus::Success,
                    origin: Some(summary.origin),
                    request_id,
                    detail: None,
                }
            }
            SummaryOutcome::NoContent => {
                warn!("Transcript yielded no sentence-like units");
                SummaryResult::new(request_id, SummaryStatus::Error, NO_MEANINGFUL_CONTENT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::summarizer::Summary;
    use crate::transcript::Transcript;
    use async_trait::async_trait;
    use std::time::Instant;

    struct StaticSource(&'static str);

    #[async_trait]
    impl TranscriptSource for StaticSource {
        async fn fetch(&self, _: &VideoReference) -> Result<Transcript> {
            Ok(Transcript::new(self.0.to_string()))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TranscriptSource for FailingSource {
        async fn fetch(&self, _: &VideoReference) -> Result<Transcript> {
            Err(TldwError::VideoNotFound("gone".to_string()))
        }
    }

    struct SlowSource;

    #[async_trait]
    impl TranscriptSource for SlowSource {
        async fn fetch(&self, _: &VideoReference) -> Result<Transcript> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Transcript::new("Too late.".to_string()))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _: &str, _: u32, _: &[&str]) -> Result<String> {
            Err(TldwError::Generation("boom".to_string()))
        }
    }

    fn orchestrator(
        source: Arc<dyn TranscriptSource>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> SummarizationOrchestrator {
        SummarizationOrchestrator::with_components(
            source,
            generator,
            Duration::from_secs(5),
            150,
        )
    }

    fn reference() -> VideoReference {
        VideoReference::parse("dQw4w9WgXcQ").unwrap()
    }

    #[tokio::test]
    async fn test_empty_transcript_short_circuits_to_no_transcript() {
        let o = orchestrator(Arc::new(StaticSource("")), None);
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::NoTranscript);
        assert_eq!(result.text, NO_TRANSCRIPT_NOTICE);
        assert_eq!(result.origin, None);
    }

    #[tokio::test]
    async fn test_caption_failure_maps_to_no_transcript() {
        let o = orchestrator(Arc::new(FailingSource), None);
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::NoTranscript);
        assert_eq!(result.text, NO_TRANSCRIPT_NOTICE);
    }

    #[tokio::test]
    async fn test_heuristic_success_without_model() {
        let o = orchestrator(
            Arc::new(StaticSource(
                "Cats are mammals. They sleep a lot. They are popular pets.",
            )),
            None,
        );
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::Success);
        assert_eq!(result.origin, Some(SummaryOrigin::Heuristic));
        assert_eq!(
            result.text,
            "Cats are mammals. They sleep a lot. They are popular pets."
        );
    }

    #[tokio::test]
    async fn test_generation_failure_recovers_via_fallback_tier() {
        let o = orchestrator(
            Arc::new(StaticSource("s0. s1. s2. s3. s4.")),
            Some(Arc::new(FailingGenerator)),
        );
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::Success);
        assert_eq!(result.origin, Some(SummaryOrigin::Fallback));
        assert_eq!(result.text, "s0. s1. s2.");
    }

    #[tokio::test]
    async fn test_unmeaningful_transcript_is_not_success() {
        let o = orchestrator(Arc::new(StaticSource("?!?! ...")), None);
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::Error);
        assert_eq!(result.text, NO_MEANINGFUL_CONTENT);
    }

    #[tokio::test]
    async fn test_deadline_expiry_returns_timeout_promptly() {
        let o = SummarizationOrchestrator::with_components(
            Arc::new(SlowSource),
            None,
            Duration::from_millis(50),
            150,
        );

        let started = Instant::now();
        let result = o.summarize(&reference()).await;

        assert_eq!(result.status, SummaryStatus::Timeout);
        assert_eq!(result.text, TIMEOUT_NOTICE);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_every_path_carries_a_request_id() {
        let ok = orchestrator(Arc::new(StaticSource("One sentence.")), None)
            .summarize(&reference())
            .await;
        let missing = orchestrator(Arc::new(FailingSource), None)
            .summarize(&reference())
            .await;

        assert_ne!(ok.request_id, missing.request_id);
        assert!(!ok.request_id.is_nil());
        assert!(!missing.request_id.is_nil());
    }

    #[tokio::test]
    async fn test_requests_get_distinct_ids() {
        let o = orchestrator(Arc::new(StaticSource("One sentence.")), None);
        let a = o.summarize(&reference()).await;
        let b = o.summarize(&reference()).await;
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_summary_origin_display() {
        let summary = Summary {
            text: "t".to_string(),
            origin: SummaryOrigin::Heuristic,
        };
        assert_eq!(summary.origin.to_string(), "heuristic");
    }
}
