//! Summarizer fallback chain.
//!
//! Produces summary text from a transcript, preferring model generation but
//! guaranteeing a result under degraded conditions. Tier selection is
//! deliberately asymmetric: an absent model is expected and routes to the
//! heuristic tier, while a failed generation attempt is exceptional and
//! routes to the minimal fallback tier instead.

mod generative;
mod heuristic;
mod model;
mod prompt;

pub use generative::{clean_generation, LlamaCliGenerator, TextGenerator, STOP_SEQUENCES};
pub use heuristic::{fallback_summary, heuristic_summary, split_sentences, NO_MEANINGFUL_CONTENT};
pub use model::{discover_model, ModelHandle};
pub use prompt::{build_prompt, TRANSCRIPT_CHAR_BUDGET};

use serde::Serialize;
use tracing::{debug, warn};

/// How a summary was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryOrigin {
    /// Generated by the language model.
    Generative,
    /// Positional sentence extraction (no model present).
    Heuristic,
    /// First-sentences safety net after a failed generation attempt.
    Fallback,
}

impl std::fmt::Display for SummaryOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryOrigin::Generative => write!(f, "generative"),
            SummaryOrigin::Heuristic => write!(f, "heuristic"),
            SummaryOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// Summary text tagged with its derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub origin: SummaryOrigin,
}

/// Outcome of running the fallback chain over a non-empty transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// A summary was produced.
    Summarized(Summary),
    /// The transcript contained no sentence-like units.
    NoContent,
}

/// Run the fallback chain: generative when a generator is present, heuristic
/// otherwise, minimal fallback after a failed generation attempt.
///
/// Never fails; every failure inside a tier is recovered locally.
pub async fn summarize_transcript(
    generator: Option<&dyn TextGenerator>,
    transcript: &str,
    max_tokens: u32,
) -> SummaryOutcome {
    let Some(generator) = generator else {
        debug!("No model loaded, using heuristic tier");
        return extract(transcript, SummaryOrigin::Heuristic);
    };

    let prompt = build_prompt(transcript);

    match generator.generate(&prompt, max_tokens, STOP_SEQUENCES).await {
        Ok(text) if !text.trim().is_empty() => SummaryOutcome::Summarized(Summary {
            text: text.trim().to_string(),
            origin: SummaryOrigin::Generative,
        }),
        Ok(_) => {
            warn!("Generation returned empty output, using fallback tier");
            extract(transcript, SummaryOrigin::Fallback)
        }
        Err(e) => {
            // A failed attempt routes to the safety net, not the heuristic
            // tier that an absent model would have used.
            warn!("Generation failed ({}), using fallback tier", e);
            extract(transcript, SummaryOrigin::Fallback)
        }
    }
}

fn extract(transcript: &str, origin: SummaryOrigin) -> SummaryOutcome {
    let text = match origin {
        SummaryOrigin::Heuristic => heuristic_summary(transcript),
        _ => fallback_summary(transcript),
    };

    match text {
        Some(text) => SummaryOutcome::Summarized(Summary { text, origin }),
        None => SummaryOutcome::NoContent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TldwError};
    use async_trait::async_trait;

    struct EchoGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _: &str, _: u32, _: &[&str]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _: &str, _: u32, _: &[&str]) -> Result<String> {
            Err(TldwError::Generation("inference crashed".to_string()))
        }
    }

    const TRANSCRIPT: &str = "s0. s1. s2. s3. s4.";

    #[tokio::test]
    async fn test_generative_tier_wins_when_model_succeeds() {
        let generator = EchoGenerator("  A model-written summary.  ");
        let outcome = summarize_transcript(Some(&generator), TRANSCRIPT, 150).await;

        assert_eq!(
            outcome,
            SummaryOutcome::Summarized(Summary {
                text: "A model-written summary.".to_string(),
                origin: SummaryOrigin::Generative,
            })
        );
    }

    #[tokio::test]
    async fn test_no_model_uses_heuristic_tier() {
        let outcome = summarize_transcript(None, TRANSCRIPT, 150).await;

        assert_eq!(
            outcome,
            SummaryOutcome::Summarized(Summary {
                text: "s0. s2. s4.".to_string(),
                origin: SummaryOrigin::Heuristic,
            })
        );
    }

    #[tokio::test]
    async fn test_failed_generation_uses_fallback_tier_not_heuristic() {
        let outcome = summarize_transcript(Some(&FailingGenerator), TRANSCRIPT, 150).await;

        // First three sentences, not the positional sampling the heuristic
        // tier would have produced for the same input.
        assert_eq!(
            outcome,
            SummaryOutcome::Summarized(Summary {
                text: "s0. s1. s2.".to_string(),
                origin: SummaryOrigin::Fallback,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_generation_output_uses_fallback_tier() {
        let generator = EchoGenerator("   \n");
        let outcome = summarize_transcript(Some(&generator), TRANSCRIPT, 150).await;

        assert_eq!(
            outcome,
            SummaryOutcome::Summarized(Summary {
                text: "s0. s1. s2.".to_string(),
                origin: SummaryOrigin::Fallback,
            })
        );
    }

    #[tokio::test]
    async fn test_no_sentence_units_yields_no_content() {
        assert_eq!(
            summarize_transcript(None, "?!?!", 150).await,
            SummaryOutcome::NoContent
        );
        assert_eq!(
            summarize_transcript(Some(&FailingGenerator), "...", 150).await,
            SummaryOutcome::NoContent
        );
    }
}
