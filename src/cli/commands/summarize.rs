//! Summarize command - one-shot video summarization.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{SummarizationOrchestrator, SummaryStatus};
use crate::video_ref::VideoReference;

/// Run a single summarization and print the result.
pub async fn run_summarize(
    input: &str,
    timeout_override: Option<u64>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(seconds) = timeout_override {
        settings.summarizer.timeout_seconds = seconds;
    }

    let reference = VideoReference::parse(input)?;

    let orchestrator = SummarizationOrchestrator::new(&settings);
    if !orchestrator.has_model() {
        Output::info("No model loaded; using extractive summarization.");
    }

    Output::info(&format!("Summarizing video {}...", reference.video_id()));
    let result = orchestrator.summarize(&reference).await;

    println!();
    match result.status {
        SummaryStatus::Success => {
            Output::success("Summary ready.");
            println!();
            println!("{}", result.text);
        }
        SummaryStatus::NoTranscript => {
            Output::warning(&result.text);
        }
        SummaryStatus::Timeout => {
            Output::error(&result.text);
        }
        SummaryStatus::Error => {
            Output::error(&result.text);
            if let Some(detail) = &result.detail {
                Output::kv("Detail", detail);
            }
        }
    }

    println!();
    if let Some(origin) = result.origin {
        Output::kv("Origin", &origin.to_string());
    }
    Output::kv("Request", &result.request_id.to_string());

    Ok(())
}
