//! Summarization prompt construction.
//!
//! `build_prompt` is pure: no I/O, no randomness. The transcript is
//! truncated to a fixed character budget before prompt assembly so the
//! prompt always fits the model context.

/// Character budget for the transcript portion of the prompt.
///
/// Leaves room for the instructions and the response inside the model
/// context window.
pub const TRANSCRIPT_CHAR_BUDGET: usize = 1500;

/// Marker appended when the transcript was truncated.
const TRUNCATION_MARKER: &str = "...";

const PROMPT_PREFIX: &str = "Here is the transcription of a YouTube video:\n\n";

const PROMPT_SUFFIX: &str = ". Provide a concise 2-3 sentence summary of the video. \
    Example output: 'This video covers the origins and development of the internet.'";

/// Build the generation prompt for a transcript.
pub fn build_prompt(transcript: &str) -> String {
    format!(
        "{}{}{}",
        PROMPT_PREFIX,
        truncate_transcript(transcript),
        PROMPT_SUFFIX
    )
}

/// Truncate to the character budget without splitting a scalar value.
fn truncate_transcript(transcript: &str) -> String {
    if transcript.chars().count() <= TRANSCRIPT_CHAR_BUDGET {
        return transcript.to_string();
    }

    let truncated: String = transcript.chars().take(TRANSCRIPT_CHAR_BUDGET).collect();
    format!("{}{}", truncated, TRUNCATION_MARKER)
}
