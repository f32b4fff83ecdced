//! Generative summarization via a local llama.cpp binary.
//!
//! Each generation call spawns a fresh inference process against the shared
//! model artifact, so no two concurrent requests share mutable inference
//! state. The child is spawned with `kill_on_drop`, which tears it down on
//! every exit path, including cancellation of the calling future.

use super::model::ModelHandle;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Stop sequences preventing the model from echoing role markers or
/// restating the transcript.
pub const STOP_SEQUENCES: &[&str] = &[
    "User:",
    "Transcription:",
    "[INST]",
    "System:",
    "Assistant:",
    "Video:",
];

/// Trait for text generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue one generation call.
    ///
    /// Must honor cancellation promptly: dropping the returned future must
    /// release any per-call resources.
    async fn generate(&self, prompt: &str, max_tokens: u32, stop: &[&str]) -> Result<String>;
}

/// Generator shelling out to a llama.cpp CLI binary.
pub struct LlamaCliGenerator {
    binary: String,
    model: ModelHandle,
}

impl LlamaCliGenerator {
    pub fn new(binary: impl Into<String>, model: ModelHandle) -> Self {
        Self {
            binary: binary.into(),
            model,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LlamaCliGenerator {
    #[instrument(skip(self, prompt, stop), fields(model = %self.model.file_name()))]
    async fn generate(&self, prompt: &str, max_tokens: u32, stop: &[&str]) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-m")
            .arg(self.model.path())
            .arg("-n")
            .arg(max_tokens.to_string())
            .arg("-p")
            .arg(prompt)
            .arg("--no-display-prompt")
            .arg("--simple-io");

        for sequence in stop {
            command.arg("-r").arg(sequence);
        }

        debug!("Spawning inference process");

        // kill_on_drop is the per-request inference context teardown: if the
        // caller is cancelled mid-generation, the child does not linger.
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TldwError::ToolNotFound(self.binary.clone())
                } else {
                    TldwError::Generation(format!("Failed to spawn {}: {}", self.binary, e))
                }
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| TldwError::Generation(format!("Inference process failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Inference process exited with {}", output.status);
            return Err(TldwError::Generation(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        Ok(clean_generation(&raw, stop))
    }
}

/// Strip stop sequences and surrounding whitespace from raw model output.
///
/// The output is cut at the first occurrence of any stop sequence, since
/// everything after it is the model drifting into role-play.
pub fn clean_generation(raw: &str, stop: &[&str]) -> String {
    let mut cut = raw.len();
    for sequence in stop {
        if let Some(index) = raw.find(sequence) {
            cut = cut.min(index);
        }
    }
    raw[..cut].trim().to_string()
}
