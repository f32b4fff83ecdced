//! Configuration settings for tldw.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub summarizer: SummarizerSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for the summarization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Directory scanned once at startup for a .gguf model artifact.
    pub model_dir: String,
    /// llama.cpp CLI binary used for generation.
    pub llama_binary: String,
    /// Token cap for one generation call.
    pub max_tokens: u32,
    /// End-to-end deadline for one summarization request, in seconds.
    pub timeout_seconds: u64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            model_dir: "~/.tldw/models".to_string(),
            llama_binary: "llama-cli".to_string(),
            max_tokens: 150,
            timeout_seconds: 60,
        }
    }
}

/// HTTP gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Origins allowed by CORS; empty list allows any origin.
    pub allowed_origins: Vec<String>,
    /// Include underlying failure messages in error responses.
    ///
    /// Only enable for trusted/debug deployments.
    pub expose_error_details: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            expose_error_details: false,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Missing file falls back to defaults.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tldw")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded models directory path.
    pub fn model_dir(&self) -> PathBuf {
        Self::expand_path(&self.summarizer.model_dir)
    }

    /// Get the request deadline as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.summarizer.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.summarizer.max_tokens, 150);
        assert_eq!(settings.request_timeout(), Duration::from_secs(60));
        assert!(!settings.server.expose_error_details);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [summarizer]
            timeout_seconds = 10
        "#,
        )
        .unwrap();

        assert_eq!(settings.summarizer.timeout_seconds, 10);
        assert_eq!(settings.summarizer.llama_binary, "llama-cli");
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = PathBuf::from("/nonexistent/tldw/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.summarizer.max_tokens, 150);
    }
}
