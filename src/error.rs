//! Error types for tldw.

use thiserror::Error;

/// Library-level error type for tldw operations.
#[derive(Error, Debug)]
pub enum TldwError {
    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Caption retrieval failed: {0}")]
    Captions(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for tldw operations.
pub type Result<T> = std::result::Result<T, TldwError>;
