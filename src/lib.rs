//! tldw - Too Long; Didn't Watch
//!
//! A local-first tool for summarizing YouTube videos from their caption
//! tracks, with an optional local language model and a guaranteed
//! extractive fallback.
//!
//! # Overview
//!
//! tldw allows you to:
//! - Summarize a video from its captions in one command
//! - Run a small HTTP API exposing the same pipeline
//! - Use a local GGUF model when one is available, degrading gracefully to
//!   positional sentence extraction when it is not
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video_ref` - Video reference parsing and validation
//! - `transcript` - Caption retrieval abstraction
//! - `summarizer` - Prompting, model bootstrap, and the fallback chain
//! - `orchestrator` - Request sequencing, status classification, deadlines
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::Settings;
//! use tldw::orchestrator::SummarizationOrchestrator;
//! use tldw::video_ref::VideoReference;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = SummarizationOrchestrator::new(&settings);
//!
//!     let reference = VideoReference::parse("dQw4w9WgXcQ")?;
//!     let result = orchestrator.summarize(&reference).await;
//!     println!("[{:?}] {}", result.status, result.text);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod summarizer;
pub mod transcript;
pub mod video_ref;

pub use error::{Result, TldwError};
