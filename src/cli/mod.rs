//! CLI module for tldw.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tldw - Too Long; Didn't Watch
///
/// A local-first tool for summarizing YouTube videos from their caption
/// tracks, with an optional local language model.
#[derive(Parser, Debug)]
#[command(name = "tldw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a single video
    Summarize {
        /// YouTube URL or video ID
        input: String,

        /// Override the request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}
