//! Configuration management for tldw.

mod settings;

pub use settings::{GeneralSettings, ServerSettings, Settings, SummarizerSettings};
