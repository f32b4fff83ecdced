//! Command implementations for the tldw CLI.

mod doctor;
mod serve;
mod summarize;

pub use doctor::run_doctor;
pub use serve::run_serve;
pub use summarize::run_summarize;
