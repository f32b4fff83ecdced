//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::summarizer::discover_model;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("tldw Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    checks.push(check_tool(
        "yt-dlp",
        "Install with: pip install yt-dlp (or your package manager)",
    ));
    checks.push(check_tool(
        &settings.summarizer.llama_binary,
        "Install llama.cpp and ensure its CLI binary is in your PATH",
    ));
    for check in &checks {
        check.print();
    }

    println!();
    println!("{}", style("Model").bold());
    let model_check = check_model(settings);
    model_check.print();
    checks.push(model_check);

    println!();
    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();
    let warnings = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warning)
        .count();

    if errors > 0 {
        Output::error(&format!("{} check(s) failed.", errors));
    } else if warnings > 0 {
        Output::warning(&format!(
            "{} warning(s); summarization will run in degraded mode.",
            warnings
        ));
    } else {
        Output::success("All checks passed.");
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("unknown version");
            CheckResult::ok(name, first_line.trim())
        }
        Ok(_) => CheckResult::warning(name, "found but returned an error", hint),
        Err(_) => CheckResult::error(name, "not found in PATH", hint),
    }
}

/// Check model directory and artifact.
fn check_model(settings: &Settings) -> CheckResult {
    let dir = settings.model_dir();

    if !dir.is_dir() {
        return CheckResult::warning(
            "model directory",
            &format!("{} does not exist", dir.display()),
            "Create it and place a .gguf model inside to enable the generative tier",
        );
    }

    match discover_model(&dir) {
        Some(model) => CheckResult::ok(
            "model artifact",
            &format!(
                "{} ({} MB)",
                model.file_name(),
                model.size_bytes() / (1024 * 1024)
            ),
        ),
        None => CheckResult::warning(
            "model artifact",
            &format!("no usable .gguf file in {}", dir.display()),
            "Summaries will use extractive fallback until a model is installed",
        ),
    }
}
