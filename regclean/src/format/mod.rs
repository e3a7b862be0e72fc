use chrono::{DateTime, Utc};
use chrono_humanize::HumanTime;
use libregclean::cleaner::{CleanupReport, DeletedTag, FailedDeletion, SkippedRepository};
use libregclean::config::Config;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

/// Trait for output formatting that can be TTY-aware or plain text
pub trait OutputFormatter: Send + Sync {
    /// Print a success message
    fn success(&self, message: &str);

    /// Print an error message
    fn error(&self, message: &str);

    /// Print a warning message
    fn warning(&self, message: &str);

    /// Print an unadorned line
    fn plain(&self, message: &str);

    /// Print a section heading
    fn heading(&self, message: &str);
}

/// TTY-aware formatter with colors
pub struct TtyFormatter;

impl OutputFormatter for TtyFormatter {
    fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message);
    }

    fn plain(&self, message: &str) {
        println!("{}", message);
    }

    fn heading(&self, message: &str) {
        println!("{}", message.bold());
    }
}

/// Plain text formatter for non-TTY output (piped, scripted)
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn warning(&self, message: &str) {
        println!("⚠ {}", message);
    }

    fn plain(&self, message: &str) {
        println!("{}", message);
    }

    fn heading(&self, message: &str) {
        println!("{}", message);
    }
}

/// Color preference from `--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<&str> for ColorChoice {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Check if colors should be used for the given choice
pub fn should_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var("NO_COLOR").is_err()
                && (std::io::stdout().is_terminal() || std::io::stderr().is_terminal())
        }
    }
}

/// Create the appropriate formatter based on the color choice and TTY
pub fn create_formatter(choice: ColorChoice) -> Box<dyn OutputFormatter> {
    if should_color(choice) {
        Box::new(TtyFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// JSON format
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Pretty,
        }
    }
}

/// Serialize any item as pretty JSON
pub fn to_json<T: Serialize>(item: &T) -> Result<String, String> {
    serde_json::to_string_pretty(item).map_err(|e| format!("Failed to serialize to JSON: {}", e))
}

/// One line for a deleted (or, in dry-run, would-be-deleted) tag
pub fn describe_deleted(tag: &DeletedTag, now: DateTime<Utc>) -> String {
    format!(
        "{}:{} ({}, created {}) status {}",
        tag.image,
        tag.tag,
        tag.digest,
        HumanTime::from(tag.created - now),
        tag.status
    )
}

/// One line for a deletion that did not go through
pub fn describe_failed(failure: &FailedDeletion) -> String {
    match failure.status {
        Some(status) => format!(
            "{}:{} ({}) status {}: {}",
            failure.image, failure.tag, failure.digest, status, failure.reason
        ),
        None => format!(
            "{}:{} ({}): {}",
            failure.image, failure.tag, failure.digest, failure.reason
        ),
    }
}

/// One line for a repository that could not be evaluated
pub fn describe_skipped(skipped: &SkippedRepository) -> String {
    format!("{}: {}", skipped.image, skipped.reason)
}

/// Closing summary line of a cleanup run
pub fn summary_line(report: &CleanupReport) -> String {
    let verb = if report.dry_run {
        "would delete"
    } else {
        "deleted"
    };
    format!(
        "{} images evaluated, {} {} tags, {} failed, {} repositories skipped",
        report.images_evaluated,
        verb,
        report.deleted.len(),
        report.failed.len(),
        report.skipped.len()
    )
}

/// Print a cleanup report in pretty form
pub fn print_report(out: &dyn OutputFormatter, report: &CleanupReport, now: DateTime<Utc>) {
    if report.dry_run {
        out.heading("Dry run: no tags were deleted");
    }
    for tag in &report.deleted {
        out.success(&describe_deleted(tag, now));
    }
    for failure in &report.failed {
        out.error(&describe_failed(failure));
    }
    for skipped in &report.skipped {
        out.warning(&describe_skipped(skipped));
    }

    let summary = summary_line(report);
    if report.is_success() {
        out.plain(&summary);
    } else {
        out.error(&summary);
    }
}

/// Resolved configuration with the password masked, as `key = value` lines
pub fn config_lines(config: &Config) -> Vec<String> {
    let registry = &config.registry;
    let mut lines = vec![
        format!("registry.host = {}", registry.host),
        format!("registry.port = {}", registry.port),
        format!(
            "registry.username = {}",
            registry.username.as_deref().unwrap_or("~")
        ),
        format!(
            "registry.password = {}",
            if registry.password.is_some() {
                "********"
            } else {
                "~"
            }
        ),
        format!("registry.dry_run = {}", registry.dry_run),
        format!("registry.timeout = {}", registry.timeout),
    ];
    if let Some(rule) = &config.policy.older_than_given_date {
        lines.push(format!("policy.older_than_given_date.date = {}", rule.date));
    }
    if let Some(rule) = &config.policy.keep_last {
        lines.push(format!("policy.keep_last.count = {}", rule.count));
    }
    lines
}

/// Copy of the configuration that is safe to print
pub fn redacted(config: &Config) -> Config {
    let mut copy = config.clone();
    if copy.registry.password.is_some() {
        copy.registry.password = Some("********".to_string());
    }
    copy
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
