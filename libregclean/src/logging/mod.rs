//! Injected logging capability.
//!
//! Components receive an `Arc<dyn Logger>` at construction instead of
//! reaching for a process-wide logger. The CLI wires in [`TracingLogger`];
//! tests use [`MemoryLogger`] to assert on what was reported, or
//! [`NullLogger`] to stay quiet.

use std::sync::{Arc, Mutex};

#[cfg(test)]
mod tests;

/// Sink for the log lines emitted by the client, evaluator and cleaner.
pub trait Logger: Send + Sync {
    /// Routine progress (a tag was deleted, an image was evaluated)
    fn info(&self, message: &str);

    /// A unit of work was skipped but the run continues
    fn warn(&self, message: &str);

    /// An operation failed
    fn error(&self, message: &str);
}

/// Forwards every line to the `tracing` macros under the `regclean` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "regclean", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "regclean", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "regclean", "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Severity of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Keeps every line in memory so tests can inspect it.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything logged so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Returns the messages logged at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

/// Shorthand for the default logger used when none is supplied.
pub fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}
