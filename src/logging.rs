//! Logger collaborator used by the export, schema and validation operations.
//!
//! Every method has a no-op default, so an implementation only overrides the
//! levels it cares about.

use std::sync::{Arc, Mutex, Once};

use colored::Colorize;

pub const BANNER: &str = "i18n-tag-schema";

pub trait Logger: Send + Sync {
    fn info(&self, _message: &str) {}
    fn trace(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
}

pub type SharedLogger = Arc<dyn Logger>;

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {}

pub fn null_logger() -> SharedLogger {
    Arc::new(NullLogger)
}

/// Colored output on stderr, grouped under the tool banner.
#[derive(Debug)]
pub struct ConsoleLogger {
    verbose: bool,
    banner: Once,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            banner: Once::new(),
        }
    }

    fn print(&self, line: String) {
        self.banner.call_once(|| eprintln!("{}", BANNER.bold()));
        eprintln!("  {}", line);
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        self.print(message.to_string());
    }

    fn trace(&self, message: &str) {
        if self.verbose {
            self.print(message.dimmed().to_string());
        }
    }

    fn warn(&self, message: &str) {
        self.print(format!("{} {}", "warning:".bold().yellow(), message));
    }

    fn error(&self, message: &str) {
        self.print(format!("{} {}", "error:".bold().red(), message));
    }

    fn success(&self, message: &str) {
        self.print(format!("{} {}", "\u{2713}".green(), message.green()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Trace,
    Warn,
    Error,
    Success,
}

/// Keeps messages in memory, in the order they were logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| {
                messages
                    .iter()
                    .filter(|(l, _)| *l == level)
                    .map(|(_, m)| m.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn all(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn trace(&self, message: &str) {
        self.push(Level::Trace, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }
}
