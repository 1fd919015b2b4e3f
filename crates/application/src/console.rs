//! In-memory console buffer

use std::collections::VecDeque;

use courier_domain::{LogEntry, LogLevel};

/// Default number of entries kept before the oldest are dropped.
pub const DEFAULT_CONSOLE_CAPACITY: usize = 500;

/// A bounded, append-only log of console entries.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CONSOLE_CAPACITY)
    }
}

impl ConsoleLog {
    /// Creates a log keeping at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CONSOLE_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Appends an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Appends an entry built from its parts.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>, source: impl Into<String>) {
        self.push(LogEntry::new(level, message, source));
    }

    /// Appends an info entry.
    pub fn info(&mut self, message: impl Into<String>, source: impl Into<String>) {
        self.log(LogLevel::Info, message, source);
    }

    /// Appends a warning entry.
    pub fn warn(&mut self, message: impl Into<String>, source: impl Into<String>) {
        self.log(LogLevel::Warn, message, source);
    }

    /// Appends an error entry.
    pub fn error(&mut self, message: impl Into<String>, source: impl Into<String>) {
        self.log(LogLevel::Error, message, source);
    }

    /// Returns the entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
