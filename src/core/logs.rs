//! Bounded activity log shown in the terminal panel.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeZone};

/// Number of entries kept before the oldest are evicted.
pub const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// FIFO ring of log entries: newest at the back, oldest dropped first.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, level: LogLevel) {
        self.entries.push_back(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

/// `HH:MM:SS`, as shown beside log entries and messages.
pub fn format_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_is_zero_padded() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(format_time(&at), "07:05:03");
    }

    #[test]
    fn test_push_keeps_order() {
        let mut logs = LogBuffer::new();
        logs.push("first", LogLevel::Info);
        logs.push("second", LogLevel::Error);
        let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(logs.last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_never_exceeds_capacity_and_evicts_oldest() {
        let mut logs = LogBuffer::new();
        for i in 0..250 {
            logs.push(format!("entry {i}"), LogLevel::Info);
            assert!(logs.len() <= LOG_CAPACITY);
        }
        assert_eq!(logs.len(), LOG_CAPACITY);
        assert_eq!(logs.iter().next().unwrap().message, "entry 150");
        assert_eq!(logs.last().unwrap().message, "entry 249");
    }

    #[test]
    fn test_exactly_at_capacity_evicts_nothing() {
        let mut logs = LogBuffer::with_capacity(3);
        logs.push("a", LogLevel::Info);
        logs.push("b", LogLevel::Info);
        logs.push("c", LogLevel::Info);
        assert_eq!(logs.iter().next().unwrap().message, "a");
        logs.push("d", LogLevel::Success);
        let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c", "d"]);
    }
}
