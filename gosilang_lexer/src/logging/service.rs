//! Logger backends and the level-filtering service in front of them

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Filters by level before handing events to a [`Logger`]
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Backend and level from the installed logging preferences
    pub fn from_preferences() -> Self {
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };
        Self::new(logger, config::get_min_log_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Human-readable lines on stderr.
///
/// Stdout belongs to the pipeline output, so every level goes to stderr.
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// One JSON object per line on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Keeps the most recent events in memory; the oldest fall off once the
/// log buffer size is reached.
pub struct MemoryLogger {
    capacity: usize,
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn contains(&self, level: LogLevel, code: Code) -> bool {
        self.lock().iter().any(|e| e.level == level && e.code == code)
    }

    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_and_structured_loggers() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error")
            .with_context("key", "value");
        ConsoleLogger.log(&event);
        StructuredLogger.log(&event);
    }

    #[test]
    fn test_memory_logger_queries() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(
            codes::lexical::TOKEN_LIMIT_EXCEEDED,
            "Error message",
        ));
        logger.log(&LogEvent::warning_with_code(
            codes::lexical::UNKNOWN_CHARACTER,
            "Unrecognized character '@'",
        ));

        assert_eq!(logger.len(), 3);
        assert_eq!(logger.count(LogLevel::Error), 1);
        assert_eq!(logger.count(LogLevel::Warning), 1);
        assert!(logger.contains(LogLevel::Error, codes::lexical::TOKEN_LIMIT_EXCEEDED));
        assert!(!logger.contains(LogLevel::Error, codes::lexical::UNKNOWN_CHARACTER));
        assert_eq!(logger.with_code(codes::lexical::UNKNOWN_CHARACTER).len(), 1);

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_memory_logger_drops_oldest() {
        let logger = MemoryLogger::with_capacity(2);
        for message in ["first", "second", "third"] {
            logger.log(&LogEvent::info(message));
        }

        let messages: Vec<_> = logger.events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_logging_service_filters_by_level() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Warning);

        service.log_event(LogEvent::error(
            codes::file_processing::PERMISSION_DENIED,
            "Test error",
        ));
        service.log_event(LogEvent::warning_with_code(
            codes::pipeline::STAGE_SKIPPED,
            "Stage skipped",
        ));
        service.log_event(LogEvent::success(codes::success::PIPELINE_COMPLETE, "Done"));
        service.log_event(LogEvent::debug("Ignored"));

        assert_eq!(logger.len(), 2);
        assert!(service.should_log(LogLevel::Error));
        assert!(!service.should_log(LogLevel::Debug));
    }

    #[test]
    fn test_set_min_level() {
        let logger = Arc::new(MemoryLogger::new());
        let mut service = LoggingService::new(logger.clone(), LogLevel::Error);
        service.set_min_level(LogLevel::Debug);

        service.log_event(LogEvent::info("Now visible"));
        assert_eq!(service.min_level(), LogLevel::Debug);
        assert_eq!(logger.len(), 1);
    }
}
