//! Logging configuration
//!
//! Buffer sizes and message limits come from the build-time constants.
//! Verbosity and output style come from runtime [`LoggingPreferences`].

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use crate::logging::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences. The first call wins; later calls are ignored,
/// as is a call made after any logging already fell back to the defaults.
pub fn init_runtime_preferences(preferences: LoggingPreferences) {
    let _ = RUNTIME_PREFERENCES.set(preferences);
}

fn preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_cargo_style_output() -> bool {
    preferences().enable_cargo_style_output
}

pub fn include_file_context() -> bool {
    preferences().include_file_context
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Check that the build-time limits are consistent with each other
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per file exceeds total buffer size".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_compile_time_constants() {
        assert!(get_error_buffer_size() > 0);
        assert!(get_max_log_events_per_file() <= get_error_buffer_size());
    }
}
