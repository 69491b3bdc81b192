//! Runtime preferences, read from `GOSI_*` variables or a TOML file

pub use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require the .gs extension
    pub require_gs_extension: bool,

    /// Whether to log read timings and file metadata
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_gs_extension: env_flag(env_vars::REQUIRE_GS_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Emit a W020 warning for every UNKNOWN token
    pub report_unknown_characters: bool,

    /// Whether to collect per-class token metrics
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            report_unknown_characters: env_flag(env_vars::LEXICAL_REPORT_UNKNOWN, true),
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelinePreferences {
    /// Adds the `Value Type` column to the token table
    pub show_value_type: bool,

    /// Whether stage 2 prints the JSON view after the table
    pub show_structured_view: bool,

    /// Whether stage 2 ends with a per-class token summary
    pub show_token_summary: bool,
}

impl Default for PipelinePreferences {
    fn default() -> Self {
        Self {
            show_value_type: env_flag(env_vars::PIPELINE_SHOW_VALUE_TYPE, true),
            show_structured_view: env_flag(env_vars::PIPELINE_SHOW_STRUCTURED_VIEW, true),
            show_token_summary: env_flag(env_vars::PIPELINE_SHOW_TOKEN_SUMMARY, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// One JSON object per event instead of plain lines
    pub use_structured_logging: bool,

    pub min_log_level: LogLevel,

    /// Print the collected diagnostics after the run
    pub enable_cargo_style_output: bool,

    /// Tag events with the file being processed
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LogLevel::Warning),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read runtime config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid runtime config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub pipeline: PipelinePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML; absent keys fall back to env/defaults
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, RuntimeConfigError> {
        toml::from_str(content).map_err(|source| RuntimeConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RuntimeConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Loads `GOSI_RUNTIME_CONFIG` when set, otherwise env/defaults
    pub fn from_environment() -> Result<Self, RuntimeConfigError> {
        match env::var(env_vars::RUNTIME_CONFIG_FILE) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const RUNTIME_CONFIG_FILE: &str = "GOSI_RUNTIME_CONFIG";

    // File Processor
    pub const REQUIRE_GS_EXTENSION: &str = "GOSI_REQUIRE_GS_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "GOSI_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_REPORT_UNKNOWN: &str = "GOSI_REPORT_UNKNOWN_CHARACTERS";
    pub const LEXICAL_DETAILED_METRICS: &str = "GOSI_COLLECT_DETAILED_METRICS";

    // Pipeline
    pub const PIPELINE_SHOW_VALUE_TYPE: &str = "GOSI_SHOW_VALUE_TYPE";
    pub const PIPELINE_SHOW_STRUCTURED_VIEW: &str = "GOSI_SHOW_STRUCTURED_VIEW";
    pub const PIPELINE_SHOW_TOKEN_SUMMARY: &str = "GOSI_SHOW_TOKEN_SUMMARY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "GOSI_STRUCTURED_LOGGING";
    pub const LOGGING_MIN_LEVEL: &str = "GOSI_LOG_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "GOSI_CARGO_STYLE_OUTPUT";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "GOSI_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("ERROR".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("0".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("1".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("info".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("3".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_env_var_names_use_prefix() {
        for name in [
            env_vars::REQUIRE_GS_EXTENSION,
            env_vars::LEXICAL_REPORT_UNKNOWN,
            env_vars::PIPELINE_SHOW_VALUE_TYPE,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("GOSI_"));
        }
    }

    #[test]
    fn test_partial_toml_overrides_only_named_keys() {
        let config = RuntimeConfig::from_toml_str(
            "[pipeline]\nshow_value_type = false\n\n[logging]\nmin_log_level = \"debug\"\n",
            "inline",
        )
        .unwrap();

        assert!(!config.pipeline.show_value_type);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = RuntimeConfig::from_toml_str("[pipeline\nshow_value_type = 1", "broken.toml");
        assert_matches!(result, Err(RuntimeConfigError::Parse { ref path, .. }) if path == "broken.toml");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\nreport_unknown_characters = false").unwrap();

        let config = RuntimeConfig::load_from_file(file.path()).unwrap();
        assert!(!config.lexical.report_unknown_characters);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::load_from_file(dir.path().join("absent.toml"));
        assert_matches!(result, Err(RuntimeConfigError::Io { .. }));
    }
}
