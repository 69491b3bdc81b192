//! Log events for the Gosilang lexer

use super::codes::{self, Code, ErrorMetadata};
use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::utils::Span;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Log severity levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// Accepts names (`warn`, `Warning`) or the numeric level (`1`)
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Ok(Self::Error),
            "warning" | "warn" | "1" => Ok(Self::Warning),
            "info" | "2" => Ok(Self::Info),
            "debug" | "3" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    /// Ordered so rendered context is stable
    pub context: BTreeMap<String, String>,
}

/// Cut at a character boundary so multi-byte text never splits
fn bounded_message(message: &str) -> String {
    match message.char_indices().nth(MAX_LOG_MESSAGE_LENGTH) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: bounded_message(message),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Uncoded warning (W000)
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    /// Uncoded info (I000)
    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    /// Registry entry for this event's code; success and info codes have none
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        codes::get_error_metadata(self.code.as_str())
    }

    pub fn requires_halt(&self) -> bool {
        self.metadata().is_some_and(|meta| meta.requires_halt)
    }

    pub fn is_recoverable(&self) -> bool {
        self.metadata().map_or(true, |meta| meta.recoverable)
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    /// One line for the console: `[WARN W020] message (1:5)`
    pub fn format(&self) -> String {
        let mut line = format!("[{} {}] {}", self.level.as_str(), self.code, self.message);
        if let Some(span) = self.span {
            line.push_str(&format!(" ({})", span.start()));
        }
        line
    }

    /// Single-line JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let record = JsonEvent {
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level: self.level.as_str(),
            code: self.code.as_str(),
            message: &self.message,
            category: self.category(),
            severity: self.severity(),
            error_metadata: self
                .metadata()
                .filter(|_| self.is_error())
                .map(|meta| JsonErrorMetadata {
                    recoverable: meta.recoverable,
                    requires_halt: meta.requires_halt,
                    description: meta.description,
                    recommended_action: meta.recommended_action,
                }),
            span: self.span.as_ref(),
            context: Some(&self.context).filter(|context| !context.is_empty()),
        };
        serde_json::to_string(&record)
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    timestamp: String,
    level: &'static str,
    code: &'static str,
    message: &'a str,
    category: &'static str,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_metadata: Option<JsonErrorMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<&'a Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct JsonErrorMetadata {
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
}
