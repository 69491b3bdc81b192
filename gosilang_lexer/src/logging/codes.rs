//! Error codes and classification
//!
//! Code constants and the metadata registry that describes how each error
//! behaves (category, severity, recoverability, halt semantics).

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error or warning code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR001");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    // File still loads; undecodable bytes reach the lexer as U+FFFD
    pub const INVALID_ENCODING: Code = Code::new("W010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

pub mod lexical {
    use super::Code;

    // Recorded in-band as UNKNOWN tokens; warning only
    pub const UNKNOWN_CHARACTER: Code = Code::new("W020");
    // Token kept with a clamped value
    pub const NUMERIC_OUT_OF_RANGE: Code = Code::new("W029");

    pub const TOKEN_LIMIT_EXCEEDED: Code = Code::new("E027");
    pub const BUFFER_GROWTH_FAILURE: Code = Code::new("E028");
}

pub mod pipeline {
    use super::Code;

    pub const STAGE_SKIPPED: Code = Code::new("W060");
    pub const INVALID_MODE: Code = Code::new("E061");
    pub const OUTPUT_FAILURE: Code = Code::new("E062");
}

/// Success codes are informational and have no registry entry
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const STAGE_COMPLETE: Code = Code::new("I030");
    pub const PIPELINE_COMPLETE: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check GOSI_* environment variables and the runtime config file",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File does not have .gs extension",
        "Rename the file with a .gs extension or unset GOSI_REQUIRE_GS_EXTENSION",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds maximum size limit",
        "Reduce file size or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Permission denied accessing file",
        "Check file permissions and user access rights",
    ),
    ErrorMetadata::new(
        "W010",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File content is not valid UTF-8; undecodable bytes are lexed as UNKNOWN",
        "Re-save the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading file",
        "Check disk health and file system state",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Path is empty or does not name a regular file",
        "Pass the path of a source file",
    ),
    // Lexical
    ErrorMetadata::new(
        "W020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Character is not part of the Gosilang token grammar",
        "Remove the character or check the file encoding",
    ),
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::High,
        false,
        true,
        "Token count exceeds the configured maximum",
        "Split the source file or rebuild with a larger max_token_count",
    ),
    ErrorMetadata::new(
        "E028",
        "Lexical",
        Severity::Critical,
        false,
        true,
        "Token buffer could not grow",
        "Reduce input size or increase available memory",
    ),
    ErrorMetadata::new(
        "W029",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Numeric literal exceeds its value range and was clamped",
        "Use an integer within the 64-bit signed range",
    ),
    // Pipeline
    ErrorMetadata::new(
        "W060",
        "Pipeline",
        Severity::Medium,
        true,
        false,
        "Pipeline stage skipped because its input was unavailable",
        "Fix the reported file error and rerun",
    ),
    ErrorMetadata::new(
        "E061",
        "Pipeline",
        Severity::Low,
        false,
        true,
        "Unknown pipeline mode",
        "Use --all, --tokens or --raw",
    ),
    ErrorMetadata::new(
        "E062",
        "Pipeline",
        Severity::High,
        false,
        true,
        "Writing pipeline output failed",
        "Check that stdout is writable",
    ),
];

/// Registry lookup; the table is small enough that a scan beats hashing
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    REGISTRY_ENTRIES.iter().find(|metadata| metadata.code == code)
}

/// Unregistered codes default to Medium
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |m| m.severity)
}

/// Unregistered codes (success, info) are treated as recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |m| m.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code).is_some_and(|m| m.requires_halt)
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code).map_or("No specific action available", |m| m.recommended_action)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |m| m.category)
}
