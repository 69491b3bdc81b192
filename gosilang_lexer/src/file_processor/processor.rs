//! Source file loading with size limits, lossy decoding and metadata

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const GOSILANG_EXTENSION: &str = "gs";

/// Why a source file could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("cannot open '{path}': no such file")]
    FileNotFound { path: String },

    #[error("expected a .gs source file, got extension {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("source is {size} bytes, over the {max_size} byte limit")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("cannot open '{path}': permission denied")]
    PermissionDenied { path: String },

    #[error("read failed: {message}")]
    IoError { message: String },

    #[error("'{path}' is not a readable file path")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        use crate::logging::codes::file_processing as fp;
        match self {
            Self::FileNotFound { .. } => fp::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => fp::INVALID_EXTENSION,
            Self::FileTooLarge { .. } => fp::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => fp::PERMISSION_DENIED,
            Self::IoError { .. } => fp::IO_ERROR,
            Self::InvalidPath { .. } => fp::INVALID_PATH,
        }
    }

    /// Classify an I/O failure raised while touching `path`
    fn from_io(error: &io::Error, path: &str) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::FileNotFound {
                path: path.to_string(),
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_string(),
            },
            _ => Self::IoError {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// Log `error` under its own code and hand it back for `Err(..)`
fn reject(error: FileProcessorError, file_path: &str) -> FileProcessorError {
    log_error!(error.error_code(), "Cannot load source file",
        "file" => file_path,
        "reason" => &error);
    error
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    /// Filled in once the content has been read
    pub line_count: usize,
    pub is_gosilang_file: bool,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_readable(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// A fully loaded source file
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File content exactly as read
    pub bytes: Vec<u8>,
    /// `bytes` decoded as UTF-8, each invalid sequence replaced by U+FFFD
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decoding replaced at least one invalid byte sequence
    pub fn is_lossy(&self) -> bool {
        self.source.as_bytes() != self.bytes.as_slice()
    }
}

pub struct FileProcessor {
    pub require_gs_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_gs_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_gs_extension: prefs.require_gs_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_gs_extension_required(mut self, required: bool) -> Self {
        self.require_gs_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Load `file_path` in full.
    ///
    /// An empty file is a valid result. Every failure is logged with its
    /// file-processing code before it is returned.
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let started = Instant::now();
        log_debug!("Loading source file", "file" => file_path);

        let path = resolve_path(file_path).map_err(|e| reject(e, file_path))?;
        let mut metadata = inspect(&path).map_err(|e| reject(e, file_path))?;
        self.check_limits(&metadata).map_err(|e| reject(e, file_path))?;
        let bytes = fs::read(&path)
            .map_err(|e| reject(FileProcessorError::from_io(&e, file_path), file_path))?;
        let source = decode_lossy(&bytes, file_path);

        metadata.line_count = source.lines().count();

        let result = FileProcessingResult {
            bytes,
            source,
            metadata,
            processing_duration: started.elapsed(),
        };
        self.report_loaded(&result, file_path);

        Ok(result)
    }

    fn check_limits(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            });
        }

        if self.require_gs_extension && !metadata.is_gosilang_file {
            return Err(FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            });
        }

        Ok(())
    }

    fn report_loaded(&self, result: &FileProcessingResult, file_path: &str) {
        if !self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Source file loaded",
                "file" => file_path,
                "size_bytes" => result.metadata.size);
            return;
        }

        log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Source file loaded",
            "file" => file_path,
            "size" => result.metadata.human_readable_size(),
            "lines" => result.metadata.line_count,
            "chars" => result.char_count(),
            "load_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0),
            "large" => result.metadata.is_large_file());
    }
}

fn resolve_path(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    let invalid = || FileProcessorError::InvalidPath {
        path: file_path.to_string(),
    };

    if file_path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(FileProcessorError::FileNotFound {
            path: file_path.to_string(),
        });
    }
    if !path.is_file() {
        return Err(invalid());
    }

    path.canonicalize()
        .map_err(|error| FileProcessorError::from_io(&error, file_path))
}

fn inspect(path: &Path) -> Result<FileMetadata, FileProcessorError> {
    let size = fs::metadata(path)
        .map_err(|e| FileProcessorError::from_io(&e, &path.display().to_string()))?
        .len();

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    let is_gosilang_file = extension.as_deref() == Some(GOSILANG_EXTENSION);

    log_debug!("Source metadata",
        "size_bytes" => size,
        "extension" => extension.as_deref().unwrap_or("none"));

    Ok(FileMetadata {
        path: path.to_path_buf(),
        size,
        extension,
        line_count: 0,
        is_gosilang_file,
    })
}

/// Decode as UTF-8 without rejecting the file. Invalid sequences become
/// U+FFFD, which the lexer classifies as UNKNOWN.
fn decode_lossy(bytes: &[u8], file_path: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(error) => {
            log_warning!(code = codes::file_processing::INVALID_ENCODING,
                "Source file is not valid UTF-8",
                "file" => file_path,
                "valid_up_to" => error.valid_up_to());
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
