//! Source file loading for the lexer pipeline

mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::log_debug;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, GOSILANG_EXTENSION,
};

/// Load a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Check that every file-processing code is registered (startup validation)
pub fn init_file_processor_logging() -> Result<(), String> {
    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code
            ));
        }
    }

    log_debug!("File processor limits loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.gs");
        fs::write(&file_path, "span[0..4]\n").unwrap();

        let result = process_file(file_path.to_str().unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_limits() {
        assert_eq!(FileProcessor::max_file_size(), get_max_file_size());
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_gs_extension: true,
            enable_performance_logging: true,
        };
        assert!(create_processor_from_preferences(&prefs).require_gs_extension);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
