use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::codes;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Rendering structured view failed: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Writing pipeline output failed: {0}")]
    Output(#[from] std::io::Error),

    #[error("Unknown mode: {mode}")]
    InvalidMode { mode: String },
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::Render(_) | PipelineError::Output(_) => codes::pipeline::OUTPUT_FAILURE,
            PipelineError::InvalidMode { .. } => codes::pipeline::INVALID_MODE,
        }
    }

    /// File errors only skip the stage that hit them
    pub fn skips_stage_only(&self) -> bool {
        matches!(self, PipelineError::FileProcessing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let error = PipelineError::from(FileProcessorError::FileNotFound {
            path: "a.gs".to_string(),
        });
        assert_eq!(error.error_code().as_str(), "E005");
        assert!(error.skips_stage_only());

        let error = PipelineError::InvalidMode {
            mode: "--x".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E061");
        assert!(!error.skips_stage_only());
        assert_eq!(error.to_string(), "Unknown mode: --x");

        let error = PipelineError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert_eq!(error.error_code().as_str(), "E062");
    }
}
