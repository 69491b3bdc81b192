use super::error::PipelineError;
use super::mode::{PipelineMode, Stage};
use std::time::Duration;

/// What a pipeline run did
#[derive(Debug)]
pub struct PipelineReport {
    pub mode: PipelineMode,
    pub stages_run: Vec<Stage>,
    /// Stages whose input could not be loaded, with the reason
    pub skipped: Vec<(Stage, PipelineError)>,
    /// Includes EOF; `None` when no token stream was built
    pub token_count: Option<usize>,
    pub unknown_count: usize,
    pub duration: Duration,
}

impl PipelineReport {
    pub fn new(mode: PipelineMode) -> Self {
        Self {
            mode,
            stages_run: Vec::new(),
            skipped: Vec::new(),
            token_count: None,
            unknown_count: 0,
            duration: Duration::ZERO,
        }
    }

    /// Every selected stage ran
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_complete() {
            0
        } else {
            1
        }
    }

    pub fn was_skipped(&self, stage: Stage) -> bool {
        self.skipped.iter().any(|(skipped, _)| *skipped == stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;

    #[test]
    fn test_report_completion() {
        let mut report = PipelineReport::new(PipelineMode::All);
        report.stages_run.push(Stage::Raw);
        assert!(report.is_complete());
        assert_eq!(report.exit_code(), 0);

        report.skipped.push((
            Stage::Tokens,
            FileProcessorError::InvalidPath {
                path: String::new(),
            }
            .into(),
        ));
        assert!(!report.is_complete());
        assert!(report.was_skipped(Stage::Tokens));
        assert!(!report.was_skipped(Stage::Raw));
        assert_eq!(report.exit_code(), 1);
    }
}
