//! Pipeline stage runner
//!
//! Drives the four preview stages over one source file and writes their
//! human-readable output to a caller-supplied writer. Stages 1 and 2 load the
//! file independently, so a file error skips only the stage that hit it.
//! Lexer failures and output errors abort the run.

mod error;
mod info;
mod mode;
mod preview;
mod render;
mod report;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use mode::{PipelineMode, Stage};
pub use preview::{
    detect_patterns, render_codegen_preview, render_patterns, DetectedPattern, PatternKind,
    CODEGEN_PATTERNS,
};
pub use render::{display_lexeme, render_raw, render_token_table, structured_view, TableOptions};
pub use report::PipelineReport;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::lexical::{get_token_counts, LexicalAnalyzer};
use crate::logging::{self, codes};
use crate::tokens::TokenStream;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

pub const BANNER: &str = "Gosilang MVP Lexer Pipeline";
pub const FOOTER: &str = "Pipeline complete - ready for Phase 2 (Parser)";

struct StageRunner<'a> {
    file_path: &'a str,
    config: &'a RuntimeConfig,
    out: &'a mut dyn Write,
    stream: Option<TokenStream>,
    report: PipelineReport,
}

impl<'a> StageRunner<'a> {
    fn run(&mut self, stage: Stage) -> Result<(), PipelineError> {
        writeln!(self.out, "\n{}", stage.header())?;

        let outcome = match stage {
            Stage::Raw => self.raw_stage(),
            Stage::Tokens => self.token_stage(),
            Stage::Patterns => {
                render_patterns(self.out, self.stream.as_ref())?;
                Ok(())
            }
            Stage::Codegen => {
                render_codegen_preview(self.out)?;
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {
                self.report.stages_run.push(stage);
                crate::log_debug!("Stage complete", "stage" => stage.number());
                Ok(())
            }
            Err(error) if error.skips_stage_only() => {
                crate::log_warning!(code = codes::pipeline::STAGE_SKIPPED,
                    &format!("Skipping {}: {}", stage, error),
                    "stage" => stage.number()
                );
                self.report.skipped.push((stage, error));
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    fn load(&self) -> Result<FileProcessingResult, PipelineError> {
        let processor = FileProcessor::from_preferences(&self.config.file_processor);
        Ok(processor.process_file(self.file_path)?)
    }

    fn raw_stage(&mut self) -> Result<(), PipelineError> {
        let file = self.load()?;
        render_raw(self.out, &file.bytes)?;
        Ok(())
    }

    fn token_stage(&mut self) -> Result<(), PipelineError> {
        let file = self.load()?;

        let mut analyzer = LexicalAnalyzer::with_preferences(self.config.lexical.clone());
        let stream = analyzer.tokenize_file_result(&file)?;
        let preferences = &self.config.pipeline;

        writeln!(self.out, "Generated {} tokens:\n", stream.len())?;
        render_token_table(
            self.out,
            &stream,
            TableOptions {
                show_value_type: preferences.show_value_type,
            },
        )?;

        if preferences.show_structured_view {
            writeln!(self.out, "\nJSON Format:")?;
            writeln!(self.out, "{}", structured_view(&stream)?)?;
        }

        let counts = get_token_counts(&stream);
        if preferences.show_token_summary {
            writeln!(self.out, "\n{}", counts.summary_line())?;
        }

        self.report.token_count = Some(stream.len());
        self.report.unknown_count = counts.unknown;
        self.stream = Some(stream);
        Ok(())
    }
}

/// Run the stages `mode` selects over `file_path`, writing to `out`.
///
/// A returned report with skipped stages still had its banner, remaining
/// stages and footer written.
pub fn run_pipeline(
    file_path: &str,
    mode: PipelineMode,
    config: &RuntimeConfig,
    out: &mut dyn Write,
) -> Result<PipelineReport, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "Processing: {}", file_path)?;

        let mut runner = StageRunner {
            file_path,
            config,
            out,
            stream: None,
            report: PipelineReport::new(mode),
        };

        for stage in mode.stages() {
            runner.run(*stage)?;
        }

        writeln!(runner.out, "\n{}", FOOTER)?;

        let mut report = runner.report;
        report.duration = start_time.elapsed();

        crate::log_performance!(codes::success::PIPELINE_COMPLETE,
            "Pipeline run finished",
            duration = report.duration,
            "mode" => mode.as_arg(),
            "stages_run" => report.stages_run.len(),
            "stages_skipped" => report.skipped.len()
        );

        Ok(report)
    })
}
