use super::mode::{PipelineMode, Stage};
use crate::file_processor::GOSILANG_EXTENSION;

#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub stages: Vec<Stage>,
    pub modes: Vec<&'static str>,
    pub max_file_size: u64,
    pub max_token_count: usize,
    pub source_extension: &'static str,
    pub build_profile: &'static str,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        let stages: Vec<String> = self
            .stages
            .iter()
            .map(|stage| format!("{}. {}", stage.number(), stage.title()))
            .collect();

        format!(
            "Gosilang Lexer Pipeline:\n\
             - Stages: {}\n\
             - Modes: {}\n\
             - Max File Size: {} MB\n\
             - Max Tokens: {}\n\
             - Source Extension: .{}\n\
             - Build Profile: {}",
            stages.join(", "),
            self.modes.join(", "),
            self.max_file_size / (1024 * 1024),
            self.max_token_count,
            self.source_extension,
            self.build_profile
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        stages: PipelineMode::All.stages().to_vec(),
        modes: [PipelineMode::All, PipelineMode::Tokens, PipelineMode::Raw]
            .iter()
            .map(|mode| mode.as_arg())
            .collect(),
        max_file_size: crate::file_processor::get_max_file_size(),
        max_token_count: crate::config::compile_time::lexical::MAX_TOKEN_COUNT,
        source_extension: GOSILANG_EXTENSION,
        build_profile: crate::config::build_info::profile(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.stages.len(), 4);
        assert_eq!(info.modes, vec!["--all", "--tokens", "--raw"]);

        let report = info.report();
        assert!(report.contains("1. Raw Lexemes, 2. Token Stream"));
        assert!(report.contains("Source Extension: .gs"));
    }
}
