//! Run modes and the stages they select

use super::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// Stages 1 through 4
    #[default]
    All,
    /// Token stream only
    Tokens,
    /// Raw file content only
    Raw,
}

impl PipelineMode {
    pub fn from_arg(arg: &str) -> Result<Self, PipelineError> {
        match arg {
            "--all" => Ok(Self::All),
            "--tokens" => Ok(Self::Tokens),
            "--raw" => Ok(Self::Raw),
            other => Err(PipelineError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }

    pub fn as_arg(self) -> &'static str {
        match self {
            Self::All => "--all",
            Self::Tokens => "--tokens",
            Self::Raw => "--raw",
        }
    }

    pub fn stages(self) -> &'static [Stage] {
        match self {
            Self::All => &[Stage::Raw, Stage::Tokens, Stage::Patterns, Stage::Codegen],
            Self::Tokens => &[Stage::Tokens],
            Self::Raw => &[Stage::Raw],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Raw,
    Tokens,
    Patterns,
    Codegen,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Self::Raw => 1,
            Self::Tokens => 2,
            Self::Patterns => 3,
            Self::Codegen => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Raw => "Raw Lexemes",
            Self::Tokens => "Token Stream",
            Self::Patterns => "AST Preview",
            Self::Codegen => "Codegen Preview",
        }
    }

    /// `=== STAGE N: Title ===`
    pub fn header(self) -> String {
        format!("=== STAGE {}: {} ===", self.number(), self.title())
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {} ({})", self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(PipelineMode::from_arg("--all").unwrap(), PipelineMode::All);
        assert_eq!(
            PipelineMode::from_arg("--tokens").unwrap(),
            PipelineMode::Tokens
        );
        assert_eq!(PipelineMode::from_arg("--raw").unwrap(), PipelineMode::Raw);
        assert_matches!(
            PipelineMode::from_arg("--ast"),
            Err(PipelineError::InvalidMode { ref mode }) if mode == "--ast"
        );
        assert_eq!(PipelineMode::default(), PipelineMode::All);
    }

    #[test]
    fn test_stage_selection() {
        assert_eq!(PipelineMode::All.stages().len(), 4);
        assert_eq!(PipelineMode::Tokens.stages(), &[Stage::Tokens]);
        assert_eq!(PipelineMode::Raw.stages(), &[Stage::Raw]);

        for mode in [PipelineMode::All, PipelineMode::Tokens, PipelineMode::Raw] {
            assert_eq!(PipelineMode::from_arg(mode.as_arg()).unwrap(), mode);
        }
    }

    #[test]
    fn test_stage_headers() {
        assert_eq!(Stage::Raw.header(), "=== STAGE 1: Raw Lexemes ===");
        assert_eq!(Stage::Tokens.header(), "=== STAGE 2: Token Stream ===");
        assert_eq!(Stage::Patterns.header(), "=== STAGE 3: AST Preview ===");
        assert_eq!(Stage::Codegen.header(), "=== STAGE 4: Codegen Preview ===");
    }
}
