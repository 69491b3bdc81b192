//! Lexical analysis for Gosilang source text
//!
//! Turns a loaded source file into a frozen [`TokenStream`] and provides
//! summary counts over the result.

pub mod analyzer;

use crate::config::compile_time::lexical::{INITIAL_BUFFER_CAPACITY, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{TokenClass, TokenKind, TokenStream};

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize an in-memory source string with default preferences
pub fn tokenize_source(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

pub fn tokenize_file_result(file_result: &FileProcessingResult) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_file_result(file_result)
}

pub fn create_analyzer(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

/// Startup check that lexical codes are registered and limits are sane
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::UNKNOWN_CHARACTER,
        codes::lexical::TOKEN_LIMIT_EXCEEDED,
        codes::lexical::BUFFER_GROWTH_FAILURE,
        codes::lexical::NUMERIC_OUT_OF_RANGE,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code
            ));
        }
    }

    if INITIAL_BUFFER_CAPACITY == 0 || INITIAL_BUFFER_CAPACITY > MAX_TOKEN_COUNT {
        return Err(format!(
            "Initial buffer capacity {} must be within 1..={}",
            INITIAL_BUFFER_CAPACITY, MAX_TOKEN_COUNT
        ));
    }

    crate::log_debug!("Lexical limits initialized",
        "initial_buffer_capacity" => INITIAL_BUFFER_CAPACITY,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Token distribution over a finished stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub integers: usize,
    pub floats: usize,
    pub structural: usize,
    pub newlines: usize,
    pub unknown: usize,
}

impl TokenCounts {
    /// Everything except NEWLINE and EOF
    pub fn significant_tokens(&self) -> usize {
        self.total.saturating_sub(self.newlines + 1)
    }

    pub fn has_unknown(&self) -> bool {
        self.unknown > 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: {} keywords, {} identifiers, {} integers, {} floats, {} structural, {} newlines, {} unknown",
            self.keywords,
            self.identifiers,
            self.integers,
            self.floats,
            self.structural,
            self.newlines,
            self.unknown
        )
    }
}

pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream {
        counts.total += 1;
        match token.kind.token_class() {
            TokenClass::Keyword => counts.keywords += 1,
            TokenClass::Identifier => counts.identifiers += 1,
            TokenClass::Literal if token.kind == TokenKind::Float => counts.floats += 1,
            TokenClass::Literal => counts.integers += 1,
            TokenClass::Structural => counts.structural += 1,
            TokenClass::Control => match token.kind {
                TokenKind::Newline => counts.newlines += 1,
                TokenKind::Unknown => counts.unknown += 1,
                _ => {}
            },
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_create_analyzer() {
        let preferences = LexicalPreferences {
            report_unknown_characters: false,
            collect_detailed_metrics: false,
        };
        let analyzer = create_analyzer(preferences);
        assert!(!analyzer.preferences().report_unknown_characters);
    }

    #[test]
    fn test_token_counts() {
        let stream = tokenize_source("let v := !vec<3>(1, 2.5, x) @\n").unwrap();
        let counts = get_token_counts(&stream);

        assert_eq!(counts.total, stream.len());
        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.identifiers, 2);
        assert_eq!(counts.integers, 2);
        assert_eq!(counts.floats, 1);
        assert_eq!(counts.structural, 8);
        assert_eq!(counts.newlines, 1);
        assert_eq!(counts.unknown, 1);
        assert!(counts.has_unknown());
        assert_eq!(counts.significant_tokens(), counts.total - 2);
    }

    #[test]
    fn test_empty_source_counts() {
        let stream = tokenize_source("").unwrap();
        let counts = get_token_counts(&stream);

        assert_eq!(counts.total, 1);
        assert_eq!(counts.significant_tokens(), 0);
        assert!(counts
            .summary_line()
            .starts_with("Summary: 0 keywords, 0 identifiers"));
    }
}
