//! Core lexical analyzer for Gosilang
//!
//! A single forward pass over an in-memory source buffer. Each iteration tries
//! the classification rules in precedence order: inline whitespace, newline,
//! identifier or keyword, numeric literal, two-character operator,
//! single-character symbol, and finally UNKNOWN. Unrecognized input never stops
//! the scan, and numeric literals too large for their type are clamped with a
//! warning. Only buffer exhaustion is fatal.

use crate::config::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{
    classify_word, keyword_kind, single_char_kind, two_char_kind, Token, TokenBuffer,
    TokenBufferError, TokenClass, TokenKind, TokenStream,
};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success, log_warning};

/// Fatal lexing failures. Malformed input is never an error; it becomes UNKNOWN.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Token buffer failure: {0}")]
    Buffer(#[from] TokenBufferError),
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::Buffer(TokenBufferError::AllocationFailed { .. }) => {
                codes::lexical::BUFFER_GROWTH_FAILURE
            }
            LexerError::Buffer(TokenBufferError::CapacityExceeded { .. }) => {
                codes::lexical::TOKEN_LIMIT_EXCEEDED
            }
        }
    }
}

/// Per-pass lexical metrics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub unknown_tokens: usize,

    // Detailed metrics, collected when enabled in preferences
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub integer_literals: usize,
    pub float_literals: usize,
    pub structural_tokens: usize,
    pub newline_tokens: usize,
    pub max_identifier_length: usize,

    pub buffer_growths: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if token.kind == TokenKind::Unknown {
            self.unknown_tokens += 1;
        }

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.kind.token_class() {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Identifier => {
                self.identifier_tokens += 1;
                self.max_identifier_length =
                    self.max_identifier_length.max(token.lexeme.chars().count());
            }
            TokenClass::Literal => match token.kind {
                TokenKind::Float => self.float_literals += 1,
                _ => self.integer_literals += 1,
            },
            TokenClass::Structural => self.structural_tokens += 1,
            TokenClass::Control => {
                if token.kind == TokenKind::Newline {
                    self.newline_tokens += 1;
                }
            }
        }
    }
}

/// Character cursor over the source buffer. Tracks both the byte index used for
/// slicing and the character-based [`Position`] recorded on tokens.
struct Cursor<'a> {
    source: &'a str,
    byte_offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            byte_offset: 0,
            position: Position::start(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.byte_offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.byte_offset += ch.len_utf8();
        self.position = self.position.advance(ch);
        Some(ch)
    }

    fn bump_n(&mut self, count: usize) {
        for _ in 0..count {
            self.bump();
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.bump();
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.byte_offset]
    }
}

/// Space, tab, carriage return, vertical tab and form feed. Newline is a token.
fn is_inline_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// `#def`, `#bind`, `#unbind` when the `#` and the following identifier run
/// spell one exactly. Returns the kind and the lexeme length in characters.
fn directive_at(rest: &str) -> Option<(TokenKind, usize)> {
    let word = rest.strip_prefix('#')?;
    if !word.starts_with(is_identifier_start) {
        return None;
    }

    let word_len = word
        .find(|ch: char| !is_identifier_continue(ch))
        .unwrap_or(word.len());
    let candidate = &rest[..1 + word_len];

    keyword_kind(candidate)
        .filter(|kind| kind.is_directive())
        .map(|kind| (kind, candidate.len()))
}

/// Lexical analyzer with global logging integration
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
    max_tokens: usize,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
            max_tokens: MAX_TOKEN_COUNT,
        }
    }

    /// Lower the token ceiling below the compile-time maximum
    pub fn with_token_limit(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens.min(MAX_TOKEN_COUNT);
        self
    }

    /// Tokenize a loaded file, attaching file metadata to the completion event
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        let file_path = file_result.metadata.path.display().to_string();

        log_debug!("Starting lexical analysis",
            "file" => file_path.as_str(),
            "char_count" => file_result.char_count(),
            "line_count" => file_result.metadata.line_count,
            "lossy_decoding" => file_result.is_lossy(),
            "max_tokens_allowed" => self.max_tokens
        );

        let stream = self.tokenize(&file_result.source)?;

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "file" => file_path.as_str(),
            "token_count" => stream.len(),
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "unknown" => self.metrics.unknown_tokens,
            "buffer_growths" => self.metrics.buffer_growths
        );

        Ok(stream)
    }

    /// Scan `source` into a fresh token stream terminated by EOF
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        self.scan(source).map_err(|error| {
            log_error!(error.error_code(), "Lexical analysis aborted",
                "reason" => &error,
                "tokens_scanned" => self.metrics.total_tokens
            );
            error
        })
    }

    fn scan(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        let mut buffer = TokenBuffer::with_limits(
            crate::config::compile_time::lexical::INITIAL_BUFFER_CAPACITY,
            self.max_tokens,
        );
        let mut cursor = Cursor::new(source);

        while let Some(ch) = cursor.peek() {
            if is_inline_whitespace(ch) {
                cursor.bump();
                continue;
            }

            let start = cursor.position;
            let start_offset = cursor.byte_offset;

            let kind = if ch == '\n' {
                cursor.bump();
                TokenKind::Newline
            } else if is_identifier_start(ch) {
                cursor.eat_while(is_identifier_continue);
                classify_word(cursor.slice_from(start_offset))
            } else if let Some((kind, len)) = directive_at(cursor.rest()) {
                cursor.bump_n(len);
                kind
            } else if ch.is_ascii_digit() {
                self.scan_number(&mut cursor)
            } else if let Some(kind) = cursor.peek_second().and_then(|next| two_char_kind(ch, next))
            {
                cursor.bump_n(2);
                kind
            } else if let Some(kind) = single_char_kind(ch) {
                cursor.bump();
                kind
            } else {
                cursor.bump();
                self.report_unknown(ch, start);
                TokenKind::Unknown
            };

            let token = Token::new(kind, cursor.slice_from(start_offset), start);
            if token.is_out_of_range() {
                self.report_out_of_range(&token);
            }
            self.metrics.record_token(&token, &self.preferences);
            buffer.append(token)?;
        }

        buffer.append(Token::eof(cursor.position))?;
        self.metrics.buffer_growths = buffer.growth_count();

        let stream = buffer.finish();
        debug_assert!(crate::tokens::validation::validate_token_stream(&stream).is_ok());
        Ok(stream)
    }

    /// Digit run, optionally `.` plus a second digit run. A `.` not followed by
    /// a digit is left for the next iteration.
    fn scan_number(&self, cursor: &mut Cursor<'_>) -> TokenKind {
        cursor.eat_while(|c| c.is_ascii_digit());

        let fraction_follows =
            cursor.peek() == Some('.') && cursor.peek_second().map_or(false, |c| c.is_ascii_digit());

        if fraction_follows {
            cursor.bump();
            cursor.eat_while(|c| c.is_ascii_digit());
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    fn report_unknown(&self, ch: char, position: Position) {
        if !self.preferences.report_unknown_characters {
            return;
        }

        log_warning!(code = codes::lexical::UNKNOWN_CHARACTER,
            &format!("Unrecognized character {:?}", ch),
            span = Span::single(position, ch),
            "character" => ch.escape_debug(),
            "line" => position.line,
            "column" => position.column
        );
    }

    fn report_out_of_range(&self, token: &Token) {
        log_warning!(code = codes::lexical::NUMERIC_OUT_OF_RANGE,
            &format!("Numeric literal {} does not fit {}", token.lexeme, token.value_type()),
            span = token.span(),
            "clamped_to" => token.literal.map_or_else(String::new, |value| value.to_string())
        );
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{validation, Literal};
    use assert_matches::assert_matches;

    fn lex(source: &str) -> TokenStream {
        LexicalAnalyzer::new().tokenize(source).unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).kinds()
    }

    fn lexemes(source: &str) -> Vec<String> {
        lex(source).iter().map(|t| t.lexeme.clone()).collect()
    }

    #[test]
    fn test_empty_input_yields_only_eof() {
        let stream = lex("");
        assert_eq!(stream.kinds(), vec![TokenKind::Eof]);
        assert_eq!(stream.tokens()[0].position, Position::start());
    }

    #[test]
    fn test_stream_always_ends_with_single_empty_eof() {
        for source in ["", "   ", "let x", "@@@", "1.2.3\n\n", "#define", "λ"] {
            let stream = lex(source);
            assert!(
                validation::validate_token_stream(&stream).is_ok(),
                "invalid stream for {:?}",
                source
            );
        }
    }

    #[test]
    fn test_keyword_precedence_over_identifier() {
        assert_eq!(
            kinds("let x"),
            vec![TokenKind::Let, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(kinds("letter"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(lexemes("letter")[0], "letter");
    }

    #[test]
    fn test_all_word_keywords() {
        assert_eq!(
            kinds("span range vec nil null let"),
            vec![
                TokenKind::Span,
                TokenKind::Range,
                TokenKind::Vec,
                TokenKind::Nil,
                TokenKind::Null,
                TokenKind::Let,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_assign_is_never_split() {
        assert_eq!(kinds(":="), vec![TokenKind::Assign, TokenKind::Eof]);
        assert_eq!(lexemes(":=")[0], ":=");
        assert_eq!(
            kinds(": ="),
            vec![TokenKind::Colon, TokenKind::Equal, TokenKind::Eof]
        );
    }

    #[test]
    fn test_assignment_statement() {
        let stream = lex("x := 42\n");
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );

        let tokens = stream.tokens();
        assert_eq!(tokens[0].lexeme, "x");
        assert_eq!(tokens[2].lexeme, "42");
        assert_eq!(tokens[2].literal, Some(Literal::Integer(42)));
        assert_eq!(tokens[3].lexeme, "\n");
        assert_eq!(tokens[4].lexeme, "");
        assert_eq!(tokens[4].position, Position::new(8, 2, 1));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_float_literal() {
        let stream = lex("3.14");
        assert_eq!(stream.kinds(), vec![TokenKind::Float, TokenKind::Eof]);
        assert_eq!(stream.tokens()[0].lexeme, "3.14");
        assert_eq!(stream.tokens()[0].literal, Some(Literal::Float(3.14)));
    }

    #[test]
    fn test_unknown_character_does_not_abort() {
        let stream = lex("@");
        assert_eq!(stream.kinds(), vec![TokenKind::Unknown, TokenKind::Eof]);
        assert_eq!(stream.tokens()[0].lexeme, "@");
    }

    #[test]
    fn test_unknown_characters_are_single_char_tokens() {
        let stream = lex("a$%b");
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::Unknown,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_second_decimal_point_starts_new_tokens() {
        let stream = lex("1.2.3");
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Float,
                TokenKind::Unknown,
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
        assert_eq!(stream.tokens()[0].lexeme, "1.2");
        assert_eq!(stream.tokens()[1].lexeme, ".");
    }

    #[test]
    fn test_range_between_integers() {
        assert_eq!(
            kinds("1..5"),
            vec![
                TokenKind::Integer,
                TokenKind::DotDot,
                TokenKind::Integer,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_trailing_dot_is_not_a_float() {
        assert_eq!(
            kinds("7."),
            vec![TokenKind::Integer, TokenKind::Unknown, TokenKind::Eof]
        );
    }

    #[test]
    fn test_directive_keywords() {
        assert_eq!(
            kinds("#def #bind #unbind"),
            vec![
                TokenKind::Def,
                TokenKind::Bind,
                TokenKind::Unbind,
                TokenKind::Eof
            ]
        );
        assert_eq!(lexemes("#unbind")[0], "#unbind");
    }

    #[test]
    fn test_hash_without_directive() {
        assert_eq!(
            kinds("#define"),
            vec![TokenKind::Hash, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(
            kinds("# bind"),
            vec![TokenKind::Hash, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(kinds("#"), vec![TokenKind::Hash, TokenKind::Eof]);
    }

    #[test]
    fn test_structural_symbols() {
        assert_eq!(
            kinds("!#=()<>[]{},:;->.."),
            vec![
                TokenKind::Bang,
                TokenKind::Hash,
                TokenKind::Equal,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Arrow,
                TokenKind::DotDot,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lone_minus_is_unknown() {
        assert_eq!(
            kinds("-1"),
            vec![TokenKind::Unknown, TokenKind::Integer, TokenKind::Eof]
        );
    }

    #[test]
    fn test_whitespace_produces_no_tokens() {
        assert_eq!(
            kinds(" \t\r\x0b\x0cx"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_positions_record_token_start() {
        let stream = lex("let v\n  !vec<3>");
        let positions: Vec<(u32, u32, usize)> = stream
            .iter()
            .map(|t| (t.position.line, t.position.column, t.position.offset))
            .collect();

        assert_eq!(
            positions,
            vec![
                (1, 1, 0),  // let
                (1, 5, 4),  // v
                (1, 6, 5),  // newline
                (2, 3, 8),  // !
                (2, 4, 9),  // vec
                (2, 7, 12), // <
                (2, 8, 13), // 3
                (2, 9, 14), // >
                (2, 10, 15) // EOF
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let stream = lex("a\r\nb");
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert_eq!(stream.tokens()[2].position, Position::new(3, 2, 1));
    }

    #[test]
    fn test_non_ascii_is_unknown_per_character() {
        let stream = lex("λx");
        assert_eq!(
            stream.kinds(),
            vec![TokenKind::Unknown, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(stream.tokens()[0].lexeme, "λ");
        assert_eq!(stream.tokens()[1].position, Position::new(1, 1, 2));
    }

    #[test]
    fn test_eof_offset_equals_character_count() {
        let source = "#bind(a, b) -> vec<2>\nspan[0..1] := nil;\n";
        let stream = lex(source);
        let eof = stream.last().unwrap();
        assert_eq!(eof.position.offset, source.chars().count());
        assert_eq!(eof.position.line, 1 + source.matches('\n').count() as u32);
    }

    #[test]
    fn test_no_token_loss_across_growth() {
        let source = "a ".repeat(500);
        let mut analyzer = LexicalAnalyzer::new();
        let stream = analyzer.tokenize(&source).unwrap();

        assert_eq!(stream.len(), 501);
        assert_eq!(analyzer.metrics().total_tokens + 1, stream.len());
        assert!(analyzer.metrics().buffer_growths >= 4);
        assert!(validation::validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_token_limit_aborts_pass() {
        let mut analyzer = LexicalAnalyzer::new().with_token_limit(3);
        let result = analyzer.tokenize("a b c");

        assert_matches!(
            result,
            Err(LexerError::Buffer(TokenBufferError::CapacityExceeded { limit: 3 }))
        );
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::lexical::TOKEN_LIMIT_EXCEEDED
        );
    }

    #[test]
    fn test_integer_overflow_keeps_token() {
        let stream = lex("x := 99999999999999999999\n");
        assert_eq!(
            stream.kinds(),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );

        let number = &stream.tokens()[2];
        assert_eq!(number.lexeme, "99999999999999999999");
        assert_eq!(number.literal, Some(Literal::Integer(i64::MAX)));
        assert!(validation::validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_non_finite_float_keeps_token() {
        let source = format!("{}.0", "9".repeat(400));
        let stream = lex(&source);

        assert_eq!(stream.kinds(), vec![TokenKind::Float, TokenKind::Eof]);
        assert_eq!(stream.tokens()[0].lexeme, source);
        assert!(stream.tokens()[0].is_out_of_range());
        assert_eq!(stream.last().unwrap().position.offset, source.len());
    }

    #[test]
    fn test_metrics() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer
            .tokenize("let counter := 1.5\nvec @ 2")
            .unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 8);
        assert_eq!(metrics.keyword_tokens, 2);
        assert_eq!(metrics.identifier_tokens, 1);
        assert_eq!(metrics.max_identifier_length, 7);
        assert_eq!(metrics.float_literals, 1);
        assert_eq!(metrics.integer_literals, 1);
        assert_eq!(metrics.structural_tokens, 1);
        assert_eq!(metrics.newline_tokens, 1);
        assert_eq!(metrics.unknown_tokens, 1);
    }

    #[test]
    fn test_metrics_without_detail() {
        let preferences = LexicalPreferences {
            report_unknown_characters: false,
            collect_detailed_metrics: false,
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer.tokenize("let x @").unwrap();

        assert_eq!(analyzer.metrics().total_tokens, 3);
        assert_eq!(analyzer.metrics().unknown_tokens, 1);
        assert_eq!(analyzer.metrics().keyword_tokens, 0);
    }

    #[test]
    fn test_directive_lookahead() {
        assert_eq!(directive_at("#bind("), Some((TokenKind::Bind, 5)));
        assert_eq!(directive_at("#binder"), None);
        assert_eq!(directive_at("#1"), None);
        assert_eq!(directive_at("bind"), None);
    }
}
