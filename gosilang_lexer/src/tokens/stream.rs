//! Read-only token stream produced by a completed lexing pass
use super::token::{Token, TokenKind};
use serde::Serialize;

/// Ordered tokens in scan order, always terminated by EOF when produced by the lexer.
/// Serializes as `{"tokens": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|t| t.kind == kind).count()
    }

    pub fn has_eof(&self) -> bool {
        self.last().map_or(false, Token::is_eof)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Validation functions for position accuracy
pub mod validation {
    use super::*;

    /// Tokens must not overlap and must appear in source order
    pub fn validate_position_order(tokens: &[Token]) -> Result<(), String> {
        for window in tokens.windows(2) {
            let current = window[0].span();
            let next = window[1].position;

            if current.end.offset > next.offset {
                return Err(format!(
                    "Position order violation: {} ending at offset {} overlaps {} at offset {}",
                    window[0].kind, current.end.offset, window[1].kind, next.offset
                ));
            }
        }
        Ok(())
    }

    /// Exactly one EOF, in last place, with an empty lexeme
    pub fn validate_termination(tokens: &[Token]) -> Result<(), String> {
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
        if eof_count != 1 {
            return Err(format!("Expected exactly one EOF token, found {}", eof_count));
        }

        match tokens.last() {
            Some(last) if last.is_eof() && last.lexeme.is_empty() => Ok(()),
            Some(last) => Err(format!("Stream ends with {} instead of EOF", last.kind)),
            None => Err("Stream is empty".to_string()),
        }
    }

    pub fn validate_token_stream(stream: &TokenStream) -> Result<(), String> {
        validate_position_order(stream.tokens())?;
        validate_termination(stream.tokens())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use crate::utils::Position;

    fn token(kind: TokenKind, lexeme: &str, offset: usize) -> Token {
        Token::new(kind, lexeme, Position::new(offset, 1, offset as u32 + 1))
    }

    #[test]
    fn test_accessors() {
        let stream = TokenStream::from_tokens(vec![
            token(TokenKind::Let, "let", 0),
            token(TokenKind::Identifier, "x", 4),
            Token::eof(Position::new(5, 1, 6)),
        ]);

        assert_eq!(stream.len(), 3);
        assert!(stream.has_eof());
        assert_eq!(stream.count_of(TokenKind::Identifier), 1);
        assert_eq!(
            stream.kinds(),
            vec![TokenKind::Let, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(stream.get(1).map(|t| t.lexeme.as_str()), Some("x"));
        assert_eq!((&stream).into_iter().count(), 3);
    }

    #[test]
    fn test_valid_stream_passes() {
        let stream = TokenStream::from_tokens(vec![
            token(TokenKind::Identifier, "ab", 0),
            token(TokenKind::Assign, ":=", 2),
            Token::eof(Position::new(4, 1, 5)),
        ]);
        assert!(validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_overlap_is_reported() {
        let tokens = vec![
            token(TokenKind::Identifier, "abc", 0),
            token(TokenKind::Identifier, "c", 2),
        ];
        assert!(validate_position_order(&tokens).is_err());
    }

    #[test]
    fn test_missing_or_duplicate_eof_is_reported() {
        let no_eof = vec![token(TokenKind::Identifier, "a", 0)];
        assert!(validate_termination(&no_eof).is_err());

        let twice = vec![
            Token::eof(Position::start()),
            Token::eof(Position::start()),
        ];
        assert!(validate_termination(&twice).is_err());
        assert!(validate_termination(&[]).is_err());
    }

    #[test]
    fn test_serializes_as_tokens_object() {
        let stream = TokenStream::from_tokens(vec![Token::eof(Position::start())]);
        let value = serde_json::to_value(&stream).unwrap();
        assert_eq!(value["tokens"][0]["type"], "EOF");
        assert_eq!(value["tokens"][0]["lexeme"], "");
    }
}
