//! Token model for Gosilang
//!
//! A token is a classified lexeme with its start position. The lexeme is owned,
//! so a token stream outlives the source buffer it was scanned from. Numeric
//! tokens carry their parsed value.
use crate::utils::{Position, Span};
use serde::{Serialize, Serializer};
use std::fmt;
use std::num::IntErrorKind;

/// Closed set of token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Structural symbols
    Bang,
    Hash,
    Assign,
    Equal,
    Arrow,
    LParen,
    RParen,
    Lt,
    Gt,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    DotDot,

    // Keywords
    Def,
    Bind,
    Unbind,
    Span,
    Range,
    Vec,
    Nil,
    Null,
    Let,

    // Literals
    Identifier,
    Integer,
    Float,

    // Control
    Newline,
    Eof,
    Unknown,
}

impl TokenKind {
    /// Stable display name, used for rendering only
    pub fn name(self) -> &'static str {
        match self {
            Self::Bang => "BANG",
            Self::Hash => "HASH",
            Self::Assign => "ASSIGN",
            Self::Equal => "EQUAL",
            Self::Arrow => "ARROW",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Comma => "COMMA",
            Self::Colon => "COLON",
            Self::Semicolon => "SEMICOLON",
            Self::DotDot => "DOT_DOT",
            Self::Def => "DEF",
            Self::Bind => "BIND",
            Self::Unbind => "UNBIND",
            Self::Span => "SPAN",
            Self::Range => "RANGE",
            Self::Vec => "VEC",
            Self::Nil => "NIL",
            Self::Null => "NULL",
            Self::Let => "LET",
            Self::Identifier => "IDENTIFIER",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Newline => "NEWLINE",
            Self::Eof => "EOF",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn token_class(self) -> TokenClass {
        match self {
            Self::Def
            | Self::Bind
            | Self::Unbind
            | Self::Span
            | Self::Range
            | Self::Vec
            | Self::Nil
            | Self::Null
            | Self::Let => TokenClass::Keyword,
            Self::Identifier => TokenClass::Identifier,
            Self::Integer | Self::Float => TokenClass::Literal,
            Self::Newline | Self::Eof | Self::Unknown => TokenClass::Control,
            _ => TokenClass::Structural,
        }
    }

    pub fn is_keyword(self) -> bool {
        self.token_class() == TokenClass::Keyword
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Directive keywords are spelled with a leading `#`
    pub fn is_directive(self) -> bool {
        matches!(self, Self::Def | Self::Bind | Self::Unbind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Coarse token classification used for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Punctuation and operators
    Structural,
    Keyword,
    Identifier,
    /// Integer and float literals
    Literal,
    /// Newline, end of input, unrecognized characters
    Control,
}

/// Parsed payload of a numeric token
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

/// A classified lexeme with its start position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub literal: Option<Literal>,
}

impl Token {
    /// Build a token from a matched slice and the position where it starts.
    /// INTEGER and FLOAT lexemes are parsed into their literal value; a value
    /// that does not fit is clamped and the lexeme is kept as written.
    pub fn new(kind: TokenKind, lexeme: &str, position: Position) -> Self {
        let literal = match kind {
            TokenKind::Integer => Some(Literal::Integer(parse_integer(lexeme))),
            TokenKind::Float => Some(Literal::Float(parse_float(lexeme))),
            _ => None,
        };

        Self {
            kind,
            lexeme: lexeme.to_string(),
            position,
            literal,
        }
    }

    /// End-of-input marker with an empty lexeme
    pub fn eof(position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            position,
            literal: None,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.position.advance_str(&self.lexeme))
    }

    /// Value type shown in the token table
    pub fn value_type(&self) -> &'static str {
        match self.literal {
            Some(Literal::Integer(_)) => "int",
            Some(Literal::Float(_)) => "float",
            None => "string",
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Numeric lexeme whose literal was clamped: an integer saturated at
    /// `i64::MAX` or a float that is infinite
    pub fn is_out_of_range(&self) -> bool {
        match self.literal {
            Some(Literal::Integer(i64::MAX)) => self.lexeme.parse::<i64>().is_err(),
            Some(Literal::Float(value)) => !value.is_finite(),
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.lexeme, self.position)
    }
}

// Digit runs only reach here, so positive overflow is the one parse failure
fn parse_integer(lexeme: &str) -> i64 {
    match lexeme.parse::<i64>() {
        Ok(value) => value,
        Err(error) if *error.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(_) => 0,
    }
}

// Overly long mantissas parse to infinity rather than failing
fn parse_float(lexeme: &str) -> f64 {
    lexeme.parse::<f64>().unwrap_or(0.0)
}

// === CLASSIFICATION TABLES ===

/// Reserved words, matched by exact equality against the whole lexeme
pub const KEYWORDS: [(&str, TokenKind); 9] = [
    ("#def", TokenKind::Def),
    ("#bind", TokenKind::Bind),
    ("#unbind", TokenKind::Unbind),
    ("span", TokenKind::Span),
    ("range", TokenKind::Range),
    ("vec", TokenKind::Vec),
    ("nil", TokenKind::Nil),
    ("null", TokenKind::Null),
    ("let", TokenKind::Let),
];

pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, kind)| *kind)
}

/// Classify a maximal identifier run as keyword or identifier
pub fn classify_word(word: &str) -> TokenKind {
    keyword_kind(word).unwrap_or(TokenKind::Identifier)
}

pub fn two_char_kind(first: char, second: char) -> Option<TokenKind> {
    match (first, second) {
        (':', '=') => Some(TokenKind::Assign),
        ('-', '>') => Some(TokenKind::Arrow),
        ('.', '.') => Some(TokenKind::DotDot),
        _ => None,
    }
}

pub fn single_char_kind(ch: char) -> Option<TokenKind> {
    match ch {
        '!' => Some(TokenKind::Bang),
        '#' => Some(TokenKind::Hash),
        '=' => Some(TokenKind::Equal),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '<' => Some(TokenKind::Lt),
        '>' => Some(TokenKind::Gt),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        ';' => Some(TokenKind::Semicolon),
        _ => None,
    }
}
