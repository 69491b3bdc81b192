//! Token system for Gosilang lexical analysis
//!
//! - [`Token`] / [`TokenKind`] - classified lexemes with start positions
//! - [`TokenBuffer`] - append-only buffer the lexer fills during one pass
//! - [`TokenStream`] - the frozen, read-only result handed to later stages
//!
//! The lexer has exclusive `&mut` access to the buffer while scanning.
//! `TokenBuffer::finish` consumes it, so nothing can append after the pass.

pub mod buffer;
pub mod stream;
pub mod token;

pub use buffer::{TokenBuffer, TokenBufferError};
pub use stream::{validation, TokenStream};
pub use token::{
    classify_word, keyword_kind, single_char_kind, two_char_kind, Literal, Token, TokenClass,
    TokenKind, KEYWORDS,
};

pub use crate::utils::{Position, Span};
