//! Shared source-location types used by the lexer, the token model and logging.

pub mod span;

pub use span::{Position, Span};
