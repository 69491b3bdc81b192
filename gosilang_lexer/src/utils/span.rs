//! Source location tracking for the Gosilang lexer
//!
//! Positions count characters, not bytes: every consumed character moves the
//! offset by one and the column by one, and a newline moves to column 1 of the
//! next line. Tokens record the position where their lexeme starts.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
    /// Character offset from start of input (0-based)
    pub offset: usize,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                line: self.line + 1,
                column: 1,
                offset: self.offset + 1,
            },
            _ => Self {
                line: self.line,
                column: self.column + 1,
                offset: self.offset + 1,
            },
        }
    }

    /// Advance position over every character of a consumed slice
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering one character at `pos`
    pub fn single(pos: Position, ch: char) -> Self {
        Self {
            start: pos,
            end: pos.advance(ch),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.offset >= self.start.offset && pos.offset < self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start();
        assert_eq!(pos, Position::new(0, 1, 1));

        let pos = pos.advance('a');
        assert_eq!(pos, Position::new(1, 1, 2));

        let pos = pos.advance('\n');
        assert_eq!(pos, Position::new(2, 2, 1));
    }

    #[test]
    fn test_tab_is_one_column() {
        let pos = Position::start().advance('\t');
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 1);
    }

    #[test]
    fn test_non_ascii_counts_as_one_character() {
        let pos = Position::start().advance_str("λé");
        assert_eq!(pos, Position::new(2, 1, 3));
    }

    #[test]
    fn test_offset_and_line_track_consumed_text() {
        let text = "let x := 1\n\nvec<3>\r\n!bind\n";
        let mut pos = Position::start();
        let mut consumed = 0usize;
        let mut newlines = 0u32;

        for ch in text.chars() {
            pos = pos.advance(ch);
            consumed += 1;
            if ch == '\n' {
                newlines += 1;
            }
            assert_eq!(pos.offset, consumed);
            assert_eq!(pos.line, 1 + newlines);
        }

        assert_eq!(Position::start().advance_str(text), pos);
    }

    #[test]
    fn test_span_operations() {
        let start = Position::new(3, 1, 4);
        let end = start.advance_str("span");
        let span = Span::new(start, end);

        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(span.contains(Position::new(5, 1, 6)));
        assert!(!span.contains(end));
        assert_eq!(span.to_string(), "1:4-8");
    }

    #[test]
    fn test_single_char_span() {
        let span = Span::single(Position::start(), '@');
        assert_eq!(span.len(), 1);
        assert_eq!(span.end().column, 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(10, 3, 7).to_string(), "3:7");
    }
}
