//! Stage 3 and stage 4 previews
//!
//! Neither stage parses or generates code yet. Stage 3 scans the token stream
//! for the constructs a parser will build nodes for; stage 4 lists the fixed
//! C output patterns the code generator will target.

use crate::tokens::{TokenKind, TokenStream};
use crate::utils::Position;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `!` starts an invocation
    Invocation,
    /// `#bind` or `#unbind`
    BindOperation,
    /// `vec` keyword
    VectorConstruction,
}

impl PatternKind {
    pub fn for_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(Self::Invocation),
            TokenKind::Bind | TokenKind::Unbind => Some(Self::BindOperation),
            TokenKind::Vec => Some(Self::VectorConstruction),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Invocation => "Invocation pattern starting at",
            Self::BindOperation => "Bind operation at",
            Self::VectorConstruction => "Vector construction at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    pub position: Position,
}

impl std::fmt::Display for DetectedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  → {} {}", self.kind.description(), self.position)
    }
}

/// One hit per matching token, in stream order
pub fn detect_patterns(stream: &TokenStream) -> Vec<DetectedPattern> {
    stream
        .iter()
        .filter_map(|token| {
            PatternKind::for_token(token.kind).map(|kind| DetectedPattern {
                kind,
                position: token.position,
            })
        })
        .collect()
}

pub fn render_patterns(out: &mut dyn Write, stream: Option<&TokenStream>) -> io::Result<()> {
    writeln!(out, "(Parser will build AST nodes from token stream)")?;
    writeln!(out)?;
    writeln!(out, "Detected patterns:")?;

    match stream {
        Some(stream) => {
            for pattern in detect_patterns(stream) {
                writeln!(out, "{}", pattern)?;
            }
            Ok(())
        }
        None => writeln!(out, "  (no token stream available)"),
    }
}

pub const CODEGEN_PATTERNS: [(&str, &str); 4] = [
    ("#bind()", "parallel_diff() calls"),
    ("!vec<N>()", "vec_make() + norm() calls"),
    ("span[..]", "normalize_to_span() calls"),
    ("NIL handling", "NaN or NIL_PTR checks"),
];

pub fn render_codegen_preview(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "(Will generate C skeleton from AST)")?;
    writeln!(out)?;
    writeln!(out, "Expected C output patterns:")?;

    for (source, target) in CODEGEN_PATTERNS {
        writeln!(out, "• {} → {}", source, target)?;
    }
    Ok(())
}
