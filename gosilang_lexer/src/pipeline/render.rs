//! Stage 1 and stage 2 renderers

use crate::tokens::{Token, TokenStream};
use std::io::{self, Write};

const RAW_SEPARATOR_WIDTH: usize = 16;

// Column widths including the one-space padding on each side
const TYPE_COLUMN: usize = 14;
const LEXEME_COLUMN: usize = 17;
const POSITION_COLUMN: usize = 9;
const VALUE_TYPE_COLUMN: usize = 12;

/// Which optional parts of the token view to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub show_value_type: bool,
}

fn separator() -> String {
    "─".repeat(RAW_SEPARATOR_WIDTH)
}

/// File bytes written unmodified between two separator lines. Without a
/// trailing newline the closing separator continues the last line.
pub fn render_raw(out: &mut dyn Write, content: &[u8]) -> io::Result<()> {
    writeln!(out, "Raw file content:")?;
    writeln!(out, "{}", separator())?;
    out.write_all(content)?;
    writeln!(out, "{}", separator())
}

fn border(left: &str, mid: &str, right: &str, options: TableOptions) -> String {
    let mut columns = vec![TYPE_COLUMN, LEXEME_COLUMN, POSITION_COLUMN];
    if options.show_value_type {
        columns.push(VALUE_TYPE_COLUMN);
    }

    let segments: Vec<String> = columns.iter().map(|width| "─".repeat(*width)).collect();
    format!("{}{}{}", left, segments.join(mid), right)
}

/// Control characters would break the table layout, so they print escaped
pub fn display_lexeme(lexeme: &str) -> String {
    lexeme
        .chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

fn table_row(token: &Token, options: TableOptions) -> String {
    let mut row = format!(
        "│ {:<12} │ {:<15} │ {:>4}:{:<2} │",
        token.kind.name(),
        display_lexeme(&token.lexeme),
        token.position.line,
        token.position.column
    );
    if options.show_value_type {
        row.push_str(&format!(" {:<10} │", token.value_type()));
    }
    row
}

pub fn render_token_table(
    out: &mut dyn Write,
    stream: &TokenStream,
    options: TableOptions,
) -> io::Result<()> {
    writeln!(out, "Token Table:")?;
    writeln!(out, "{}", border("┌", "┬", "┐", options))?;

    let mut header = format!("│ {:<12} │ {:<15} │ {:<7} │", "Token Type", "Lexeme", "Pos");
    if options.show_value_type {
        header.push_str(&format!(" {:<10} │", "Value Type"));
    }
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", border("├", "┼", "┤", options))?;

    for token in stream {
        writeln!(out, "{}", table_row(token, options))?;
    }

    writeln!(out, "{}", border("└", "┴", "┘", options))
}

/// `{"tokens": [...]}` as pretty-printed JSON
pub fn structured_view(stream: &TokenStream) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stream)
}
