#![allow(clippy::module_inception)]

use std::{fmt::Display, ops::Range};

use serde::Serialize;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use crate::config::config::{ParserConfig, SqlMode};
pub use crate::lexer::charset::Charset;
pub use crate::parser::parser::ParseResult;

/// Half-open byte range `[start, end)` into the original input buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line and column (in bytes) of a token's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Parses a UTF-8 batch with the default configuration.
pub fn parse(sql: &str) -> ParseResult {
    parse_with(sql.as_bytes(), &ParserConfig::default())
}

/// Parses a raw input buffer under an explicit configuration. The buffer is
/// interpreted in `config.charset`; spans always index into `input`.
pub fn parse_with(input: &[u8], config: &ParserConfig) -> ParseResult {
    let stream = lexer::lexer::tokenize(input, config);
    parser::parser::parse(stream, config)
}

/// Finds the line holding the byte `position` of a raw input buffer.
///
/// Returns the 1-based line number and the byte range of the line without
/// its newline. A position at the very end of the input resolves to the
/// last line.
pub fn get_line_at_position(input: &[u8], position: usize) -> Option<(usize, Range<usize>)> {
    if position > input.len() {
        return None;
    }

    let start = input[..position]
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |newline| newline + 1);
    let end = input[position..]
        .iter()
        .position(|&byte| byte == b'\n')
        .map_or(input.len(), |offset| position + offset);
    let line_number = input[..start].iter().filter(|&&byte| byte == b'\n').count() + 1;

    Some((line_number, start..end))
}

/// Renders an error as a caret diagram under the offending line of UTF-8
/// source:
///
/// ```text
/// Error: UnexpectedToken (Unexpected `FORM`, expected ...)
///   |
/// 1 | SELECT a FORM t
///   | ---------^
/// ```
pub fn render_caret(source: &str, error: &Error) -> String {
    render_caret_in(source.as_bytes(), Charset::Utf8mb4, error)
}

/// Like [`render_caret`] for a raw buffer encoded in `charset`. Spans are
/// byte offsets, so the line is located in the raw bytes and the caret
/// column counts decoded characters.
pub fn render_caret_in(input: &[u8], charset: Charset, error: &Error) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }

    let position = error.get_span().start;
    let Some((line, range)) = get_line_at_position(input, position) else {
        return out;
    };

    let line_text = charset.decode(&input[range.clone()]);
    let column = charset.decode(&input[range.start..position]).chars().count();

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

/// Strips leading blanks, returning the rest and how many characters went.
fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = b"SELECT 1;\nSELECT\n  a FORM t;\n";

        let (line_number, range) = get_line_at_position(source, 7).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(&source[range], b"SELECT 1;");

        let (line_number, range) = get_line_at_position(source, 21).unwrap();
        assert_eq!(line_number, 3);
        assert_eq!(range.start, 17);
        assert_eq!(&source[range], b"  a FORM t;");

        let (line_number, range) = get_line_at_position(source, source.len()).unwrap();
        assert_eq!(line_number, 4);
        assert!(range.is_empty());

        assert!(get_line_at_position(source, 400).is_none());
    }

    #[test]
    fn test_render_caret_points_at_error() {
        let source = "SELECT a FORM t";
        let result = parse(source);
        let error = &result.errors()[0];

        let rendered = render_caret(source, error);
        assert!(rendered.starts_with("Error: UnexpectedToken"));
        assert!(rendered.contains("1 | SELECT a FORM t"));
        assert!(rendered.contains("----------^"));
    }

    #[test]
    fn test_render_caret_counts_decoded_characters() {
        let input = b"SELECT '\xe9\xe9\xe9', FROM t";
        let config = ParserConfig::default().with_charset(Charset::Latin1);
        let result = parse_with(input, &config);
        let error = &result.errors()[0];
        assert_eq!(error.get_span().start, 14);

        let rendered = render_caret_in(input, Charset::Latin1, error);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "1 | SELECT '\u{e9}\u{e9}\u{e9}', FROM t");
        assert_eq!(lines[3], format!("  | {}^", "-".repeat(14)));
    }

    #[test]
    fn test_render_caret_skips_indentation() {
        let source = "SELECT 1;\n    SELEC 2;";
        let result = parse(source);

        let rendered = render_caret(source, &result.errors()[0]);
        assert!(rendered.contains("2 | SELEC 2;\n"));
        assert!(rendered.ends_with("  | ^\n"));
    }

    #[test]
    fn test_span_display_and_cover() {
        let span = Span::new(3, 7).cover(Span::new(1, 4));
        assert_eq!(span, Span::new(1, 7));
        assert_eq!(span.to_string(), "1..7");
        assert_eq!(span.len(), 6);
    }
}
