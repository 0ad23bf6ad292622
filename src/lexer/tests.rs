//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, keyword candidates and identifiers
//! - Numeric, string, hex and bit literals
//! - Variables, operators and punctuation
//! - Comments, hints and executable comments
//! - Sql mode and charset effects
//! - Error cases and recovery

use rstest::rstest;

use super::{
    charset::Charset,
    keywords::Keyword,
    lexer::{tokenize, unescape_string, unquote_identifier, Lexer},
    tokens::TokenKind,
};
use crate::config::config::{ParserConfig, SqlMode};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.as_bytes(), &ParserConfig::default())
        .tokens
        .iter()
        .map(|token| token.kind)
        .collect()
}

fn kinds_with(source: &str, mode: SqlMode) -> Vec<TokenKind> {
    let config = ParserConfig::default().with_sql_mode(mode);
    tokenize(source.as_bytes(), &config)
        .tokens
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let stream = tokenize(b"select FROM Where", &ParserConfig::default());
    let tokens = stream.tokens;

    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[0].keyword, Some(Keyword::Select));
    assert_eq!(tokens[0].value, "select");
    assert_eq!(tokens[1].keyword, Some(Keyword::From));
    assert_eq!(tokens[2].keyword, Some(Keyword::Where));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert!(stream.errors.is_empty());
}

#[test]
fn test_unreserved_keyword_is_a_word_candidate() {
    let tokens = tokenize(b"begin comment foo", &ParserConfig::default()).tokens;

    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[0].keyword, Some(Keyword::Begin));
    assert_eq!(tokens[1].kind, TokenKind::Word);
    assert_eq!(tokens[1].keyword, Some(Keyword::Comment));
    assert_eq!(tokens[2].kind, TokenKind::Word);
    assert_eq!(tokens[2].keyword, None);
}

#[test]
fn test_function_names_reserved_only_with_ignore_space() {
    assert_eq!(kinds("count")[0], TokenKind::Word);

    let mode = SqlMode {
        ignore_space: true,
        ..SqlMode::default()
    };
    assert_eq!(kinds_with("count", mode)[0], TokenKind::Keyword);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize(b"foo `select` 1abc $x t1", &ParserConfig::default()).tokens;

    assert_eq!(tokens[0].kind, TokenKind::Word);
    assert_eq!(tokens[1].kind, TokenKind::QuotedIdentifier);
    assert_eq!(tokens[1].value, "`select`");
    assert_eq!(tokens[2].kind, TokenKind::Word);
    assert_eq!(tokens[2].value, "1abc");
    assert_eq!(tokens[3].kind, TokenKind::Word);
    assert_eq!(tokens[4].kind, TokenKind::Word);
    assert_eq!(tokens[4].value, "t1");
}

#[rstest]
#[case("42", TokenKind::Integer)]
#[case("3.14", TokenKind::Decimal)]
#[case(".5", TokenKind::Decimal)]
#[case("1e10", TokenKind::Float)]
#[case("2.5E-3", TokenKind::Float)]
#[case("0x1F", TokenKind::HexString)]
#[case("X'1F'", TokenKind::HexString)]
#[case("0b101", TokenKind::BitString)]
#[case("b'101'", TokenKind::BitString)]
#[case("N'abc'", TokenKind::NationalString)]
#[case("'abc'", TokenKind::String)]
#[case("\"abc\"", TokenKind::String)]
#[case("_utf8mb4", TokenKind::Introducer)]
#[case("?", TokenKind::ParamMarker)]
fn test_tokenize_literals(#[case] source: &str, #[case] expected: TokenKind) {
    let tokens = kinds(source);
    assert_eq!(tokens, vec![expected, TokenKind::EOF], "lexing {source}");
}

#[test]
fn test_number_followed_by_letters_is_identifier() {
    assert_eq!(kinds("0x1g"), vec![TokenKind::Word, TokenKind::EOF]);
    assert_eq!(kinds("_utf8mb4_bin"), vec![TokenKind::Word, TokenKind::EOF]);
}

#[test]
fn test_tokenize_strings_with_escapes() {
    let tokens = tokenize(br"'it''s' 'a\'b'", &ParserConfig::default()).tokens;

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(unescape_string(&tokens[0].value, false), "it's");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(unescape_string(&tokens[1].value, false), "a'b");
}

#[rstest]
#[case("N'caf\u{e9}'", "caf\u{e9}")]
#[case("'\u{e9}'", "\u{e9}")]
#[case("\u{e9}t\u{e9}", "\u{e9}t\u{e9}")]
#[case("Nora", "Nora")]
#[case("'open", "open")]
#[case("", "")]
fn test_unescape_string_edges(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(unescape_string(raw, false), expected);
}

#[test]
fn test_no_backslash_escapes_changes_string_extent() {
    let mode = SqlMode {
        no_backslash_escapes: true,
        ..SqlMode::default()
    };
    let config = ParserConfig::default().with_sql_mode(mode);
    let tokens = tokenize(br"'a\' 'b'", &config).tokens;

    assert_eq!(tokens[0].value, r"'a\'");
    assert_eq!(unescape_string(&tokens[0].value, true), r"a\");
    assert_eq!(tokens[1].value, "'b'");
}

#[test]
fn test_ansi_quotes_turns_double_quotes_into_identifiers() {
    let mode = SqlMode {
        ansi_quotes: true,
        ..SqlMode::default()
    };
    assert_eq!(
        kinds_with("\"col\"", mode),
        vec![TokenKind::QuotedIdentifier, TokenKind::EOF]
    );
    assert_eq!(kinds("\"col\""), vec![TokenKind::String, TokenKind::EOF]);
}

#[test]
fn test_unquote_identifier() {
    assert_eq!(unquote_identifier("`a``b`"), "a`b");
    assert_eq!(unquote_identifier("\"x\""), "x");
    assert_eq!(unquote_identifier("plain"), "plain");
}

#[test]
fn test_tokenize_variables() {
    let tokens = tokenize(
        b"@x @'quoted var' @@global.max_connections @@sql_mode",
        &ParserConfig::default(),
    )
    .tokens;

    assert_eq!(tokens[0].kind, TokenKind::UserVariable);
    assert_eq!(tokens[0].value, "@x");
    assert_eq!(tokens[1].kind, TokenKind::UserVariable);
    assert_eq!(tokens[1].value, "@'quoted var'");
    assert_eq!(tokens[2].kind, TokenKind::SystemVariable);
    assert_eq!(tokens[2].value, "@@global.max_connections");
    assert_eq!(tokens[3].kind, TokenKind::SystemVariable);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("<=> <= >= <> != << >> && || := -> ->> = < > ! ~ ^ & | + - * / % ( ) , ; ."),
        vec![
            TokenKind::NullSafeEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::NotEquals,
            TokenKind::NotEquals,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Assignment,
            TokenKind::Arrow,
            TokenKind::DoubleArrow,
            TokenKind::Equals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Not,
            TokenKind::Tilde,
            TokenKind::Caret,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("1 -- trailing\n2 # hash\n3 /* block */ 4"),
        vec![
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_double_dash_needs_whitespace() {
    assert_eq!(
        kinds("1--1"),
        vec![
            TokenKind::Integer,
            TokenKind::Dash,
            TokenKind::Dash,
            TokenKind::Integer,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_hint_only_after_statement_keyword() {
    let tokens = tokenize(b"SELECT /*+ MAX_EXECUTION_TIME(10) */ 1", &ParserConfig::default()).tokens;
    assert_eq!(tokens[1].kind, TokenKind::Hint);
    assert_eq!(tokens[1].value, "/*+ MAX_EXECUTION_TIME(10) */");

    assert_eq!(
        kinds("1 /*+ not a hint */"),
        vec![TokenKind::Integer, TokenKind::EOF]
    );
}

#[test]
fn test_executable_comment_content_is_lexed() {
    assert_eq!(
        kinds("SELECT /*!40101 SQL_NO_CACHE */ 1"),
        vec![
            TokenKind::Keyword,
            TokenKind::Word,
            TokenKind::Integer,
            TokenKind::EOF
        ]
    );
    assert_eq!(
        kinds("CREATE TABLE t (a INT /*T![auto_rand] AUTO_RANDOM */)")
            .iter()
            .filter(|kind| **kind == TokenKind::Word)
            .count(),
        3
    );
}

#[test]
fn test_spans_and_positions() {
    let tokens = tokenize(b"SELECT a,\n  bb", &ParserConfig::default()).tokens;

    assert_eq!((tokens[1].span.start, tokens[1].span.end), (7, 8));
    assert_eq!(tokens[3].value, "bb");
    assert_eq!((tokens[3].span.start, tokens[3].span.end), (12, 14));
    assert_eq!(tokens[3].position.line, 2);
    assert_eq!(tokens[3].position.column, 3);
    assert_eq!(tokens[4].span.start, 14);
}

#[test]
fn test_unterminated_string_skips_to_end_of_line() {
    let stream = tokenize(b"SELECT 'abc\nFROM t", &ParserConfig::default());

    assert_eq!(stream.tokens[1].kind, TokenKind::Invalid);
    assert_eq!(stream.tokens[1].value, "'abc");
    assert_eq!(stream.tokens[2].keyword, Some(Keyword::From));
    assert_eq!(stream.errors.len(), 1);
    assert_eq!(stream.errors[0].get_error_name(), "UnterminatedString");
}

#[test]
fn test_unterminated_comment_skips_to_eof() {
    let stream = tokenize(b"SELECT 1 /* never closed", &ParserConfig::default());

    assert_eq!(stream.tokens[2].kind, TokenKind::Invalid);
    assert_eq!(stream.tokens[3].kind, TokenKind::EOF);
    assert_eq!(stream.errors[0].get_error_name(), "UnterminatedComment");
}

#[test]
fn test_unterminated_quoted_identifier() {
    let stream = tokenize(b"SELECT `abc", &ParserConfig::default());
    assert_eq!(stream.errors[0].get_error_name(), "UnterminatedIdentifier");
}

#[test]
fn test_unrecognised_byte() {
    let stream = tokenize(b"SELECT 1 { 2", &ParserConfig::default());

    assert_eq!(stream.tokens[2].kind, TokenKind::Invalid);
    assert_eq!(stream.tokens[3].kind, TokenKind::Integer);
    assert_eq!(stream.errors[0].get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_invalid_utf8_marks_only_the_bad_sequence() {
    let stream = tokenize(b"SELECT 'a\xFFb', 1", &ParserConfig::default());

    assert_eq!(stream.errors.len(), 1);
    assert_eq!(stream.errors[0].get_error_name(), "InvalidEncoding");
    assert_eq!(stream.errors[0].get_span().start, 9);
    assert_eq!(stream.errors[0].get_span().end, 10);
    assert_eq!(stream.tokens[1].kind, TokenKind::Invalid);
    assert_eq!(stream.tokens[3].kind, TokenKind::Integer);
}

#[test]
fn test_latin1_accepts_high_bytes() {
    let config = ParserConfig::default().with_charset(Charset::Latin1);
    let stream = tokenize(b"SELECT 'caf\xE9'", &config);

    assert!(stream.errors.is_empty());
    assert_eq!(stream.tokens[1].value, "'caf\u{e9}'");
}

#[test]
fn test_utf8mb3_rejects_supplementary_characters() {
    let config = ParserConfig::default().with_charset(Charset::Utf8mb3);
    let stream = tokenize("SELECT '\u{1F600}'".as_bytes(), &config);

    assert_eq!(stream.errors.len(), 1);
    assert_eq!(stream.errors[0].get_span().len(), 4);
}

#[test]
fn test_lexer_reset() {
    let config = ParserConfig::default();
    let mut lexer = Lexer::new(b"SELECT 1", &config);

    let first: Vec<_> = lexer.by_ref().collect();
    assert_eq!(lexer.next(), None);

    lexer.reset();
    let second: Vec<_> = lexer.collect();
    assert_eq!(first, second);
}

#[test]
fn test_empty_input_is_only_eof() {
    let stream = tokenize(b"", &ParserConfig::default());
    assert_eq!(stream.tokens.len(), 1);
    assert_eq!(stream.tokens[0].kind, TokenKind::EOF);
}
