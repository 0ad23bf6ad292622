use std::{fmt::Display, iter::Peekable, str::CharIndices};

use serde::Serialize;

use crate::{
    ast::kinds::NodeKind,
    errors::errors::ErrorImpl,
    lexer::{keywords::Keyword, lexer::unescape_string, tokens::TokenKind},
};

use super::{
    expr::{expect_string, parse_expr},
    lookups::BindingPower,
    parser::{PResult, Parser},
    types::{parse_data_type, DataTypeFlavor},
};

/// Position inside a JSON array, counted from the front or from `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrayIndex {
    Index(u64),
    /// `last - n`
    Last(u64),
}

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum JsonPathLeg {
    /// `.key` or `."key"`
    Member(String),
    /// `.*`
    MemberWildcard,
    /// `[n]`, `[last]`, `[last-n]`
    Index(ArrayIndex),
    /// `[m to n]`
    Range(ArrayIndex, ArrayIndex),
    /// `[*]`
    IndexWildcard,
    /// `**`
    DoubleWildcard,
}

impl Display for ArrayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrayIndex::Index(n) => write!(f, "{}", n),
            ArrayIndex::Last(0) => write!(f, "last"),
            ArrayIndex::Last(n) => write!(f, "last-{}", n),
        }
    }
}

impl Display for JsonPathLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonPathLeg::Member(key) => write!(f, ".{:?}", key),
            JsonPathLeg::MemberWildcard => write!(f, ".*"),
            JsonPathLeg::Index(index) => write!(f, "[{}]", index),
            JsonPathLeg::Range(from, to) => write!(f, "[{} to {}]", from, to),
            JsonPathLeg::IndexWildcard => write!(f, "[*]"),
            JsonPathLeg::DoubleWildcard => write!(f, "**"),
        }
    }
}

struct PathCursor<'p> {
    chars: Peekable<CharIndices<'p>>,
}

impl<'p> PathCursor<'p> {
    fn new(path: &'p str) -> Self {
        PathCursor {
            chars: path.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next().map(|(_, ch)| ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            return true;
        }
        false
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(format!("expected `{}` but found `{}`", expected, ch)),
            None => Err(format!("expected `{}` at the end of the path", expected)),
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let rest: String = self.chars.clone().take(word.len()).map(|(_, ch)| ch).collect();
        if rest.eq_ignore_ascii_case(word) {
            for _ in 0..word.len() {
                self.bump();
            }
            return true;
        }
        false
    }

    fn number(&mut self) -> Result<u64, String> {
        let mut digits = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.bump();
        }
        digits
            .parse()
            .map_err(|_| String::from("array index must be a non-negative integer"))
    }

    fn array_index(&mut self) -> Result<ArrayIndex, String> {
        self.skip_whitespace();
        if self.eat_word("last") {
            self.skip_whitespace();
            if self.eat('-') {
                self.skip_whitespace();
                return Ok(ArrayIndex::Last(self.number()?));
            }
            return Ok(ArrayIndex::Last(0));
        }
        Ok(ArrayIndex::Index(self.number()?))
    }

    fn member(&mut self) -> Result<JsonPathLeg, String> {
        if self.eat('*') {
            return Ok(JsonPathLeg::MemberWildcard);
        }

        if self.eat('"') {
            let mut key = String::new();
            loop {
                match self.bump() {
                    Some('"') => break,
                    Some('\\') => match self.bump() {
                        Some(ch) => key.push(ch),
                        None => return Err(String::from("unterminated quoted member")),
                    },
                    Some(ch) => key.push(ch),
                    None => return Err(String::from("unterminated quoted member")),
                }
            }
            return Ok(JsonPathLeg::Member(key));
        }

        let mut key = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                key.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        if key.is_empty() || key.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Err(String::from("member name must be an identifier or a quoted string"));
        }
        Ok(JsonPathLeg::Member(key))
    }

    fn array_leg(&mut self) -> Result<JsonPathLeg, String> {
        self.skip_whitespace();
        if self.eat('*') {
            self.skip_whitespace();
            self.expect(']')?;
            return Ok(JsonPathLeg::IndexWildcard);
        }

        let from = self.array_index()?;
        self.skip_whitespace();
        let leg = if self.eat_word("to") {
            let to = self.array_index()?;
            JsonPathLeg::Range(from, to)
        } else {
            JsonPathLeg::Index(from)
        };
        self.skip_whitespace();
        self.expect(']')?;
        Ok(leg)
    }
}

/// Parses the text of a JSON path (`$.a[0].*`) into its legs.
pub fn parse_json_path(path: &str) -> Result<Vec<JsonPathLeg>, String> {
    let mut cursor = PathCursor::new(path);
    cursor.skip_whitespace();
    if !cursor.eat('$') {
        return Err(String::from("a path must start with `$`"));
    }

    let mut legs = Vec::new();
    loop {
        cursor.skip_whitespace();
        let leg = match cursor.bump() {
            None => break,
            Some('.') => cursor.member()?,
            Some('[') => cursor.array_leg()?,
            Some('*') if cursor.eat('*') => JsonPathLeg::DoubleWildcard,
            Some(ch) => return Err(format!("unexpected `{}`", ch)),
        };
        legs.push(leg);
    }

    if legs.last() == Some(&JsonPathLeg::DoubleWildcard) {
        return Err(String::from("a path cannot end with `**`"));
    }

    Ok(legs)
}

/// A string token holding a JSON path, validated as it is consumed.
pub fn parse_json_path_literal(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    let raw = parser.current_token().value.clone();
    let no_backslash_escapes = parser.mode().no_backslash_escapes;
    if parser.current_token_kind() == TokenKind::String {
        let path = unescape_string(&raw, no_backslash_escapes);
        if let Err(message) = parse_json_path(&path) {
            return Err(parser.error_at_current(ErrorImpl::InvalidJsonPath { path, message }));
        }
    }
    expect_string(parser)?;

    parser.finish(checkpoint, NodeKind::JsonPath);
    Ok(())
}

/// `JSON_TABLE(expr, path COLUMNS (...))`
pub fn parse_json_table(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::JsonTable)?;
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    parse_json_path_literal(parser)?;
    parse_json_table_columns(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::JsonTable);
    Ok(())
}

fn parse_json_table_columns(parser: &mut Parser) -> PResult {
    parser.nested(|parser| {
        let checkpoint = parser.checkpoint();
        parser.expect_keyword(Keyword::Columns)?;
        parser.expect(TokenKind::OpenParen)?;
        parse_json_table_column(parser)?;
        while parser.eat(TokenKind::Comma) {
            parse_json_table_column(parser)?;
        }
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(checkpoint, NodeKind::JsonTableColumnList);
        Ok(())
    })
}

fn parse_json_table_column(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.at_keyword(Keyword::Nested) {
        parser.advance_as_keyword();
        parser.eat_keyword(Keyword::Path);
        parse_json_path_literal(parser)?;
        parse_json_table_columns(parser)?;
        parser.finish(checkpoint, NodeKind::JsonTableNestedColumns);
        return Ok(());
    }

    parser.expect_identifier()?;

    if parser.eat_keyword(Keyword::For) {
        parser.expect_keyword(Keyword::Ordinality)?;
        parser.finish(checkpoint, NodeKind::JsonTableOrdinalityColumn);
        return Ok(());
    }

    parse_data_type(parser, DataTypeFlavor::Column)?;
    parser.eat_keyword(Keyword::Exists);
    parser.expect_keyword(Keyword::Path)?;
    parse_json_path_literal(parser)?;

    for _ in 0..2 {
        if !parser.at_any_keyword(&[Keyword::Null, Keyword::Error, Keyword::Default]) {
            break;
        }
        parse_json_table_on_response(parser)?;
    }

    parser.finish(checkpoint, NodeKind::JsonTablePathColumn);
    Ok(())
}

/// `NULL | ERROR | DEFAULT 'json'` followed by `ON EMPTY` or `ON ERROR`.
fn parse_json_table_on_response(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if parser.eat_keyword(Keyword::Default) {
        expect_string(parser)?;
    } else {
        parser.expect_any_keyword(&[Keyword::Null, Keyword::Error])?;
    }
    parser.expect_keyword(Keyword::On)?;
    parser.expect_any_keyword(&[Keyword::Empty, Keyword::Error])?;
    parser.finish(checkpoint, NodeKind::JsonTableOnResponse);
    Ok(())
}
