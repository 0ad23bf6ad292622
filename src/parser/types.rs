//! Data type parsing.
//!
//! Column definitions accept the full set of SQL column types with their
//! attributes (`UNSIGNED`, `ZEROFILL`, charset and collation). `CAST` and
//! `CONVERT` accept the narrower cast target set, optionally marked as
//! `ARRAY` for multi-valued indexes.

use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    expr::{expect_number, expect_string, parse_charset_name},
    parser::{PResult, Parser},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeFlavor {
    Column,
    Cast,
}

pub fn parse_data_type(parser: &mut Parser, flavor: DataTypeFlavor) -> PResult {
    let checkpoint = parser.checkpoint();

    match flavor {
        DataTypeFlavor::Column => parse_column_type(parser)?,
        DataTypeFlavor::Cast => {
            parse_cast_type(parser)?;
            parser.eat_keyword(Keyword::Array);
        }
    }

    parser.finish(checkpoint, NodeKind::DataType);
    Ok(())
}

fn parse_column_type(parser: &mut Parser) -> PResult {
    let Some(keyword) = parser.current_keyword() else {
        return parser.expected("data type");
    };

    match keyword {
        Keyword::Tinyint
        | Keyword::Smallint
        | Keyword::Mediumint
        | Keyword::Int
        | Keyword::Integer
        | Keyword::Bigint => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
            parse_numeric_attributes(parser);
        }
        Keyword::Decimal | Keyword::Numeric | Keyword::Fixed | Keyword::Float | Keyword::Real => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
            parse_numeric_attributes(parser);
        }
        Keyword::Double => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Precision);
            parse_optional_length(parser)?;
            parse_numeric_attributes(parser);
        }
        Keyword::Bit | Keyword::Time | Keyword::Datetime | Keyword::Timestamp | Keyword::Year => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
        }
        Keyword::Bool | Keyword::Boolean | Keyword::Serial | Keyword::Date | Keyword::Json => {
            parser.advance_as_keyword();
        }
        Keyword::National => {
            parser.advance_as_keyword();
            parse_string_type(parser)?;
        }
        Keyword::Char | Keyword::Character | Keyword::Varchar => parse_string_type(parser)?,
        Keyword::Binary | Keyword::Varbinary | Keyword::Blob => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
        }
        Keyword::Tinyblob | Keyword::Mediumblob | Keyword::Longblob => {
            parser.advance_as_keyword();
        }
        Keyword::Text => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
            parse_string_attributes(parser)?;
        }
        Keyword::Tinytext | Keyword::Mediumtext | Keyword::Longtext => {
            parser.advance_as_keyword();
            parse_string_attributes(parser)?;
        }
        Keyword::Enum | Keyword::Set => {
            parser.advance_as_keyword();
            parse_enum_value_list(parser)?;
            parse_string_attributes(parser)?;
        }
        _ => return parser.expected("data type"),
    }

    Ok(())
}

/// `CHAR [VARYING] [(n)]`, `CHARACTER [VARYING] [(n)]`, `VARCHAR(n)` with
/// their charset and collation.
fn parse_string_type(parser: &mut Parser) -> PResult {
    if parser.eat_keyword(Keyword::Varchar) {
        parse_optional_length(parser)?;
    } else {
        parser.expect_any_keyword(&[Keyword::Char, Keyword::Character])?;
        parser.eat_keyword(Keyword::Varying);
        parse_optional_length(parser)?;
    }
    parse_string_attributes(parser)
}

fn parse_cast_type(parser: &mut Parser) -> PResult {
    let Some(keyword) = parser.current_keyword() else {
        return parser.expected("data type");
    };

    match keyword {
        Keyword::Binary | Keyword::Char | Keyword::Character | Keyword::Varchar => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
            parse_string_attributes(parser)?;
        }
        Keyword::National => {
            parser.advance_as_keyword();
            parser.expect_any_keyword(&[Keyword::Char, Keyword::Character])?;
            parse_optional_length(parser)?;
        }
        Keyword::Signed | Keyword::Unsigned => {
            parser.advance_as_keyword();
            parser.eat_any_keyword(&[Keyword::Int, Keyword::Integer]);
        }
        Keyword::Decimal | Keyword::Float | Keyword::Time | Keyword::Datetime => {
            parser.advance_as_keyword();
            parse_optional_length(parser)?;
        }
        Keyword::Double => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Precision);
        }
        Keyword::Date | Keyword::Json | Keyword::Real | Keyword::Year => {
            parser.advance_as_keyword();
        }
        _ => return parser.expected("data type"),
    }

    Ok(())
}

/// `(n)` or `(m, d)`
fn parse_optional_length(parser: &mut Parser) -> PResult {
    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(());
    }

    let checkpoint = parser.checkpoint();
    parser.advance();
    expect_number(parser)?;
    if parser.eat(TokenKind::Comma) {
        expect_number(parser)?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::TypeLength);
    Ok(())
}

fn parse_numeric_attributes(parser: &mut Parser) {
    while parser.eat_any_keyword(&[Keyword::Unsigned, Keyword::Signed, Keyword::Zerofill]) {}
}

/// `[BINARY] [CHARACTER SET cs | CHARSET cs | ASCII] [COLLATE c]`
fn parse_string_attributes(parser: &mut Parser) -> PResult {
    loop {
        if parser.eat_keyword(Keyword::Binary) || parser.eat_keyword(Keyword::Ascii) {
            continue;
        }
        if parser.at_keyword(Keyword::Character) && parser.nth_is_keyword(1, Keyword::Set)
            || parser.at_keyword(Keyword::Charset)
        {
            parse_charset_clause(parser)?;
            continue;
        }
        if parser.at_keyword(Keyword::Collate) {
            parse_collate_clause(parser)?;
            continue;
        }
        return Ok(());
    }
}

/// `CHARACTER SET cs` or `CHARSET cs`, with an optional `=` in table and
/// database options.
pub fn parse_charset_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if !parser.eat_keyword(Keyword::Charset) {
        parser.expect_keywords(&[Keyword::Character, Keyword::Set])?;
    }
    parser.eat(TokenKind::Equals);
    parse_charset_name(parser)?;
    parser.finish(checkpoint, NodeKind::CharsetClause);
    Ok(())
}

pub fn parse_collate_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Collate)?;
    parser.eat(TokenKind::Equals);
    parse_charset_name(parser)?;
    parser.finish(checkpoint, NodeKind::CollateClause);
    Ok(())
}

/// `('a', 'b', ...)` of ENUM and SET columns.
fn parse_enum_value_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;
    expect_string(parser)?;
    while parser.eat(TokenKind::Comma) {
        expect_string(parser)?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::EnumValueList);
    Ok(())
}
