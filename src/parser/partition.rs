use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    expr::{eat_equals, expect_number, expect_string, parse_column_name_list, parse_expr, parse_expr_list},
    lookups::BindingPower,
    parser::{PResult, Parser},
};

/// `PARTITION BY ... [PARTITIONS n] [SUBPARTITION BY ...] [(definitions)]`
pub fn parse_partition_options(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Partition, Keyword::By])?;
    parse_partition_method(parser)?;

    if parser.eat_keyword(Keyword::Partitions) {
        expect_number(parser)?;
    }

    if parser.at_keyword(Keyword::Subpartition) {
        let subpartition = parser.checkpoint();
        parser.expect_keywords(&[Keyword::Subpartition, Keyword::By])?;
        parse_partition_method(parser)?;
        if parser.eat_keyword(Keyword::Subpartitions) {
            expect_number(parser)?;
        }
        parser.finish(subpartition, NodeKind::SubpartitionOptions);
    }

    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_partition_definition_list(parser)?;
    }

    parser.finish(checkpoint, NodeKind::PartitionOptions);
    Ok(())
}

/// `[LINEAR] HASH (expr)`, `[LINEAR] KEY [ALGORITHM = n] (cols)`,
/// `RANGE|LIST (expr)` or `RANGE|LIST COLUMNS (cols)`.
fn parse_partition_method(parser: &mut Parser) -> PResult {
    parser.eat_keyword(Keyword::Linear);

    match parser.current_keyword() {
        Some(Keyword::Hash) => {
            parser.advance_as_keyword();
            parse_paren_expr_operand(parser)
        }
        Some(Keyword::Key) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Algorithm) {
                parser.expect(TokenKind::Equals)?;
                expect_number(parser)?;
            }
            parse_column_name_list(parser)
        }
        Some(Keyword::Range | Keyword::List) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Columns) {
                parse_column_name_list(parser)
            } else {
                parse_paren_expr_operand(parser)
            }
        }
        _ => {
            parser.at_any_keyword(&[Keyword::Hash, Keyword::Key, Keyword::Range, Keyword::List]);
            parser.unexpected()
        }
    }
}

fn parse_paren_expr_operand(parser: &mut Parser) -> PResult {
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)
}

/// `(PARTITION p0 ..., PARTITION p1 ...)`, in declaration order.
pub fn parse_partition_definition_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;
    parse_partition_definition(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_partition_definition(parser)?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::PartitionDefinitionList);
    Ok(())
}

fn parse_partition_definition(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Partition)?;
    parser.expect_identifier()?;

    if parser.at_keyword(Keyword::Values) {
        parse_partition_values(parser)?;
    }
    parse_partition_option_list(parser)?;

    if parser.eat(TokenKind::OpenParen) {
        parse_subpartition_definition(parser)?;
        while parser.eat(TokenKind::Comma) {
            parse_subpartition_definition(parser)?;
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    parser.finish(checkpoint, NodeKind::PartitionDefinition);
    Ok(())
}

/// `VALUES LESS THAN (bounds) | MAXVALUE` or `VALUES IN (values)`.
fn parse_partition_values(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Values)?;

    if parser.eat_keyword(Keyword::In) {
        parser.expect(TokenKind::OpenParen)?;
        parse_expr_list(parser)?;
        parser.expect(TokenKind::CloseParen)?;
    } else {
        parser.expect_keywords(&[Keyword::Less, Keyword::Than])?;
        if parser.at_keyword(Keyword::Maxvalue) {
            parse_max_value(parser);
        } else {
            parser.expect(TokenKind::OpenParen)?;
            loop {
                if parser.at_keyword(Keyword::Maxvalue) {
                    parse_max_value(parser);
                } else {
                    parse_expr(parser, BindingPower::Default)?;
                }
                if !parser.eat(TokenKind::Comma) {
                    break;
                }
            }
            parser.expect(TokenKind::CloseParen)?;
        }
    }

    parser.finish(checkpoint, NodeKind::PartitionValues);
    Ok(())
}

fn parse_max_value(parser: &mut Parser) {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.finish(checkpoint, NodeKind::MaxValue);
}

fn parse_subpartition_definition(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Subpartition)?;
    parser.expect_identifier()?;
    parse_partition_option_list(parser)?;
    parser.finish(checkpoint, NodeKind::SubpartitionDefinition);
    Ok(())
}

/// `[STORAGE] ENGINE`, `COMMENT`, `DATA|INDEX DIRECTORY`, `MAX_ROWS`,
/// `MIN_ROWS` and `TABLESPACE` of a partition.
fn parse_partition_option_list(parser: &mut Parser) -> PResult {
    loop {
        let checkpoint = parser.checkpoint();
        match parser.current_keyword() {
            Some(Keyword::Storage | Keyword::Engine) => {
                parser.eat_keyword(Keyword::Storage);
                parser.expect_keyword(Keyword::Engine)?;
                eat_equals(parser);
                if parser.current_token_kind() == TokenKind::String {
                    expect_string(parser)?;
                } else {
                    parser.expect_identifier()?;
                }
            }
            Some(Keyword::Comment) => {
                parser.advance_as_keyword();
                eat_equals(parser);
                expect_string(parser)?;
            }
            Some(Keyword::Data | Keyword::Index) => {
                parser.advance_as_keyword();
                parser.expect_keyword(Keyword::Directory)?;
                eat_equals(parser);
                expect_string(parser)?;
            }
            Some(Keyword::MaxRows | Keyword::MinRows) => {
                parser.advance_as_keyword();
                eat_equals(parser);
                expect_number(parser)?;
            }
            Some(Keyword::Tablespace) => {
                parser.advance_as_keyword();
                eat_equals(parser);
                parser.expect_identifier()?;
            }
            _ => return Ok(()),
        }
        parser.finish(checkpoint, NodeKind::PartitionOption);
    }
}
