use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    expr::{
        expect_number, expect_string, parse_column_name_list, parse_column_ref, parse_expr,
        parse_expr_list, parse_function_name,
    },
    hints::parse_hint_clause,
    lookups::BindingPower,
    parser::{PResult, Parser},
    query::{
        parse_alias, parse_limit_clause, parse_order_by_clause, parse_partition_selection,
        parse_select_stmt, parse_table_name, parse_table_refs, parse_where_clause,
        parse_with_clause,
    },
    types::parse_charset_clause,
};

/// `INSERT` and `REPLACE`.
pub fn parse_insert_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    let kind = if parser.current_token().is_keyword(Keyword::Replace) {
        NodeKind::ReplaceStmt
    } else {
        NodeKind::InsertStmt
    };

    parser.advance_as_keyword();
    parse_hint_clause(parser)?;
    parser.eat_any_keyword(&[Keyword::LowPriority, Keyword::Delayed, Keyword::HighPriority]);
    parser.eat_keyword(Keyword::Ignore);
    parser.eat_keyword(Keyword::Into);

    parse_table_name(parser)?;
    if parser.at_keyword(Keyword::Partition) {
        parse_partition_selection(parser)?;
    }

    // `(` opens the column list unless a query starts inside it.
    if parser.current_token_kind() == TokenKind::OpenParen && !parser.at_query_start(0) {
        parse_column_name_list(parser)?;
    }

    if parser.at_any_keyword(&[Keyword::Values, Keyword::Value]) {
        parse_values_list(parser)?;
        if parser.at_keyword(Keyword::As) {
            parse_alias(parser)?;
            if parser.current_token_kind() == TokenKind::OpenParen {
                parse_column_name_list(parser)?;
            }
        }
    } else if parser.at_keyword(Keyword::Set) {
        parser.advance_as_keyword();
        parse_assignment_list(parser)?;
    } else {
        parse_select_stmt(parser)?;
    }

    if parser.at_keyword(Keyword::On) {
        let on_duplicate = parser.checkpoint();
        parser.expect_keywords(&[Keyword::On, Keyword::Duplicate, Keyword::Key, Keyword::Update])?;
        parse_assignment_list(parser)?;
        parser.finish(on_duplicate, NodeKind::OnDuplicateKeyUpdate);
    }

    parser.finish(checkpoint, kind);
    Ok(())
}

/// `VALUES (...), (...)` or `VALUES ROW(...), ...`
fn parse_values_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();

    loop {
        let row = parser.checkpoint();
        parser.eat_keyword(Keyword::Row);
        parser.expect(TokenKind::OpenParen)?;
        if !parser.at(TokenKind::CloseParen) {
            parse_expr_list(parser)?;
        }
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(row, NodeKind::RowValue);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::ValuesList);
    Ok(())
}

/// `col = expr, ...`
pub fn parse_assignment_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_assignment(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_assignment(parser)?;
    }
    parser.finish(checkpoint, NodeKind::AssignmentList);
    Ok(())
}

fn parse_assignment(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_column_ref(parser)?;
    if !parser.eat(TokenKind::Assignment) {
        parser.expect(TokenKind::Equals)?;
    }
    parse_expr(parser, BindingPower::Default)?;
    parser.finish(checkpoint, NodeKind::Assignment);
    Ok(())
}

pub fn parse_update_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if parser.at_keyword(Keyword::With) {
        parse_with_clause(parser)?;
    }

    parser.expect_keyword(Keyword::Update)?;
    parse_hint_clause(parser)?;
    parser.eat_keyword(Keyword::LowPriority);
    parser.eat_keyword(Keyword::Ignore);

    parse_table_refs(parser)?;
    parser.expect_keyword(Keyword::Set)?;
    parse_assignment_list(parser)?;

    if parser.at_keyword(Keyword::Where) {
        parse_where_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Order) {
        parse_order_by_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Limit) {
        parse_limit_clause(parser)?;
    }

    parser.finish(checkpoint, NodeKind::UpdateStmt);
    Ok(())
}

/// Single table `DELETE FROM t ...`, and the multi-table forms
/// `DELETE t1, t2 FROM refs ...` and `DELETE FROM t1, t2 USING refs ...`.
pub fn parse_delete_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if parser.at_keyword(Keyword::With) {
        parse_with_clause(parser)?;
    }

    parser.expect_keyword(Keyword::Delete)?;
    parse_hint_clause(parser)?;
    while parser.eat_any_keyword(&[Keyword::LowPriority, Keyword::Quick, Keyword::Ignore]) {}

    if parser.at_keyword(Keyword::From) {
        if !parser.speculate(parse_delete_using_tail) {
            parse_delete_single_tail(parser)?;
        }
    } else {
        parse_delete_targets(parser)?;
        parser.expect_keyword(Keyword::From)?;
        parse_table_refs(parser)?;
        if parser.at_keyword(Keyword::Where) {
            parse_where_clause(parser)?;
        }
    }

    parser.finish(checkpoint, NodeKind::DeleteStmt);
    Ok(())
}

fn parse_delete_using_tail(parser: &mut Parser) -> PResult {
    parser.expect_keyword(Keyword::From)?;
    parse_delete_targets(parser)?;
    parser.expect_keyword(Keyword::Using)?;
    parse_table_refs(parser)?;
    if parser.at_keyword(Keyword::Where) {
        parse_where_clause(parser)?;
    }
    Ok(())
}

fn parse_delete_single_tail(parser: &mut Parser) -> PResult {
    parser.expect_keyword(Keyword::From)?;
    parse_table_name(parser)?;
    parse_alias(parser)?;
    if parser.at_keyword(Keyword::Partition) {
        parse_partition_selection(parser)?;
    }
    if parser.at_keyword(Keyword::Where) {
        parse_where_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Order) {
        parse_order_by_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Limit) {
        parse_limit_clause(parser)?;
    }
    Ok(())
}

/// `t1[.*], t2[.*]` naming the tables rows are deleted from.
fn parse_delete_targets(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    loop {
        parse_table_name(parser)?;
        if parser.current_token_kind() == TokenKind::Dot && parser.nth_kind(1) == TokenKind::Star {
            parser.advance();
            parser.advance();
        }
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }
    parser.finish(checkpoint, NodeKind::TableNameList);
    Ok(())
}

/// `LOAD DATA [LOCAL] INFILE 'file' INTO TABLE t ...`
pub fn parse_load_data_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Load, Keyword::Data])?;
    parser.eat_any_keyword(&[Keyword::LowPriority, Keyword::Concurrent]);
    parser.eat_keyword(Keyword::Local);
    parser.expect_keyword(Keyword::Infile)?;
    expect_string(parser)?;
    parser.eat_any_keyword(&[Keyword::Replace, Keyword::Ignore]);
    parser.expect_keywords(&[Keyword::Into, Keyword::Table])?;
    parse_table_name(parser)?;

    if parser.at_keyword(Keyword::Partition) {
        parse_partition_selection(parser)?;
    }
    if parser.at_keyword(Keyword::Character) || parser.at_keyword(Keyword::Charset) {
        parse_charset_clause(parser)?;
    }
    if parser.at_any_keyword(&[Keyword::Fields, Keyword::Columns]) {
        parse_fields_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Lines) {
        parse_lines_clause(parser)?;
    }
    if parser.eat_keyword(Keyword::Ignore) {
        expect_number(parser)?;
        parser.expect_any_keyword(&[Keyword::Lines, Keyword::Rows])?;
    }
    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_load_column_list(parser)?;
    }
    if parser.eat_keyword(Keyword::Set) {
        parse_assignment_list(parser)?;
    }

    parser.finish(checkpoint, NodeKind::LoadDataStmt);
    Ok(())
}

/// Target columns of LOAD DATA; user variables may stand in for columns.
fn parse_load_column_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;
    let mut first = true;
    while !parser.at(TokenKind::CloseParen) {
        if !first {
            parser.expect(TokenKind::Comma)?;
        }
        if !parser.eat(TokenKind::UserVariable) {
            parser.expect_identifier()?;
        }
        first = false;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::ColumnNameList);
    Ok(())
}

/// `FIELDS|COLUMNS [TERMINATED BY s] [[OPTIONALLY] ENCLOSED BY c]
/// [ESCAPED BY c]`
pub fn parse_fields_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_any_keyword(&[Keyword::Fields, Keyword::Columns])?;

    let mut options = 0;
    loop {
        if parser.eat_keyword(Keyword::Terminated) {
            parser.expect_keyword(Keyword::By)?;
        } else if parser.eat_keyword(Keyword::Optionally) {
            parser.expect_keywords(&[Keyword::Enclosed, Keyword::By])?;
        } else if parser.eat_keyword(Keyword::Enclosed) || parser.eat_keyword(Keyword::Escaped) {
            parser.expect_keyword(Keyword::By)?;
        } else {
            break;
        }
        expect_string(parser)?;
        options += 1;
    }
    if options == 0 {
        return parser.unexpected();
    }

    parser.finish(checkpoint, NodeKind::FieldsClause);
    Ok(())
}

/// `LINES [STARTING BY s] [TERMINATED BY s]`
pub fn parse_lines_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Lines)?;

    let mut options = 0;
    while parser.eat_any_keyword(&[Keyword::Starting, Keyword::Terminated]) {
        parser.expect_keyword(Keyword::By)?;
        expect_string(parser)?;
        options += 1;
    }
    if options == 0 {
        return parser.unexpected();
    }

    parser.finish(checkpoint, NodeKind::LinesClause);
    Ok(())
}

/// `CALL [db.]proc[(args)]`
pub fn parse_call_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Call)?;
    parse_function_name(parser)?;
    if parser.eat(TokenKind::OpenParen) {
        if !parser.at(TokenKind::CloseParen) {
            parse_expr_list(parser)?;
        }
        parser.expect(TokenKind::CloseParen)?;
    }
    parser.finish(checkpoint, NodeKind::CallStmt);
    Ok(())
}

pub fn parse_do_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Do)?;
    parse_expr_list(parser)?;
    parser.finish(checkpoint, NodeKind::DoStmt);
    Ok(())
}
