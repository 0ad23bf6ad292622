//! Query statements and the clauses shared with data manipulation.
//!
//! A query is a `SelectStmt`: an optional `WITH`, a body of query blocks
//! joined by set operators, then `ORDER BY`, `LIMIT`, locking and `INTO`
//! clauses that apply to the whole body. `INTERSECT` binds tighter than
//! `UNION` and `EXCEPT`; operators of the same level associate left.

use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    dml::{parse_fields_clause, parse_lines_clause, parse_update_stmt, parse_delete_stmt},
    expr::{
        expect_string, parse_column_name_list, parse_expr, parse_expr_list, parse_identifier,
        parse_row_expr, parse_subquery,
    },
    hints::parse_hint_clause,
    json::parse_json_table,
    lookups::BindingPower,
    parser::{PResult, Parser},
};

/// Set operator precedence; `None` when the current token is not one.
fn set_operator_precedence(parser: &Parser) -> Option<u8> {
    let token = parser.current_token();
    if token.kind != TokenKind::Keyword {
        return None;
    }
    match token.keyword {
        Some(Keyword::Union | Keyword::Except) => Some(1),
        Some(Keyword::Intersect) => Some(2),
        _ => None,
    }
}

pub fn parse_select_stmt(parser: &mut Parser) -> PResult {
    parser.nested(|parser| {
        let checkpoint = parser.checkpoint();

        if parser.at_keyword(Keyword::With) {
            parse_with_clause(parser)?;
        }
        parse_query_body(parser, 1)?;

        if parser.at_keyword(Keyword::Order) {
            parse_order_by_clause(parser)?;
        }
        if parser.at_keyword(Keyword::Limit) {
            parse_limit_clause(parser)?;
        }
        parse_lock_clauses(parser)?;
        if parser.at_keyword(Keyword::Into) {
            parse_into_clause(parser)?;
        }

        parser.finish(checkpoint, NodeKind::SelectStmt);
        Ok(())
    })
}

/// `WITH` in statement position: the first query or DML keyword at depth
/// zero decides which statement the CTEs belong to.
pub fn parse_with_stmt(parser: &mut Parser) -> PResult {
    let head = parser.find_at_depth_zero(|token| {
        token.kind == TokenKind::Keyword
            && matches!(
                token.keyword,
                Some(
                    Keyword::Select
                        | Keyword::Update
                        | Keyword::Delete
                        | Keyword::Table
                        | Keyword::Values
                        | Keyword::Union
                        | Keyword::Except
                        | Keyword::Intersect
                        | Keyword::Order
                        | Keyword::Limit
                        | Keyword::For
                )
            )
    });

    match head.map(|index| parser.peek_nth(index).keyword) {
        Some(Some(Keyword::Update)) => parse_update_stmt(parser),
        Some(Some(Keyword::Delete)) => parse_delete_stmt(parser),
        _ => parse_select_stmt(parser),
    }
}

fn parse_query_body(parser: &mut Parser, min_precedence: u8) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_query_primary(parser)?;

    while let Some(precedence) = set_operator_precedence(parser) {
        if precedence < min_precedence {
            break;
        }
        parser.advance_as_keyword();
        parser.eat_any_keyword(&[Keyword::All, Keyword::Distinct]);
        parse_query_body(parser, precedence + 1)?;
        parser.finish(checkpoint, NodeKind::SetOprExpr);
    }

    Ok(())
}

fn parse_query_primary(parser: &mut Parser) -> PResult {
    if parser.at_keyword(Keyword::Select) {
        return parse_query_spec(parser);
    }
    if parser.at_keyword(Keyword::Table) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        parse_table_name(parser)?;
        parser.finish(checkpoint, NodeKind::TableStmt);
        return Ok(());
    }
    if parser.at_keyword(Keyword::Values) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        parse_row_expr(parser)?;
        while parser.eat(TokenKind::Comma) {
            parse_row_expr(parser)?;
        }
        parser.finish(checkpoint, NodeKind::ValuesStmt);
        return Ok(());
    }
    if parser.at(TokenKind::OpenParen) {
        let checkpoint = parser.checkpoint();
        parser.advance();
        parse_select_stmt(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(checkpoint, NodeKind::ParenQuery);
        return Ok(());
    }
    parser.unexpected()
}

const SELECT_OPTIONS: &[Keyword] = &[
    Keyword::All,
    Keyword::Distinct,
    Keyword::Distinctrow,
    Keyword::HighPriority,
    Keyword::StraightJoin,
    Keyword::SqlSmallResult,
    Keyword::SqlBigResult,
    Keyword::SqlBufferResult,
    Keyword::SqlCalcFoundRows,
    Keyword::SqlCache,
    Keyword::SqlNoCache,
];

fn parse_query_spec(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Select)?;
    parse_hint_clause(parser)?;

    while parser.eat_any_keyword(SELECT_OPTIONS) {}

    parse_field_list(parser)?;

    if parser.at_keyword(Keyword::Into) {
        parse_into_clause(parser)?;
    }
    if parser.at_keyword(Keyword::From) {
        parse_from_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Where) {
        parse_where_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Group) {
        parse_group_by_clause(parser)?;
    }
    if parser.at_keyword(Keyword::Having) {
        let having = parser.checkpoint();
        parser.advance_as_keyword();
        parse_expr(parser, BindingPower::Default)?;
        parser.finish(having, NodeKind::HavingClause);
    }
    if parser.at_keyword(Keyword::Window) {
        parse_window_clause(parser)?;
    }

    parser.finish(checkpoint, NodeKind::QuerySpec);
    Ok(())
}

fn parse_field_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_select_field(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_select_field(parser)?;
    }
    parser.finish(checkpoint, NodeKind::FieldList);
    Ok(())
}

/// Number of tokens in a `[db.]tbl.*` wildcard at the current position.
fn qualified_wildcard_len(parser: &Parser) -> Option<usize> {
    let is_name = |n: usize| {
        matches!(
            parser.nth_kind(n),
            TokenKind::Word | TokenKind::QuotedIdentifier
        )
    };
    if !is_name(0) || parser.nth_kind(1) != TokenKind::Dot {
        return None;
    }
    if parser.nth_kind(2) == TokenKind::Star {
        return Some(3);
    }
    if parser.nth_kind(3) == TokenKind::Dot && parser.nth_kind(4) == TokenKind::Star {
        return Some(5);
    }
    None
}

fn parse_select_field(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.at(TokenKind::Star) {
        parser.advance();
        parser.finish(checkpoint, NodeKind::WildcardField);
        return Ok(());
    }

    if let Some(len) = qualified_wildcard_len(parser) {
        for _ in 0..len {
            parser.advance();
        }
        parser.finish(checkpoint, NodeKind::WildcardField);
        return Ok(());
    }

    parse_expr(parser, BindingPower::Default)?;
    parse_alias(parser)?;
    parser.finish(checkpoint, NodeKind::SelectField);
    Ok(())
}

/// Optional `[AS] name`. A bare word, quoted identifier or string right
/// after the aliased item is taken as its alias.
pub fn parse_alias(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.at_keyword(Keyword::As) {
        parser.advance_as_keyword();
        match parser.current_token_kind() {
            TokenKind::String => parser.advance(),
            _ => parser.expect_identifier()?,
        }
    } else {
        match parser.current_token_kind() {
            TokenKind::Word | TokenKind::QuotedIdentifier => parser.advance_as_identifier(),
            TokenKind::String => parser.advance(),
            _ => return Ok(()),
        }
    }

    parser.finish(checkpoint, NodeKind::Alias);
    Ok(())
}

/// `INTO OUTFILE 'f' [FIELDS ...] [LINES ...]`, `INTO DUMPFILE 'f'` or
/// `INTO @a, @b`.
fn parse_into_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Into)?;

    if parser.eat_keyword(Keyword::Outfile) {
        expect_string(parser)?;
        if parser.at_any_keyword(&[Keyword::Fields, Keyword::Columns]) {
            parse_fields_clause(parser)?;
        }
        if parser.at_keyword(Keyword::Lines) {
            parse_lines_clause(parser)?;
        }
    } else if parser.eat_keyword(Keyword::Dumpfile) {
        expect_string(parser)?;
    } else {
        parser.expect(TokenKind::UserVariable)?;
        while parser.eat(TokenKind::Comma) {
            parser.expect(TokenKind::UserVariable)?;
        }
    }

    parser.finish(checkpoint, NodeKind::IntoClause);
    Ok(())
}

fn parse_from_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::From)?;

    if parser.at_keyword(Keyword::Dual) {
        let dual = parser.checkpoint();
        parser.advance_as_keyword();
        parser.finish(dual, NodeKind::DualTable);
    } else {
        parse_table_refs(parser)?;
    }

    parser.finish(checkpoint, NodeKind::FromClause);
    Ok(())
}

/// Comma separated table references.
pub fn parse_table_refs(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_table_ref(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_table_ref(parser)?;
    }
    parser.finish(checkpoint, NodeKind::TableRefList);
    Ok(())
}

fn at_join(parser: &mut Parser) -> bool {
    parser.at_any_keyword(&[
        Keyword::Join,
        Keyword::Inner,
        Keyword::Cross,
        Keyword::StraightJoin,
        Keyword::Left,
        Keyword::Right,
        Keyword::Natural,
    ])
}

/// A table factor followed by any number of joins, nested to the left.
fn parse_table_ref(parser: &mut Parser) -> PResult {
    parser.nested(|parser| {
        let checkpoint = parser.checkpoint();
        parse_table_factor(parser)?;

        while at_join(parser) {
            parse_join(parser)?;
            parser.finish(checkpoint, NodeKind::JoinClause);
        }

        Ok(())
    })
}

fn parse_join(parser: &mut Parser) -> PResult {
    let condition_required = match parser.current_keyword() {
        Some(Keyword::Natural) => {
            parser.advance_as_keyword();
            parser.eat_any_keyword(&[Keyword::Left, Keyword::Right]);
            parser.eat_keyword(Keyword::Outer);
            parser.expect_keyword(Keyword::Join)?;
            return parse_table_factor(parser);
        }
        Some(Keyword::Left | Keyword::Right) => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Outer);
            parser.expect_keyword(Keyword::Join)?;
            true
        }
        Some(Keyword::Inner | Keyword::Cross) => {
            parser.advance_as_keyword();
            parser.expect_keyword(Keyword::Join)?;
            false
        }
        _ => {
            parser.advance_as_keyword();
            false
        }
    };

    parse_table_factor(parser)?;

    if parser.at_keyword(Keyword::On) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        parse_expr(parser, BindingPower::Default)?;
        parser.finish(checkpoint, NodeKind::OnCondition);
    } else if parser.at_keyword(Keyword::Using) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        parse_column_name_list(parser)?;
        parser.finish(checkpoint, NodeKind::UsingClause);
    } else if condition_required {
        return parser.unexpected();
    }

    Ok(())
}

fn parse_table_factor(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.at_keyword(Keyword::JsonTable) {
        parse_json_table(parser)?;
        parse_alias(parser)?;
    } else if parser.at_keyword(Keyword::Lateral) {
        parse_derived_table(parser)?;
    } else if parser.at(TokenKind::OpenParen) {
        let derived = parser.at_query_start(0) && parser.speculate(parse_derived_table);
        if !derived {
            let inner = parser.checkpoint();
            parser.advance();
            parse_table_refs(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            parser.finish(inner, NodeKind::ParenTableRefs);
        }
    } else {
        parse_table_name(parser)?;
        if parser.at_keyword(Keyword::Partition) {
            parse_partition_selection(parser)?;
        }
        if parser.at_keyword(Keyword::As) && parser.nth_is_keyword(1, Keyword::Of) {
            parse_as_of_clause(parser)?;
        }
        parse_alias(parser)?;
        parse_index_hints(parser)?;
    }

    parser.finish(checkpoint, NodeKind::TableFactor);
    Ok(())
}

/// `[LATERAL] (query) [AS] alias [(cols)]`
fn parse_derived_table(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.eat_keyword(Keyword::Lateral);
    parse_subquery(parser)?;
    parse_alias(parser)?;
    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_column_name_list(parser)?;
    }
    parser.finish(checkpoint, NodeKind::DerivedTable);
    Ok(())
}

/// `[db.]name`
pub fn parse_table_name(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_identifier()?;
    if parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        parser.expect_qualified_part()?;
    }
    parser.finish(checkpoint, NodeKind::TableName);
    Ok(())
}

pub fn parse_table_name_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_table_name(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_table_name(parser)?;
    }
    parser.finish(checkpoint, NodeKind::TableNameList);
    Ok(())
}

/// `PARTITION (p0, p1)` after a table name.
pub fn parse_partition_selection(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Partition)?;
    parser.expect(TokenKind::OpenParen)?;
    parser.expect_identifier()?;
    while parser.eat(TokenKind::Comma) {
        parser.expect_identifier()?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::PartitionSelection);
    Ok(())
}

/// `AS OF TIMESTAMP expr` stale read.
fn parse_as_of_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::As, Keyword::Of, Keyword::Timestamp])?;
    parse_expr(parser, BindingPower::Default)?;
    parser.finish(checkpoint, NodeKind::AsOfClause);
    Ok(())
}

/// `USE|FORCE|IGNORE INDEX|KEY [FOR JOIN|ORDER BY|GROUP BY] (names)`
fn parse_index_hints(parser: &mut Parser) -> PResult {
    loop {
        let at_hint = parser.at_any_keyword(&[Keyword::Use, Keyword::Force, Keyword::Ignore])
            && matches!(
                parser.peek_nth(1).keyword,
                Some(Keyword::Index | Keyword::Key)
            );
        if !at_hint {
            return Ok(());
        }

        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        parser.advance_as_keyword();

        if parser.eat_keyword(Keyword::For) && !parser.eat_keyword(Keyword::Join) {
            parser.expect_any_keyword(&[Keyword::Order, Keyword::Group])?;
            parser.expect_keyword(Keyword::By)?;
        }

        parser.expect(TokenKind::OpenParen)?;
        let mut first = true;
        while !parser.at(TokenKind::CloseParen) {
            if !first {
                parser.expect(TokenKind::Comma)?;
            }
            if !parser.eat_keyword(Keyword::Primary) {
                parser.expect_identifier()?;
            }
            first = false;
        }
        parser.expect(TokenKind::CloseParen)?;

        parser.finish(checkpoint, NodeKind::IndexHint);
    }
}

pub fn parse_where_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Where)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.finish(checkpoint, NodeKind::WhereClause);
    Ok(())
}

fn parse_group_by_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Group, Keyword::By])?;
    parse_by_item(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_by_item(parser)?;
    }
    parser.eat_keywords(&[Keyword::With, Keyword::Rollup])?;
    parser.finish(checkpoint, NodeKind::GroupByClause);
    Ok(())
}

fn parse_by_item(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_expr(parser, BindingPower::Default)?;
    parser.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
    parser.finish(checkpoint, NodeKind::ByItem);
    Ok(())
}

pub fn parse_order_by_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Order, Keyword::By])?;
    parse_by_item(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_by_item(parser)?;
    }
    parser.finish(checkpoint, NodeKind::OrderByClause);
    Ok(())
}

fn parse_limit_value(parser: &mut Parser) -> PResult {
    match parser.current_token_kind() {
        TokenKind::Integer | TokenKind::ParamMarker | TokenKind::UserVariable => {
            parser.advance();
            Ok(())
        }
        TokenKind::Word | TokenKind::QuotedIdentifier => parser.expect_identifier(),
        _ => parser.expected("integer"),
    }
}

/// `LIMIT n`, `LIMIT n OFFSET m` or `LIMIT m, n`.
pub fn parse_limit_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Limit)?;
    parse_limit_value(parser)?;
    if parser.eat(TokenKind::Comma) || parser.eat_keyword(Keyword::Offset) {
        parse_limit_value(parser)?;
    }
    parser.finish(checkpoint, NodeKind::LimitClause);
    Ok(())
}

/// `FOR UPDATE|SHARE [OF t, ...] [NOWAIT|SKIP LOCKED]` and
/// `LOCK IN SHARE MODE`, possibly repeated.
fn parse_lock_clauses(parser: &mut Parser) -> PResult {
    loop {
        let checkpoint = parser.checkpoint();

        if parser.at_keyword(Keyword::For)
            && matches!(
                parser.peek_nth(1).keyword,
                Some(Keyword::Update | Keyword::Share)
            )
        {
            parser.advance_as_keyword();
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Of) {
                parse_table_name_list(parser)?;
            }
            if !parser.eat_keyword(Keyword::Nowait) {
                parser.eat_keywords(&[Keyword::Skip, Keyword::Locked])?;
            }
        } else if parser.at_keyword(Keyword::Lock) {
            parser.expect_keywords(&[Keyword::Lock, Keyword::In, Keyword::Share, Keyword::Mode])?;
        } else {
            return Ok(());
        }

        parser.finish(checkpoint, NodeKind::LockClause);
    }
}

/// `WITH [RECURSIVE] name [(cols)] AS (query), ...`
pub fn parse_with_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::With)?;
    parser.eat_keyword(Keyword::Recursive);

    loop {
        let cte = parser.checkpoint();
        parser.expect_identifier()?;
        if parser.current_token_kind() == TokenKind::OpenParen {
            parse_column_name_list(parser)?;
        }
        parser.expect_keyword(Keyword::As)?;
        parse_subquery(parser)?;
        parser.finish(cte, NodeKind::CommonTableExpr);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::WithClause);
    Ok(())
}

fn parse_window_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Window)?;

    loop {
        let definition = parser.checkpoint();
        parse_identifier(parser)?;
        parser.expect_keyword(Keyword::As)?;
        parse_window_spec(parser)?;
        parser.finish(definition, NodeKind::WindowDefinition);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::WindowClause);
    Ok(())
}

/// `OVER (spec)` or `OVER name`.
pub fn parse_over_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Over)?;
    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_window_spec(parser)?;
    } else {
        parse_identifier(parser)?;
    }
    parser.finish(checkpoint, NodeKind::OverClause);
    Ok(())
}

/// `([name] [PARTITION BY ...] [ORDER BY ...] [frame])`
fn parse_window_spec(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;

    if parser.at_identifier() {
        parser.advance_as_identifier();
    }
    if parser.at_keyword(Keyword::Partition) {
        let partition = parser.checkpoint();
        parser.expect_keywords(&[Keyword::Partition, Keyword::By])?;
        parse_expr_list(parser)?;
        parser.finish(partition, NodeKind::PartitionByClause);
    }
    if parser.at_keyword(Keyword::Order) {
        parse_order_by_clause(parser)?;
    }
    if parser.at_any_keyword(&[Keyword::Rows, Keyword::Range, Keyword::Groups]) {
        parse_frame_clause(parser)?;
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::WindowSpec);
    Ok(())
}

fn parse_frame_clause(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();

    if parser.eat_keyword(Keyword::Between) {
        parse_frame_bound(parser)?;
        parser.expect_keyword(Keyword::And)?;
        parse_frame_bound(parser)?;
    } else {
        parse_frame_bound(parser)?;
    }

    parser.finish(checkpoint, NodeKind::FrameClause);
    Ok(())
}

/// `UNBOUNDED PRECEDING|FOLLOWING`, `CURRENT ROW` or `expr
/// PRECEDING|FOLLOWING`.
fn parse_frame_bound(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat_keyword(Keyword::Current) {
        parser.expect_keyword(Keyword::Row)?;
    } else {
        if !parser.eat_keyword(Keyword::Unbounded) {
            // The bound's operand stops before AND.
            parse_expr(parser, BindingPower::LogicalAnd)?;
        }
        parser.expect_any_keyword(&[Keyword::Preceding, Keyword::Following])?;
    }

    parser.finish(checkpoint, NodeKind::FrameBound);
    Ok(())
}
