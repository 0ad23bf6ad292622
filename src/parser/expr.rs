use crate::{
    ast::{ast::Checkpoint, kinds::NodeKind},
    errors::errors::ErrorImpl,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    json::parse_json_path_literal,
    lookups::{BindingPower, LEDHandler, Trigger, LOOKUPS},
    parser::{PResult, Parser},
    query::{parse_order_by_clause, parse_over_clause, parse_select_stmt},
    types::{parse_data_type, DataTypeFlavor},
};

/// Pratt loop: one prefix expression, then every infix operator that binds
/// tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> PResult {
    parser.nested(|parser| {
        let checkpoint = parser.checkpoint();
        parse_prefix(parser)?;

        while let Some((binding_power, led_fn)) = infix_operator(parser) {
            if binding_power <= bp {
                break;
            }
            led_fn(parser, checkpoint, binding_power)?;
        }

        Ok(())
    })
}

fn parse_prefix(parser: &mut Parser) -> PResult {
    let kind = parser.current_token_kind();

    if kind == TokenKind::Keyword {
        if let Some(keyword) = parser.current_keyword() {
            if let Some(nud_fn) = LOOKUPS.get_nud(Trigger::Keyword(keyword)) {
                return nud_fn(parser);
            }
            if parser.nth_kind(1) == TokenKind::OpenParen {
                if let Some(function_fn) = LOOKUPS.get_function(keyword) {
                    return function_fn(parser);
                }
            }
        }
        return parser.expected("expression");
    }

    match LOOKUPS.get_nud(Trigger::Token(kind)) {
        Some(nud_fn) => nud_fn(parser),
        None => parser.expected("expression"),
    }
}

/// The infix operator at the current token, with its binding power under
/// the active SQL mode.
fn infix_operator(parser: &Parser) -> Option<(BindingPower, LEDHandler)> {
    let token = parser.current_token();
    let trigger = match token.kind {
        TokenKind::Keyword | TokenKind::Word => Trigger::Keyword(token.keyword?),
        kind => Trigger::Token(kind),
    };
    let (binding_power, led_fn) = LOOKUPS.get_led(trigger)?;

    let binding_power = match trigger {
        Trigger::Token(TokenKind::Or) if parser.mode().pipes_as_concat => BindingPower::Concat,
        // NOT is infix only as the head of a negated predicate.
        Trigger::Keyword(Keyword::Not) => match parser.peek_nth(1).keyword {
            Some(Keyword::Between) => BindingPower::Predicate,
            Some(Keyword::Like | Keyword::In | Keyword::Regexp | Keyword::Rlike) => binding_power,
            _ => return None,
        },
        Trigger::Keyword(Keyword::Member) if !parser.nth_is_keyword(1, Keyword::Of) => return None,
        _ => binding_power,
    };

    Some((binding_power, led_fn))
}

pub fn parse_expr_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_expr(parser, BindingPower::Default)?;
    while parser.eat(TokenKind::Comma) {
        parse_expr(parser, BindingPower::Default)?;
    }
    parser.finish(checkpoint, NodeKind::ExprList);
    Ok(())
}

/* Infix handlers */

pub fn parse_binary_expr(parser: &mut Parser, checkpoint: Checkpoint, bp: BindingPower) -> PResult {
    parser.advance();
    parse_expr(parser, bp)?;
    parser.finish(checkpoint, NodeKind::BinaryExpr);
    Ok(())
}

/// `@var := expr`, right associative.
pub fn parse_assignment_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance();
    parse_expr(parser, BindingPower::Default)?;
    parser.finish(checkpoint, NodeKind::AssignmentExpr);
    Ok(())
}

/// Comparison operators, including the quantified `op ANY|SOME|ALL (query)`.
pub fn parse_comparison_expr(parser: &mut Parser, checkpoint: Checkpoint, bp: BindingPower) -> PResult {
    parser.advance();

    let quantified = matches!(
        parser.current_keyword(),
        Some(Keyword::Any | Keyword::Some | Keyword::All)
    ) && parser.nth_kind(1) == TokenKind::OpenParen;

    if quantified {
        parser.advance_as_keyword();
        parse_subquery(parser)?;
        parser.finish(checkpoint, NodeKind::CompareSubqueryExpr);
        return Ok(());
    }

    parse_expr(parser, bp)?;
    parser.finish(checkpoint, NodeKind::BinaryExpr);
    Ok(())
}

/// `NOT` in front of `BETWEEN`, `LIKE`, `IN`, `REGEXP` or `RLIKE`.
pub fn parse_not_infix_expr(parser: &mut Parser, checkpoint: Checkpoint, bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    match parser.current_keyword() {
        Some(Keyword::Between) => parse_between_expr(parser, checkpoint, bp),
        Some(Keyword::Like) => parse_like_expr(parser, checkpoint, bp),
        Some(Keyword::In) => parse_in_expr(parser, checkpoint, bp),
        Some(Keyword::Regexp | Keyword::Rlike) => parse_regexp_expr(parser, checkpoint, bp),
        _ => {
            parser.at_any_keyword(&[Keyword::Between, Keyword::Like, Keyword::In, Keyword::Regexp]);
            parser.unexpected()
        }
    }
}

pub fn parse_between_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parse_expr(parser, BindingPower::Comparison)?;
    parser.expect_keyword(Keyword::And)?;
    parse_expr(parser, BindingPower::Comparison)?;
    parser.finish(checkpoint, NodeKind::BetweenExpr);
    Ok(())
}

pub fn parse_is_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parser.eat_keyword(Keyword::Not);
    parser.expect_any_keyword(&[Keyword::Null, Keyword::True, Keyword::False, Keyword::Unknown])?;
    parser.finish(checkpoint, NodeKind::IsExpr);
    Ok(())
}

pub fn parse_like_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parse_expr(parser, BindingPower::Comparison)?;
    if parser.eat_keyword(Keyword::Escape) {
        parse_expr(parser, BindingPower::Comparison)?;
    }
    parser.finish(checkpoint, NodeKind::LikeExpr);
    Ok(())
}

pub fn parse_regexp_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parse_expr(parser, BindingPower::Comparison)?;
    parser.finish(checkpoint, NodeKind::RegexpExpr);
    Ok(())
}

/// `IN (subquery)` is tried before `IN (expr, ...)`.
pub fn parse_in_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();

    let subquery = parser.current_token_kind() == TokenKind::OpenParen
        && parser.at_query_start(0)
        && parser.speculate(parse_subquery);

    if !subquery {
        parser.expect(TokenKind::OpenParen)?;
        parse_expr_list(parser)?;
        parser.expect(TokenKind::CloseParen)?;
    }

    parser.finish(checkpoint, NodeKind::InExpr);
    Ok(())
}

pub fn parse_member_of_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parser.expect_keyword(Keyword::Of)?;
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::MemberOfExpr);
    Ok(())
}

pub fn parse_collate_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance_as_keyword();
    parse_charset_name(parser)?;
    parser.finish(checkpoint, NodeKind::CollateExpr);
    Ok(())
}

/// `col->'$.path'` and `col->>'$.path'`.
pub fn parse_json_extract_expr(parser: &mut Parser, checkpoint: Checkpoint, _bp: BindingPower) -> PResult {
    parser.advance();
    parse_json_path_literal(parser)?;
    parser.finish(checkpoint, NodeKind::JsonExtractExpr);
    Ok(())
}

/* Prefix handlers */

fn parse_single_token(parser: &mut Parser, kind: NodeKind) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance();
    parser.finish(checkpoint, kind);
    Ok(())
}

pub fn parse_numeric_literal(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::NumericLiteral)
}

pub fn parse_hex_literal(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::HexLiteral)
}

pub fn parse_bit_literal(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::BitLiteral)
}

pub fn parse_param_marker(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::ParamMarker)
}

pub fn parse_variable_expr(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::VariableExpr)
}

pub fn parse_system_variable_expr(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::SystemVariableExpr)
}

pub fn parse_null_literal(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::NullLiteral)
}

pub fn parse_bool_literal(parser: &mut Parser) -> PResult {
    parse_single_token(parser, NodeKind::BoolLiteral)
}

/// `[_charset] 'text' ['more' ...]`. Adjacent string tokens form one
/// literal.
pub fn parse_string_literal(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat(TokenKind::Introducer) {
        match parser.current_token_kind() {
            TokenKind::String | TokenKind::HexString | TokenKind::BitString => parser.advance(),
            _ => return parser.expected("string literal"),
        }
    } else {
        parser.advance();
    }

    while parser.current_token_kind() == TokenKind::String {
        parser.advance();
    }

    parser.finish(checkpoint, NodeKind::StringLiteral);
    Ok(())
}

/// `DATE '...'`, `TIME '...'`, `TIMESTAMP '...'`.
fn parse_temporal_literal(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::String)?;
    parser.finish(checkpoint, NodeKind::TemporalLiteral);
    Ok(())
}

pub fn parse_unary_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    let operand_power = match parser.current_token_kind() {
        TokenKind::Not => BindingPower::Negation,
        TokenKind::Keyword => match parser.current_keyword() {
            Some(Keyword::Not) if parser.mode().high_not_precedence => BindingPower::Negation,
            Some(Keyword::Not) => BindingPower::LogicalNot,
            _ => BindingPower::Collate,
        },
        _ => BindingPower::Unary,
    };

    parser.advance();
    parse_expr(parser, operand_power)?;
    parser.finish(checkpoint, NodeKind::UnaryExpr);
    Ok(())
}

/// `(query)` as an expression.
pub fn parse_subquery(parser: &mut Parser) -> PResult {
    parser.nested(|parser| {
        let checkpoint = parser.checkpoint();
        parser.expect(TokenKind::OpenParen)?;
        parse_select_stmt(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(checkpoint, NodeKind::SubqueryExpr);
        Ok(())
    })
}

/// `(` starts a subquery when a query keyword follows; otherwise a
/// parenthesized expression or, with commas, a row constructor.
pub fn parse_paren_expr(parser: &mut Parser) -> PResult {
    if parser.at_query_start(0) && parser.speculate(parse_subquery) {
        return Ok(());
    }

    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;

    let list = parser.checkpoint();
    parse_expr(parser, BindingPower::Default)?;

    if parser.at(TokenKind::Comma) {
        while parser.eat(TokenKind::Comma) {
            parse_expr(parser, BindingPower::Default)?;
        }
        parser.finish(list, NodeKind::ExprList);
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(checkpoint, NodeKind::RowExpr);
    } else {
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(checkpoint, NodeKind::ParenExpr);
    }

    Ok(())
}

pub fn parse_row_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr_list(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::RowExpr);
    Ok(())
}

pub fn parse_exists_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parse_subquery(parser)?;
    parser.finish(checkpoint, NodeKind::ExistsExpr);
    Ok(())
}

/// Simple (`CASE x WHEN ...`) and searched (`CASE WHEN ...`) forms.
pub fn parse_case_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();

    if !parser.at_keyword(Keyword::When) {
        parse_expr(parser, BindingPower::Default)?;
    }

    let mut arms = 0;
    while parser.at_keyword(Keyword::When) {
        let arm = parser.checkpoint();
        parser.advance_as_keyword();
        parse_expr(parser, BindingPower::Default)?;
        parser.expect_keyword(Keyword::Then)?;
        parse_expr(parser, BindingPower::Default)?;
        parser.finish(arm, NodeKind::WhenClause);
        arms += 1;
    }
    if arms == 0 {
        return parser.unexpected();
    }

    if parser.at_keyword(Keyword::Else) {
        let otherwise = parser.checkpoint();
        parser.advance_as_keyword();
        parse_expr(parser, BindingPower::Default)?;
        parser.finish(otherwise, NodeKind::ElseClause);
    }

    parser.expect_keyword(Keyword::End)?;
    parser.finish(checkpoint, NodeKind::CaseExpr);
    Ok(())
}

/// `INTERVAL expr unit`, or the `INTERVAL(n, n1, ...)` function when the
/// interval form does not fit.
pub fn parse_interval_expr(parser: &mut Parser) -> PResult {
    if parser.nth_kind(1) == TokenKind::OpenParen {
        if parser.speculate(parse_interval_literal) {
            return Ok(());
        }
        return parse_function_call(parser);
    }
    parse_interval_literal(parser)
}

fn parse_interval_literal(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Interval)?;
    parse_expr(parser, BindingPower::Default)?;
    parse_interval_unit(parser)?;
    parser.finish(checkpoint, NodeKind::IntervalExpr);
    Ok(())
}

pub fn parse_interval_unit(parser: &mut Parser) -> PResult {
    match parser.current_keyword() {
        Some(keyword) if keyword.is_interval_unit() => {
            parser.advance_as_keyword();
            Ok(())
        }
        _ => parser.expected("interval unit"),
    }
}

/// `DEFAULT` or `DEFAULT(col)`.
pub fn parse_default_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    if parser.eat(TokenKind::OpenParen) {
        parse_column_ref(parser)?;
        parser.expect(TokenKind::CloseParen)?;
    }
    parser.finish(checkpoint, NodeKind::DefaultExpr);
    Ok(())
}

/// `MATCH (cols) AGAINST (expr [modifier])`.
pub fn parse_match_against_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();

    parser.expect(TokenKind::OpenParen)?;
    let columns = parser.checkpoint();
    parse_column_ref(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_column_ref(parser)?;
    }
    parser.finish(columns, NodeKind::ExprList);
    parser.expect(TokenKind::CloseParen)?;

    parser.expect_keyword(Keyword::Against)?;
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Comparison)?;

    if parser.eat_keyword(Keyword::In) {
        if parser.eat_keyword(Keyword::Natural) {
            parser.expect_keywords(&[Keyword::Language, Keyword::Mode])?;
            parser.eat_keywords(&[Keyword::With, Keyword::Query, Keyword::Expansion])?;
        } else {
            parser.expect_keywords(&[Keyword::Boolean, Keyword::Mode])?;
        }
    } else {
        parser.eat_keywords(&[Keyword::With, Keyword::Query, Keyword::Expansion])?;
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::MatchAgainstExpr);
    Ok(())
}

/// Words: function calls, temporal literals and column references.
pub fn parse_word_expr(parser: &mut Parser) -> PResult {
    let token = parser.current_token();
    let is_word = token.kind == TokenKind::Word;
    let keyword = if is_word { token.keyword } else { None };
    let call_follows = parser.nth_kind(1) == TokenKind::OpenParen;
    // Built-in function names only call when `(` is attached.
    let call_allowed = call_follows
        && (parser.is_adjacent(1) || !keyword.is_some_and(|keyword| keyword.is_function()));

    if let Some(keyword) = keyword {
        if call_allowed {
            if let Some(function_fn) = LOOKUPS.get_function(keyword) {
                return function_fn(parser);
            }
        }
        if matches!(keyword, Keyword::Date | Keyword::Time | Keyword::Timestamp)
            && parser.nth_kind(1) == TokenKind::String
        {
            return parse_temporal_literal(parser);
        }
    }

    if call_allowed {
        return parse_function_call(parser);
    }

    let qualified_call = parser.nth_kind(1) == TokenKind::Dot
        && matches!(
            parser.nth_kind(2),
            TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::Keyword
        )
        && parser.nth_kind(3) == TokenKind::OpenParen
        && parser.is_adjacent(3);
    if qualified_call {
        return parse_function_call(parser);
    }

    parse_column_ref(parser)
}

/// `col`, `tbl.col` or `db.tbl.col`.
pub fn parse_column_ref(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_identifier()?;
    for _ in 0..2 {
        if parser.current_token_kind() != TokenKind::Dot || parser.nth_kind(1) == TokenKind::Star {
            break;
        }
        parser.advance();
        parser.expect_qualified_part()?;
    }
    parser.finish(checkpoint, NodeKind::ColumnRef);
    Ok(())
}

/// `[schema.]name`
pub fn parse_function_name(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    match parser.current_token_kind() {
        TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::Keyword => parser.advance(),
        _ => return parser.expected("function name"),
    }
    if parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        parser.expect_qualified_part()?;
    }
    parser.finish(checkpoint, NodeKind::FunctionName);
    Ok(())
}

/// Generic call: `name([args])`. `CHAR(... USING charset)` takes a
/// trailing charset.
pub fn parse_function_call(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    let is_char = parser.current_token().is_keyword(Keyword::Char);

    parse_function_name(parser)?;
    parser.expect(TokenKind::OpenParen)?;
    if !parser.at(TokenKind::CloseParen) {
        parse_expr_list(parser)?;
        if is_char && parser.eat_keyword(Keyword::Using) {
            parse_charset_name(parser)?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    parser.finish(checkpoint, NodeKind::FunctionCall);
    Ok(())
}

pub fn parse_keyword_function_call(parser: &mut Parser) -> PResult {
    parse_function_call(parser)
}

/// `CURRENT_TIMESTAMP`, `CURRENT_USER` and friends, with optional `()`.
pub fn parse_niladic_function(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    let name = parser.checkpoint();
    parser.advance_as_keyword();
    parser.finish(name, NodeKind::FunctionName);

    if parser.eat(TokenKind::OpenParen) {
        if !parser.at(TokenKind::CloseParen) {
            parse_expr_list(parser)?;
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    parser.finish(checkpoint, NodeKind::FunctionCall);
    Ok(())
}

/// `CAST(expr AS type [ARRAY])`
pub fn parse_cast_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect_keyword(Keyword::As)?;
    parse_data_type(parser, DataTypeFlavor::Cast)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::CastExpr);
    Ok(())
}

/// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`
pub fn parse_convert_expr(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    if parser.eat_keyword(Keyword::Using) {
        parse_charset_name(parser)?;
    } else {
        parser.expect(TokenKind::Comma)?;
        parse_data_type(parser, DataTypeFlavor::Cast)?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::ConvertExpr);
    Ok(())
}

/// `TRIM([BOTH|LEADING|TRAILING] [remstr] FROM str)` or `TRIM(str)`
pub fn parse_trim_func(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;

    let directed = parser.eat_any_keyword(&[Keyword::Both, Keyword::Leading, Keyword::Trailing]);
    if parser.eat_keyword(Keyword::From) {
        parse_expr(parser, BindingPower::Default)?;
    } else {
        parse_expr(parser, BindingPower::Default)?;
        if parser.eat_keyword(Keyword::From) {
            parse_expr(parser, BindingPower::Default)?;
        } else if directed {
            return parser.unexpected();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::TrimFunc);
    Ok(())
}

/// `SUBSTRING(str, pos[, len])` or `SUBSTRING(str FROM pos [FOR len])`
pub fn parse_substring_func(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;

    if parser.eat_keyword(Keyword::From) {
        parse_expr(parser, BindingPower::Default)?;
        if parser.eat_keyword(Keyword::For) {
            parse_expr(parser, BindingPower::Default)?;
        }
    } else {
        parser.expect(TokenKind::Comma)?;
        parse_expr(parser, BindingPower::Default)?;
        if parser.eat(TokenKind::Comma) {
            parse_expr(parser, BindingPower::Default)?;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::SubstringFunc);
    Ok(())
}

/// `EXTRACT(unit FROM expr)`
pub fn parse_extract_func(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_interval_unit(parser)?;
    parser.expect_keyword(Keyword::From)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::ExtractFunc);
    Ok(())
}

/// `POSITION(substr IN str)`
pub fn parse_position_func(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Comparison)?;
    parser.expect_keyword(Keyword::In)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::PositionFunc);
    Ok(())
}

/// `DATE_ADD(date, INTERVAL n unit)` and its aliases.
pub fn parse_date_arith_func(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::DateArithFunc);
    Ok(())
}

/// `COUNT(*)`, `SUM([DISTINCT] x)`, `GROUP_CONCAT(... [ORDER BY ...]
/// [SEPARATOR s])`, optionally followed by `OVER`.
pub fn parse_aggregate_func_call(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    let is_group_concat = parser.current_token().is_keyword(Keyword::GroupConcat);

    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;

    if parser.at(TokenKind::Star) {
        parser.advance();
    } else if !parser.at(TokenKind::CloseParen) {
        parser.eat_any_keyword(&[Keyword::Distinct, Keyword::Distinctrow, Keyword::All]);
        parse_expr_list(parser)?;

        if is_group_concat {
            if parser.at_keyword(Keyword::Order) {
                parse_order_by_clause(parser)?;
            }
            if parser.eat_keyword(Keyword::Separator) {
                expect_string(parser)?;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    if parser.at_keyword(Keyword::Over) {
        parse_over_clause(parser)?;
    }

    parser.finish(checkpoint, NodeKind::AggregateFuncCall);
    Ok(())
}

/// `ROW_NUMBER()`, `LEAD(x, n) [RESPECT|IGNORE NULLS] OVER w`, ...
pub fn parse_window_func_call(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();
    parser.expect(TokenKind::OpenParen)?;
    if !parser.at(TokenKind::CloseParen) {
        parse_expr_list(parser)?;
    }
    parser.expect(TokenKind::CloseParen)?;

    if parser.eat_keyword(Keyword::From) {
        parser.expect_any_keyword(&[Keyword::First, Keyword::Last])?;
    }
    if parser.eat_any_keyword(&[Keyword::Respect, Keyword::Ignore]) {
        parser.expect_keyword(Keyword::Nulls)?;
    }

    parse_over_clause(parser)?;
    parser.finish(checkpoint, NodeKind::WindowFuncCall);
    Ok(())
}

/* Shared terminals */

/// A string token where the grammar requires one. Under ANSI_QUOTES a
/// double-quoted token here is an identifier, which is reported as
/// ambiguous rather than as a plain syntax error.
pub fn expect_string(parser: &mut Parser) -> PResult {
    if parser.at(TokenKind::String) || parser.current_token_kind() == TokenKind::NationalString {
        parser.advance();
        return Ok(());
    }

    let token = parser.current_token();
    if token.kind == TokenKind::QuotedIdentifier && token.value.starts_with('"') {
        return Err(parser.error_at_current(ErrorImpl::AmbiguousConstruct {
            token: token.value.clone(),
            message: String::from(
                "Double quotes delimit identifiers under ANSI_QUOTES, use single quotes for strings",
            ),
        }));
    }

    parser.unexpected()
}

/// An unsigned integer literal.
pub fn expect_number(parser: &mut Parser) -> PResult {
    parser.expect(TokenKind::Integer)
}

/// Optionally signed numeric literal, as in sequence and partition options.
pub fn parse_signed_number(parser: &mut Parser) -> PResult {
    if matches!(parser.current_token_kind(), TokenKind::Dash | TokenKind::Plus) {
        parser.advance();
    }
    match parser.current_token_kind() {
        TokenKind::Integer | TokenKind::Decimal | TokenKind::Float => {
            parser.advance();
            Ok(())
        }
        _ => parser.expected("number"),
    }
}

/// Charset or collation name: a name, a string or `BINARY`.
pub fn parse_charset_name(parser: &mut Parser) -> PResult {
    match parser.current_token_kind() {
        TokenKind::String => {
            parser.advance();
            Ok(())
        }
        TokenKind::Keyword if parser.current_token().is_keyword(Keyword::Binary) => {
            parser.advance_as_keyword();
            Ok(())
        }
        _ => parser.expect_identifier(),
    }
}

/// Optional `=` between an option name and its value.
pub fn eat_equals(parser: &mut Parser) {
    parser.eat(TokenKind::Equals);
}

pub fn parse_if_not_exists(parser: &mut Parser) -> PResult<bool> {
    parser.eat_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists])
}

pub fn parse_if_exists(parser: &mut Parser) -> PResult<bool> {
    parser.eat_keywords(&[Keyword::If, Keyword::Exists])
}

/* Names */

pub fn parse_identifier(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_identifier()?;
    parser.finish(checkpoint, NodeKind::Identifier);
    Ok(())
}

pub fn parse_identifier_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_identifier(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_identifier(parser)?;
    }
    parser.finish(checkpoint, NodeKind::IdentifierList);
    Ok(())
}

/// `(a, b, c)`; an empty list is allowed.
pub fn parse_column_name_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;
    if !parser.at(TokenKind::CloseParen) {
        parser.expect_identifier()?;
        while parser.eat(TokenKind::Comma) {
            parser.expect_identifier()?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::ColumnNameList);
    Ok(())
}
