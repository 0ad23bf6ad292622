use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::Checkpoint,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    account::*, admin::*, ddl::*, dml::*, expr::*, parser::PResult, parser::Parser, query::*,
    txn::*,
};

/// Operator precedence, lowest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    LogicalNot,
    /// `BETWEEN`, `CASE`
    Predicate,
    /// `=`, `<=>`, `<>`, `<`, `IS`, `LIKE`, `REGEXP`, `IN`, `MEMBER OF`
    Comparison,
    BitOr,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    BitXor,
    /// `||` under PIPES_AS_CONCAT
    Concat,
    Unary,
    /// `!`, and `NOT` under HIGH_NOT_PRECEDENCE
    Negation,
    /// `BINARY`, `COLLATE`
    Collate,
    /// `->`, `->>`
    Json,
    Primary,
}

/// What a table entry is keyed by: a token kind, or a keyword spelled by a
/// `Keyword` or `Word` token.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Trigger {
    Token(TokenKind),
    Keyword(Keyword),
}

pub type StmtHandler = fn(&mut Parser) -> PResult;
pub type NUDHandler = fn(&mut Parser) -> PResult;
/// Receives the checkpoint taken before the left operand, so the handler
/// can close a node that contains it.
pub type LEDHandler = fn(&mut Parser, Checkpoint, BindingPower) -> PResult;

pub type StmtLookup = HashMap<Trigger, StmtHandler>;
pub type NUDLookup = HashMap<Trigger, NUDHandler>;
pub type LEDLookup = HashMap<Trigger, LEDHandler>;
pub type BPLookup = HashMap<Trigger, BindingPower>;
pub type FunctionLookup = HashMap<Keyword, NUDHandler>;

/// Grammar dispatch tables. Built once and shared by every parse.
#[derive(Default)]
pub struct Lookups {
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    function_lookup: FunctionLookup,
}

impl Lookups {
    fn led(&mut self, trigger: Trigger, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(trigger, binding_power);
        self.led_lookup.insert(trigger, led_fn);
    }

    fn nud(&mut self, trigger: Trigger, nud_fn: NUDHandler) {
        self.nud_lookup.insert(trigger, nud_fn);
    }

    fn stmt(&mut self, trigger: Trigger, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(trigger, stmt_fn);
    }

    fn function(&mut self, keyword: Keyword, nud_fn: NUDHandler) {
        self.function_lookup.insert(keyword, nud_fn);
    }

    pub fn get_stmt(&self, trigger: Trigger) -> Option<StmtHandler> {
        self.stmt_lookup.get(&trigger).copied()
    }

    pub fn get_nud(&self, trigger: Trigger) -> Option<NUDHandler> {
        self.nud_lookup.get(&trigger).copied()
    }

    pub fn get_led(&self, trigger: Trigger) -> Option<(BindingPower, LEDHandler)> {
        let handler = self.led_lookup.get(&trigger)?;
        let binding_power = self.binding_power_lookup.get(&trigger)?;
        Some((*binding_power, *handler))
    }

    /// Handler of a built-in function with its own argument syntax.
    pub fn get_function(&self, keyword: Keyword) -> Option<NUDHandler> {
        self.function_lookup.get(&keyword).copied()
    }
}

fn token(kind: TokenKind) -> Trigger {
    Trigger::Token(kind)
}

fn keyword(keyword: Keyword) -> Trigger {
    Trigger::Keyword(keyword)
}

pub fn create_lookups() -> Lookups {
    let mut lookups = Lookups::default();

    // Assignment
    lookups.led(token(TokenKind::Assignment), BindingPower::Assignment, parse_assignment_expr);

    // Logical
    lookups.led(keyword(Keyword::Or), BindingPower::LogicalOr, parse_binary_expr);
    lookups.led(token(TokenKind::Or), BindingPower::LogicalOr, parse_binary_expr);
    lookups.led(keyword(Keyword::Xor), BindingPower::LogicalXor, parse_binary_expr);
    lookups.led(keyword(Keyword::And), BindingPower::LogicalAnd, parse_binary_expr);
    lookups.led(token(TokenKind::And), BindingPower::LogicalAnd, parse_binary_expr);

    // Predicates
    lookups.led(keyword(Keyword::Between), BindingPower::Predicate, parse_between_expr);
    lookups.led(keyword(Keyword::Not), BindingPower::Comparison, parse_not_infix_expr);
    lookups.led(keyword(Keyword::Is), BindingPower::Comparison, parse_is_expr);
    lookups.led(keyword(Keyword::Like), BindingPower::Comparison, parse_like_expr);
    lookups.led(keyword(Keyword::Regexp), BindingPower::Comparison, parse_regexp_expr);
    lookups.led(keyword(Keyword::Rlike), BindingPower::Comparison, parse_regexp_expr);
    lookups.led(keyword(Keyword::In), BindingPower::Comparison, parse_in_expr);
    lookups.led(keyword(Keyword::Member), BindingPower::Comparison, parse_member_of_expr);

    // Comparison
    lookups.led(token(TokenKind::Equals), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::NullSafeEquals), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::NotEquals), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::Less), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::LessEquals), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::Greater), BindingPower::Comparison, parse_comparison_expr);
    lookups.led(token(TokenKind::GreaterEquals), BindingPower::Comparison, parse_comparison_expr);

    // Bitwise and arithmetic
    lookups.led(token(TokenKind::Pipe), BindingPower::BitOr, parse_binary_expr);
    lookups.led(token(TokenKind::Ampersand), BindingPower::BitAnd, parse_binary_expr);
    lookups.led(token(TokenKind::ShiftLeft), BindingPower::Shift, parse_binary_expr);
    lookups.led(token(TokenKind::ShiftRight), BindingPower::Shift, parse_binary_expr);
    lookups.led(token(TokenKind::Plus), BindingPower::Additive, parse_binary_expr);
    lookups.led(token(TokenKind::Dash), BindingPower::Additive, parse_binary_expr);
    lookups.led(token(TokenKind::Star), BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(token(TokenKind::Slash), BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(token(TokenKind::Percent), BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(keyword(Keyword::Div), BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(keyword(Keyword::Mod), BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(token(TokenKind::Caret), BindingPower::BitXor, parse_binary_expr);

    // Postfix
    lookups.led(keyword(Keyword::Collate), BindingPower::Collate, parse_collate_expr);
    lookups.led(token(TokenKind::Arrow), BindingPower::Json, parse_json_extract_expr);
    lookups.led(token(TokenKind::DoubleArrow), BindingPower::Json, parse_json_extract_expr);

    // Literals and symbols
    lookups.nud(token(TokenKind::Integer), parse_numeric_literal);
    lookups.nud(token(TokenKind::Decimal), parse_numeric_literal);
    lookups.nud(token(TokenKind::Float), parse_numeric_literal);
    lookups.nud(token(TokenKind::String), parse_string_literal);
    lookups.nud(token(TokenKind::NationalString), parse_string_literal);
    lookups.nud(token(TokenKind::Introducer), parse_string_literal);
    lookups.nud(token(TokenKind::HexString), parse_hex_literal);
    lookups.nud(token(TokenKind::BitString), parse_bit_literal);
    lookups.nud(token(TokenKind::ParamMarker), parse_param_marker);
    lookups.nud(token(TokenKind::UserVariable), parse_variable_expr);
    lookups.nud(token(TokenKind::SystemVariable), parse_system_variable_expr);
    lookups.nud(token(TokenKind::Word), parse_word_expr);
    lookups.nud(token(TokenKind::QuotedIdentifier), parse_word_expr);
    lookups.nud(token(TokenKind::OpenParen), parse_paren_expr);
    lookups.nud(keyword(Keyword::Null), parse_null_literal);
    lookups.nud(keyword(Keyword::True), parse_bool_literal);
    lookups.nud(keyword(Keyword::False), parse_bool_literal);

    // Prefix operators
    lookups.nud(token(TokenKind::Dash), parse_unary_expr);
    lookups.nud(token(TokenKind::Plus), parse_unary_expr);
    lookups.nud(token(TokenKind::Tilde), parse_unary_expr);
    lookups.nud(token(TokenKind::Not), parse_unary_expr);
    lookups.nud(keyword(Keyword::Not), parse_unary_expr);
    lookups.nud(keyword(Keyword::Binary), parse_unary_expr);

    // Keyword-led expressions
    lookups.nud(keyword(Keyword::Exists), parse_exists_expr);
    lookups.nud(keyword(Keyword::Case), parse_case_expr);
    lookups.nud(keyword(Keyword::Interval), parse_interval_expr);
    lookups.nud(keyword(Keyword::Default), parse_default_expr);
    lookups.nud(keyword(Keyword::Match), parse_match_against_expr);
    lookups.nud(keyword(Keyword::Row), parse_row_expr);
    lookups.nud(keyword(Keyword::CurrentDate), parse_niladic_function);
    lookups.nud(keyword(Keyword::CurrentTime), parse_niladic_function);
    lookups.nud(keyword(Keyword::CurrentTimestamp), parse_niladic_function);
    lookups.nud(keyword(Keyword::CurrentUser), parse_niladic_function);
    lookups.nud(keyword(Keyword::Localtime), parse_niladic_function);
    lookups.nud(keyword(Keyword::Localtimestamp), parse_niladic_function);
    lookups.nud(keyword(Keyword::UtcDate), parse_niladic_function);
    lookups.nud(keyword(Keyword::UtcTime), parse_niladic_function);
    lookups.nud(keyword(Keyword::UtcTimestamp), parse_niladic_function);

    // Functions with their own argument syntax
    lookups.function(Keyword::Cast, parse_cast_expr);
    lookups.function(Keyword::Convert, parse_convert_expr);
    lookups.function(Keyword::Trim, parse_trim_func);
    lookups.function(Keyword::Substring, parse_substring_func);
    lookups.function(Keyword::Substr, parse_substring_func);
    lookups.function(Keyword::Mid, parse_substring_func);
    lookups.function(Keyword::Extract, parse_extract_func);
    lookups.function(Keyword::Position, parse_position_func);
    lookups.function(Keyword::DateAdd, parse_date_arith_func);
    lookups.function(Keyword::DateSub, parse_date_arith_func);
    lookups.function(Keyword::Adddate, parse_date_arith_func);
    lookups.function(Keyword::Subdate, parse_date_arith_func);

    for aggregate in [
        Keyword::Count,
        Keyword::Sum,
        Keyword::Avg,
        Keyword::Max,
        Keyword::Min,
        Keyword::Std,
        Keyword::Stddev,
        Keyword::StddevPop,
        Keyword::StddevSamp,
        Keyword::Variance,
        Keyword::VarPop,
        Keyword::VarSamp,
        Keyword::BitAnd,
        Keyword::BitOr,
        Keyword::BitXor,
        Keyword::GroupConcat,
        Keyword::JsonArrayagg,
        Keyword::JsonObjectagg,
    ] {
        lookups.function(aggregate, parse_aggregate_func_call);
    }

    for window in [
        Keyword::RowNumber,
        Keyword::Rank,
        Keyword::DenseRank,
        Keyword::CumeDist,
        Keyword::PercentRank,
        Keyword::Ntile,
        Keyword::Lead,
        Keyword::Lag,
        Keyword::FirstValue,
        Keyword::LastValue,
        Keyword::NthValue,
    ] {
        lookups.function(window, parse_window_func_call);
    }

    // Reserved words that are also ordinary function names
    for name in [
        Keyword::Char,
        Keyword::Left,
        Keyword::Right,
        Keyword::If,
        Keyword::Insert,
        Keyword::Replace,
        Keyword::Database,
        Keyword::Schema,
        Keyword::Mod,
        Keyword::Values,
        Keyword::Now,
        Keyword::Curdate,
        Keyword::Curtime,
        Keyword::Sysdate,
        Keyword::SessionUser,
        Keyword::SystemUser,
    ] {
        lookups.function(name, parse_keyword_function_call);
    }

    // Queries and data manipulation
    lookups.stmt(keyword(Keyword::Select), parse_select_stmt);
    lookups.stmt(keyword(Keyword::Table), parse_select_stmt);
    lookups.stmt(keyword(Keyword::Values), parse_select_stmt);
    lookups.stmt(token(TokenKind::OpenParen), parse_select_stmt);
    lookups.stmt(keyword(Keyword::With), parse_with_stmt);
    lookups.stmt(keyword(Keyword::Insert), parse_insert_stmt);
    lookups.stmt(keyword(Keyword::Replace), parse_insert_stmt);
    lookups.stmt(keyword(Keyword::Update), parse_update_stmt);
    lookups.stmt(keyword(Keyword::Delete), parse_delete_stmt);
    lookups.stmt(keyword(Keyword::Load), parse_load_data_stmt);
    lookups.stmt(keyword(Keyword::Call), parse_call_stmt);
    lookups.stmt(keyword(Keyword::Do), parse_do_stmt);

    // Data definition
    lookups.stmt(keyword(Keyword::Create), parse_create_stmt);
    lookups.stmt(keyword(Keyword::Alter), parse_alter_stmt);
    lookups.stmt(keyword(Keyword::Drop), parse_drop_stmt);
    lookups.stmt(keyword(Keyword::Truncate), parse_truncate_table_stmt);
    lookups.stmt(keyword(Keyword::Rename), parse_rename_table_stmt);
    lookups.stmt(keyword(Keyword::Flashback), parse_flashback_stmt);
    lookups.stmt(keyword(Keyword::Recover), parse_recover_table_stmt);

    // Transactions
    lookups.stmt(keyword(Keyword::Begin), parse_begin_stmt);
    lookups.stmt(keyword(Keyword::Start), parse_begin_stmt);
    lookups.stmt(keyword(Keyword::Commit), parse_commit_stmt);
    lookups.stmt(keyword(Keyword::Rollback), parse_rollback_stmt);
    lookups.stmt(keyword(Keyword::Savepoint), parse_savepoint_stmt);
    lookups.stmt(keyword(Keyword::Release), parse_release_savepoint_stmt);

    // Access control
    lookups.stmt(keyword(Keyword::Grant), parse_grant_stmt);
    lookups.stmt(keyword(Keyword::Revoke), parse_revoke_stmt);

    // Administration
    lookups.stmt(keyword(Keyword::Use), parse_use_stmt);
    lookups.stmt(keyword(Keyword::Set), parse_set_stmt);
    lookups.stmt(keyword(Keyword::Show), parse_show_stmt);
    lookups.stmt(keyword(Keyword::Explain), parse_explain_stmt);
    lookups.stmt(keyword(Keyword::Describe), parse_explain_stmt);
    lookups.stmt(keyword(Keyword::Desc), parse_explain_stmt);
    lookups.stmt(keyword(Keyword::Analyze), parse_analyze_table_stmt);
    lookups.stmt(keyword(Keyword::Kill), parse_kill_stmt);
    lookups.stmt(keyword(Keyword::Flush), parse_flush_stmt);
    lookups.stmt(keyword(Keyword::Prepare), parse_prepare_stmt);
    lookups.stmt(keyword(Keyword::Execute), parse_execute_stmt);
    lookups.stmt(keyword(Keyword::Deallocate), parse_deallocate_stmt);
    lookups.stmt(keyword(Keyword::Lock), parse_lock_tables_stmt);
    lookups.stmt(keyword(Keyword::Unlock), parse_unlock_tables_stmt);
    lookups.stmt(keyword(Keyword::Admin), parse_admin_stmt);
    lookups.stmt(keyword(Keyword::Split), parse_split_region_stmt);
    lookups.stmt(keyword(Keyword::Backup), parse_backup_stmt);
    lookups.stmt(keyword(Keyword::Restore), parse_restore_stmt);

    lookups
}

lazy_static! {
    pub static ref LOOKUPS: Lookups = create_lookups();
}
