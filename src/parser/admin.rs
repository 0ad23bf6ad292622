//! Session, introspection and cluster administration statements.

use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    account::{parse_set_default_role_stmt, parse_set_password_stmt, parse_set_role_stmt, parse_user_identity},
    expr::{
        eat_equals, expect_number, expect_string, parse_charset_name, parse_expr, parse_expr_list,
        parse_identifier, parse_identifier_list, parse_if_not_exists,
    },
    lookups::{BindingPower, Trigger, LOOKUPS},
    parser::{parse_stmt, PResult, Parser},
    query::{parse_alias, parse_limit_clause, parse_partition_selection, parse_table_name, parse_table_name_list},
    txn::parse_set_transaction_stmt,
    types::parse_collate_clause,
};

pub fn parse_use_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Use)?;
    parse_identifier(parser)?;
    parser.finish(checkpoint, NodeKind::UseStmt);
    Ok(())
}

/* SET */

const SCOPES: &[Keyword] = &[Keyword::Global, Keyword::Session, Keyword::Local, Keyword::Persist];

/// A scope word is a variable name when an assignment operator follows it.
fn at_scope(parser: &Parser, n: usize) -> bool {
    parser
        .peek_nth(n)
        .keyword
        .filter(|_| matches!(parser.nth_kind(n), TokenKind::Word | TokenKind::Keyword))
        .is_some_and(|keyword| SCOPES.contains(&keyword))
        && !matches!(parser.nth_kind(n + 1), TokenKind::Equals | TokenKind::Assignment)
}

/// Dispatches the `SET` family. Checked in order: transaction
/// characteristics, `PASSWORD`, `ROLE`, `DEFAULT ROLE`, and finally plain
/// variable assignments.
pub fn parse_set_stmt(parser: &mut Parser) -> PResult {
    let scoped = at_scope(parser, 1);
    let object = if scoped { 2 } else { 1 };
    let next_is_assignment = matches!(
        parser.nth_kind(object + 1),
        TokenKind::Equals | TokenKind::Assignment
    );

    if parser.nth_is_keyword(object, Keyword::Transaction) && !next_is_assignment {
        return parse_set_transaction_stmt(parser);
    }
    if !scoped {
        if parser.nth_is_keyword(1, Keyword::Password)
            && (parser.nth_is_keyword(2, Keyword::For) || parser.nth_kind(2) == TokenKind::Equals)
        {
            return parse_set_password_stmt(parser);
        }
        if parser.nth_is_keyword(1, Keyword::Role) && !next_is_assignment {
            return parse_set_role_stmt(parser);
        }
        if parser.nth_is_keyword(1, Keyword::Default) && parser.nth_is_keyword(2, Keyword::Role) {
            return parse_set_default_role_stmt(parser);
        }
    }

    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Set)?;
    parse_set_assignment(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_set_assignment(parser)?;
    }
    parser.finish(checkpoint, NodeKind::SetStmt);
    Ok(())
}

fn parse_set_assignment(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    // NAMES and CHARACTER SET only count as charset assignments when no
    // assignment operator follows them.
    let operator_follows = |parser: &Parser, n: usize| {
        matches!(parser.nth_kind(n), TokenKind::Equals | TokenKind::Assignment)
    };
    if parser.current_token().is_keyword(Keyword::Names) && !operator_follows(parser, 1) {
        parser.advance_as_keyword();
        if !parser.eat_keyword(Keyword::Default) {
            parse_charset_name(parser)?;
            if parser.at_keyword(Keyword::Collate) {
                parse_collate_clause(parser)?;
            }
        }
        parser.finish(checkpoint, NodeKind::CharsetAssignment);
        return Ok(());
    }
    if parser.at_keyword(Keyword::Character) && parser.nth_is_keyword(1, Keyword::Set)
        || parser.current_token().is_keyword(Keyword::Charset) && !operator_follows(parser, 1)
    {
        if !parser.eat_keyword(Keyword::Charset) {
            parser.expect_keywords(&[Keyword::Character, Keyword::Set])?;
        }
        if !parser.eat_keyword(Keyword::Default) {
            parse_charset_name(parser)?;
        }
        parser.finish(checkpoint, NodeKind::CharsetAssignment);
        return Ok(());
    }

    match parser.current_token_kind() {
        TokenKind::UserVariable | TokenKind::SystemVariable => parser.advance(),
        _ => {
            if at_scope(parser, 0) {
                parser.advance_as_keyword();
            }
            parser.expect_identifier()?;
            if parser.eat(TokenKind::Dot) {
                parser.expect_qualified_part()?;
            }
        }
    }

    if !parser.eat(TokenKind::Assignment) {
        parser.expect(TokenKind::Equals)?;
    }

    // ON, ALL and BINARY are accepted as bare values.
    match parser.current_keyword() {
        Some(Keyword::On | Keyword::All | Keyword::Binary)
            if parser.current_token_kind() == TokenKind::Keyword
                && matches!(
                    parser.nth_kind(1),
                    TokenKind::Comma | TokenKind::Semicolon | TokenKind::EOF
                ) =>
        {
            parser.advance_as_keyword()
        }
        _ => parse_expr(parser, BindingPower::Default)?,
    }

    parser.finish(checkpoint, NodeKind::VariableAssignment);
    Ok(())
}

/* SHOW */

fn parse_show_filter(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if parser.eat_keyword(Keyword::Like) {
        expect_string(parser)?;
    } else if parser.eat_keyword(Keyword::Where) {
        parse_expr(parser, BindingPower::Default)?;
    } else {
        return Ok(());
    }
    parser.finish(checkpoint, NodeKind::ShowFilter);
    Ok(())
}

/// `FROM db` or `IN db`
fn parse_show_database(parser: &mut Parser) -> PResult {
    if parser.eat_any_keyword(&[Keyword::From, Keyword::In]) {
        parse_identifier(parser)?;
    }
    Ok(())
}

pub fn parse_show_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Show)?;

    if at_scope(parser, 0) {
        parser.advance_as_keyword();
    }
    parser.eat_keyword(Keyword::Extended);
    parser.eat_keyword(Keyword::Full);

    match parser.current_keyword() {
        Some(Keyword::Databases | Keyword::Schemas) => parser.advance_as_keyword(),
        Some(Keyword::Tables | Keyword::Triggers) => {
            parser.advance_as_keyword();
            parse_show_database(parser)?;
        }
        Some(Keyword::Table) if parser.nth_is_keyword(1, Keyword::Status) => {
            parser.advance_as_keyword();
            parser.advance_as_keyword();
            parse_show_database(parser)?;
        }
        Some(Keyword::Table) => {
            parser.advance_as_keyword();
            parse_table_name(parser)?;
            if parser.at_keyword(Keyword::Partition) {
                parse_partition_selection(parser)?;
            }
            if parser.eat_keyword(Keyword::Index) {
                parser.expect_identifier()?;
            }
            parser.expect_keyword(Keyword::Regions)?;
        }
        Some(Keyword::Columns | Keyword::Fields | Keyword::Index | Keyword::Indexes | Keyword::Keys) => {
            parser.advance_as_keyword();
            parser.expect_any_keyword(&[Keyword::From, Keyword::In])?;
            parse_table_name(parser)?;
            parse_show_database(parser)?;
        }
        Some(Keyword::Create) => {
            parser.advance_as_keyword();
            match parser.current_keyword() {
                Some(Keyword::Table | Keyword::View | Keyword::Sequence) => {
                    parser.advance_as_keyword();
                    parse_table_name(parser)?;
                }
                Some(Keyword::Database | Keyword::Schema) => {
                    parser.advance_as_keyword();
                    parse_if_not_exists(parser)?;
                    parse_identifier(parser)?;
                }
                Some(Keyword::User) => {
                    parser.advance_as_keyword();
                    parse_user_identity(parser)?;
                }
                _ => {
                    parser.at_any_keyword(&[
                        Keyword::Table,
                        Keyword::View,
                        Keyword::Database,
                        Keyword::User,
                    ]);
                    return parser.unexpected();
                }
            }
        }
        Some(
            Keyword::Variables
            | Keyword::Status
            | Keyword::Processlist
            | Keyword::Engines
            | Keyword::Charset
            | Keyword::Collation
            | Keyword::Privileges
            | Keyword::Plugins,
        ) => parser.advance_as_keyword(),
        Some(Keyword::Storage) => {
            parser.expect_keywords(&[Keyword::Storage, Keyword::Engines])?;
        }
        Some(Keyword::Character) => {
            parser.expect_keywords(&[Keyword::Character, Keyword::Set])?;
        }
        Some(Keyword::Grants) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::For) {
                parse_user_identity(parser)?;
                if parser.eat_keyword(Keyword::Using) {
                    parse_user_identity(parser)?;
                    while parser.eat(TokenKind::Comma) {
                        parse_user_identity(parser)?;
                    }
                }
            }
        }
        Some(Keyword::Warnings | Keyword::Errors) => {
            parser.advance_as_keyword();
            if parser.at_keyword(Keyword::Limit) {
                parse_limit_clause(parser)?;
            }
        }
        _ => return parser.expected("SHOW target"),
    }

    parse_show_filter(parser)?;
    parser.finish(checkpoint, NodeKind::ShowStmt);
    Ok(())
}

/* EXPLAIN / DESCRIBE */

/// A name after EXPLAIN, DESCRIBE or DESC is a table to describe unless it
/// is a word that starts a statement.
fn at_describe_target(parser: &Parser) -> bool {
    let token = parser.current_token();
    match token.kind {
        TokenKind::QuotedIdentifier => true,
        TokenKind::Word => match token.keyword {
            Some(Keyword::Format) => parser.nth_kind(1) != TokenKind::Equals,
            Some(keyword) => LOOKUPS.get_stmt(Trigger::Keyword(keyword)).is_none(),
            None => true,
        },
        _ => false,
    }
}

/// `EXPLAIN [ANALYZE] [FORMAT = f] stmt`, `EXPLAIN FOR CONNECTION n` or
/// `{EXPLAIN|DESCRIBE|DESC} t [col|'pattern']`.
pub fn parse_explain_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_any_keyword(&[Keyword::Explain, Keyword::Describe, Keyword::Desc])?;

    if at_describe_target(parser) {
        parse_table_name(parser)?;
        match parser.current_token_kind() {
            TokenKind::String => parser.advance(),
            TokenKind::Word | TokenKind::QuotedIdentifier => parser.advance_as_identifier(),
            _ => {}
        }
        parser.finish(checkpoint, NodeKind::DescribeStmt);
        return Ok(());
    }

    if parser.at_keyword(Keyword::Analyze) && !parser.nth_is_keyword(1, Keyword::Table) {
        parser.advance_as_keyword();
    }
    if parser.at_keyword(Keyword::Format) && parser.nth_kind(1) == TokenKind::Equals {
        parser.advance_as_keyword();
        parser.advance();
        match parser.current_token_kind() {
            TokenKind::String => parser.advance(),
            _ => parser.expect_identifier()?,
        }
    }

    if parser.eat_keyword(Keyword::For) {
        parser.expect_keyword(Keyword::Connection)?;
        expect_number(parser)?;
    } else {
        parser.nested(parse_stmt)?;
    }

    parser.finish(checkpoint, NodeKind::ExplainStmt);
    Ok(())
}

/* Statistics */

/// `ANALYZE [NO_WRITE_TO_BINLOG|LOCAL] TABLE t, ... [PARTITION p, ...]
/// [INDEX [i, ...]] [COLUMNS c, ...] [WITH n BUCKETS|TOPN|SAMPLES, ...]`
pub fn parse_analyze_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Analyze)?;
    parser.eat_any_keyword(&[Keyword::NoWriteToBinlog, Keyword::Local]);
    parser.expect_keyword(Keyword::Table)?;
    parse_table_name_list(parser)?;

    if parser.eat_keyword(Keyword::Partition) {
        parse_identifier_list(parser)?;
    }
    if parser.eat_keyword(Keyword::Index) {
        if parser.at_identifier() {
            parse_identifier_list(parser)?;
        }
    } else if parser.eat_keyword(Keyword::Columns) {
        parse_identifier_list(parser)?;
    }

    if parser.eat_keyword(Keyword::With) {
        loop {
            let option = parser.checkpoint();
            match parser.current_token_kind() {
                TokenKind::Integer | TokenKind::Decimal => parser.advance(),
                _ => return parser.expected("number"),
            }
            parser.expect_any_keyword(&[Keyword::Buckets, Keyword::Topn, Keyword::Samples])?;
            parser.finish(option, NodeKind::AnalyzeOption);

            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.finish(checkpoint, NodeKind::AnalyzeTableStmt);
    Ok(())
}

/* Sessions */

/// `KILL [TIDB] [CONNECTION|QUERY] n`
pub fn parse_kill_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Kill)?;
    parser.eat_keyword(Keyword::Tidb);
    parser.eat_any_keyword(&[Keyword::Connection, Keyword::Query]);
    expect_number(parser)?;
    parser.finish(checkpoint, NodeKind::KillStmt);
    Ok(())
}

/// `FLUSH [NO_WRITE_TO_BINLOG|LOCAL] PRIVILEGES | STATUS | LOGS |
/// TABLES [t, ...] [WITH READ LOCK]`
pub fn parse_flush_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Flush)?;
    parser.eat_any_keyword(&[Keyword::NoWriteToBinlog, Keyword::Local]);

    if parser.eat_any_keyword(&[Keyword::Tables, Keyword::Table]) {
        if parser.at_identifier() {
            parse_table_name_list(parser)?;
        }
        parser.eat_keywords(&[Keyword::With, Keyword::Read, Keyword::Lock])?;
    } else {
        parser.expect_any_keyword(&[Keyword::Privileges, Keyword::Status, Keyword::Logs])?;
    }

    parser.finish(checkpoint, NodeKind::FlushStmt);
    Ok(())
}

/// `PREPARE s FROM 'sql' | @v`
pub fn parse_prepare_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Prepare)?;
    parser.expect_identifier()?;
    parser.expect_keyword(Keyword::From)?;
    if !parser.eat(TokenKind::UserVariable) {
        expect_string(parser)?;
    }
    parser.finish(checkpoint, NodeKind::PrepareStmt);
    Ok(())
}

/// `EXECUTE s [USING @a, ...]`
pub fn parse_execute_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Execute)?;
    parser.expect_identifier()?;
    if parser.eat_keyword(Keyword::Using) {
        parser.expect(TokenKind::UserVariable)?;
        while parser.eat(TokenKind::Comma) {
            parser.expect(TokenKind::UserVariable)?;
        }
    }
    parser.finish(checkpoint, NodeKind::ExecuteStmt);
    Ok(())
}

/// `{DEALLOCATE|DROP} PREPARE s`
pub fn parse_deallocate_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_any_keyword(&[Keyword::Deallocate, Keyword::Drop])?;
    parser.expect_keyword(Keyword::Prepare)?;
    parser.expect_identifier()?;
    parser.finish(checkpoint, NodeKind::DeallocateStmt);
    Ok(())
}

/// `LOCK TABLES t [[AS] a] READ [LOCAL] | [LOW_PRIORITY] WRITE [LOCAL], ...`
pub fn parse_lock_tables_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Lock)?;
    parser.expect_any_keyword(&[Keyword::Tables, Keyword::Table])?;

    loop {
        let item = parser.checkpoint();
        parse_table_name(parser)?;
        parse_alias(parser)?;
        if parser.eat_keyword(Keyword::Read) {
            parser.eat_keyword(Keyword::Local);
        } else {
            parser.eat_keyword(Keyword::LowPriority);
            parser.expect_keyword(Keyword::Write)?;
            parser.eat_keyword(Keyword::Local);
        }
        parser.finish(item, NodeKind::LockTableItem);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::LockTablesStmt);
    Ok(())
}

pub fn parse_unlock_tables_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Unlock)?;
    parser.expect_any_keyword(&[Keyword::Tables, Keyword::Table])?;
    parser.finish(checkpoint, NodeKind::UnlockTablesStmt);
    Ok(())
}

/* Cluster administration */

fn parse_number_list(parser: &mut Parser) -> PResult {
    expect_number(parser)?;
    while parser.eat(TokenKind::Comma) {
        expect_number(parser)?;
    }
    Ok(())
}

/// The `ADMIN` command family: DDL job inspection and control, table and
/// index consistency checks, index recovery and cleanup, checksums and
/// row id inspection.
pub fn parse_admin_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Admin)?;

    match parser.current_keyword() {
        Some(Keyword::Show) if parser.nth_is_keyword(1, Keyword::Ddl) => {
            parser.expect_keywords(&[Keyword::Show, Keyword::Ddl])?;
            if parser.eat_keyword(Keyword::Jobs) {
                if parser.current_token_kind() == TokenKind::Integer {
                    expect_number(parser)?;
                }
                parse_show_filter(parser)?;
            } else if parser.eat_keywords(&[Keyword::Job, Keyword::Queries])? {
                parse_number_list(parser)?;
            }
        }
        Some(Keyword::Show) => {
            parser.advance_as_keyword();
            parse_table_name(parser)?;
            parser.expect_keyword(Keyword::NextRowId)?;
        }
        Some(Keyword::Check) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Index) {
                parse_table_name(parser)?;
                parser.expect_identifier()?;
                // Optional handle ranges `(lo, hi), ...`
                while parser.eat(TokenKind::OpenParen) {
                    parse_expr_list(parser)?;
                    parser.expect(TokenKind::CloseParen)?;
                    parser.eat(TokenKind::Comma);
                }
            } else {
                parser.expect_keyword(Keyword::Table)?;
                parse_table_name_list(parser)?;
            }
        }
        Some(Keyword::Cancel | Keyword::Pause | Keyword::Resume) => {
            parser.advance_as_keyword();
            parser.expect_keywords(&[Keyword::Ddl, Keyword::Jobs])?;
            parse_number_list(parser)?;
        }
        Some(Keyword::Recover | Keyword::Cleanup) => {
            parser.advance_as_keyword();
            parser.expect_keyword(Keyword::Index)?;
            parse_table_name(parser)?;
            parser.expect_identifier()?;
        }
        Some(Keyword::Checksum) => {
            parser.expect_keywords(&[Keyword::Checksum, Keyword::Table])?;
            parse_table_name_list(parser)?;
        }
        _ => return parser.expected("ADMIN command"),
    }

    parser.finish(checkpoint, NodeKind::AdminStmt);
    Ok(())
}

fn parse_paren_values(parser: &mut Parser) -> PResult {
    parser.expect(TokenKind::OpenParen)?;
    parse_expr_list(parser)?;
    parser.expect(TokenKind::CloseParen)
}

/// `SPLIT [PARTITION] TABLE t [PARTITION (p, ...)] [INDEX i]
/// BETWEEN (lo) AND (hi) REGIONS n | BY (v), (v), ...`
pub fn parse_split_region_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Split)?;
    parser.eat_keyword(Keyword::Partition);
    parser.expect_keyword(Keyword::Table)?;
    parse_table_name(parser)?;
    if parser.at_keyword(Keyword::Partition) {
        parse_partition_selection(parser)?;
    }
    if parser.eat_keyword(Keyword::Index) {
        parser.expect_identifier()?;
    }

    if parser.eat_keyword(Keyword::Between) {
        parse_paren_values(parser)?;
        parser.expect_keyword(Keyword::And)?;
        parse_paren_values(parser)?;
        parser.expect_keyword(Keyword::Regions)?;
        expect_number(parser)?;
    } else {
        parser.expect_keyword(Keyword::By)?;
        parse_paren_values(parser)?;
        while parser.eat(TokenKind::Comma) {
            parse_paren_values(parser)?;
        }
    }

    parser.finish(checkpoint, NodeKind::SplitRegionStmt);
    Ok(())
}

/// `DATABASE * | DATABASE db, ... | TABLE t, ...`
fn parse_backup_target(parser: &mut Parser) -> PResult {
    if parser.eat_any_keyword(&[Keyword::Database, Keyword::Schema]) {
        if !parser.eat(TokenKind::Star) {
            parse_identifier_list(parser)?;
        }
        Ok(())
    } else {
        parser.expect_keyword(Keyword::Table)?;
        parse_table_name_list(parser)
    }
}

/// `name [=] value`, where a rate may carry a `MB/SECOND` suffix.
fn parse_backup_options(parser: &mut Parser) -> PResult {
    while matches!(parser.current_token_kind(), TokenKind::Word | TokenKind::Keyword) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        eat_equals(parser);

        match parser.current_token_kind() {
            TokenKind::Integer | TokenKind::String | TokenKind::Decimal => parser.advance(),
            TokenKind::Word | TokenKind::Keyword => parser.advance_as_keyword(),
            _ => return parser.expected("option value"),
        }
        if parser.current_token_kind() == TokenKind::Word && parser.nth_kind(1) == TokenKind::Slash {
            parser.advance_as_keyword();
            parser.advance();
            parser.advance_as_keyword();
        }

        parser.finish(checkpoint, NodeKind::BackupOption);
        parser.eat(TokenKind::Comma);
    }
    Ok(())
}

pub fn parse_backup_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Backup)?;
    parse_backup_target(parser)?;
    parser.expect_keyword(Keyword::To)?;
    expect_string(parser)?;
    parse_backup_options(parser)?;
    parser.finish(checkpoint, NodeKind::BackupStmt);
    Ok(())
}

pub fn parse_restore_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Restore)?;
    parse_backup_target(parser)?;
    parser.expect_keyword(Keyword::From)?;
    expect_string(parser)?;
    parse_backup_options(parser)?;
    parser.finish(checkpoint, NodeKind::RestoreStmt);
    Ok(())
}
