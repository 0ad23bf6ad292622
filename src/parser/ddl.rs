//! Data definition statements.
//!
//! `CREATE`, `ALTER` and `DROP` dispatch on the object keyword that follows
//! them; each sub-parser consumes the leading verb itself.

use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    account::{
        parse_alter_user_stmt, parse_create_role_stmt, parse_create_user_stmt,
        parse_drop_role_stmt, parse_drop_user_stmt, parse_user_identity,
    },
    admin::parse_deallocate_stmt,
    expr::{
        eat_equals, expect_number, expect_string, parse_charset_name, parse_column_name_list,
        parse_expr, parse_identifier, parse_if_exists, parse_if_not_exists, parse_signed_number,
    },
    lookups::BindingPower,
    parser::{PResult, Parser},
    partition::{parse_partition_definition_list, parse_partition_options},
    query::{parse_select_stmt, parse_table_name, parse_table_name_list},
    types::{parse_charset_clause, parse_collate_clause, parse_data_type, DataTypeFlavor},
};

pub fn parse_create_stmt(parser: &mut Parser) -> PResult {
    match parser.peek_nth(1).keyword {
        Some(Keyword::Database | Keyword::Schema) => parse_create_database_stmt(parser),
        Some(Keyword::Temporary | Keyword::Table) => parse_create_table_stmt(parser),
        Some(Keyword::Unique | Keyword::Fulltext | Keyword::Spatial | Keyword::Index) => {
            parse_create_index_stmt(parser)
        }
        Some(Keyword::Or | Keyword::Algorithm | Keyword::Definer | Keyword::Sql | Keyword::View) => {
            parse_create_view_stmt(parser)
        }
        Some(Keyword::Sequence) => parse_create_sequence_stmt(parser),
        Some(Keyword::User) => parse_create_user_stmt(parser),
        Some(Keyword::Role) => parse_create_role_stmt(parser),
        _ => {
            parser.advance_as_keyword();
            parser.expected("object type")
        }
    }
}

pub fn parse_alter_stmt(parser: &mut Parser) -> PResult {
    match parser.peek_nth(1).keyword {
        Some(Keyword::Database | Keyword::Schema) => parse_alter_database_stmt(parser),
        Some(Keyword::Ignore | Keyword::Table) => parse_alter_table_stmt(parser),
        Some(Keyword::User) => parse_alter_user_stmt(parser),
        _ => {
            parser.advance_as_keyword();
            parser.expected("object type")
        }
    }
}

pub fn parse_drop_stmt(parser: &mut Parser) -> PResult {
    match parser.peek_nth(1).keyword {
        Some(Keyword::Database | Keyword::Schema) => parse_drop_database_stmt(parser),
        Some(Keyword::Temporary | Keyword::Table | Keyword::Tables) => parse_drop_table_stmt(parser),
        Some(Keyword::Index) => parse_drop_index_stmt(parser),
        Some(Keyword::View) => parse_drop_object_list(parser, Keyword::View, NodeKind::DropViewStmt),
        Some(Keyword::Sequence) => {
            parse_drop_object_list(parser, Keyword::Sequence, NodeKind::DropSequenceStmt)
        }
        Some(Keyword::User) => parse_drop_user_stmt(parser),
        Some(Keyword::Role) => parse_drop_role_stmt(parser),
        Some(Keyword::Prepare) => parse_deallocate_stmt(parser),
        _ => {
            parser.advance_as_keyword();
            parser.expected("object type")
        }
    }
}

/* Databases */

fn parse_create_database_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Create)?;
    parser.expect_any_keyword(&[Keyword::Database, Keyword::Schema])?;
    parse_if_not_exists(parser)?;
    parse_identifier(parser)?;
    parse_database_options(parser)?;
    parser.finish(checkpoint, NodeKind::CreateDatabaseStmt);
    Ok(())
}

fn parse_alter_database_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Alter)?;
    parser.expect_any_keyword(&[Keyword::Database, Keyword::Schema])?;
    if parser.at_identifier() && !at_database_option(parser) {
        parse_identifier(parser)?;
    }
    let options = parse_database_options(parser)?;
    if options == 0 {
        return parser.unexpected();
    }
    parser.finish(checkpoint, NodeKind::AlterDatabaseStmt);
    Ok(())
}

fn parse_drop_database_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Drop)?;
    parser.expect_any_keyword(&[Keyword::Database, Keyword::Schema])?;
    parse_if_exists(parser)?;
    parse_identifier(parser)?;
    parser.finish(checkpoint, NodeKind::DropDatabaseStmt);
    Ok(())
}

fn at_database_option(parser: &mut Parser) -> bool {
    parser.at_any_keyword(&[
        Keyword::Default,
        Keyword::Character,
        Keyword::Charset,
        Keyword::Collate,
        Keyword::Encryption,
    ])
}

/// `[DEFAULT] CHARACTER SET|CHARSET [=] cs`, `[DEFAULT] COLLATE [=] c`,
/// `ENCRYPTION [=] 'Y'`. Returns how many were parsed.
fn parse_database_options(parser: &mut Parser) -> PResult<usize> {
    let mut count = 0;
    while at_database_option(parser) {
        let checkpoint = parser.checkpoint();
        parser.eat_keyword(Keyword::Default);
        if parser.at_keyword(Keyword::Collate) {
            parse_collate_clause(parser)?;
        } else if parser.eat_keyword(Keyword::Encryption) {
            eat_equals(parser);
            expect_string(parser)?;
        } else {
            parse_charset_clause(parser)?;
        }
        parser.finish(checkpoint, NodeKind::DatabaseOption);
        count += 1;
    }
    Ok(count)
}

/* Tables */

fn parse_create_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Create)?;
    parser.eat_keyword(Keyword::Temporary);
    parser.expect_keyword(Keyword::Table)?;
    parse_if_not_exists(parser)?;
    parse_table_name(parser)?;

    let paren = parser.current_token_kind() == TokenKind::OpenParen;
    if parser.at_keyword(Keyword::Like) || paren && parser.nth_is_keyword(1, Keyword::Like) {
        let like = parser.checkpoint();
        let wrapped = parser.eat(TokenKind::OpenParen);
        parser.expect_keyword(Keyword::Like)?;
        parse_table_name(parser)?;
        if wrapped {
            parser.expect(TokenKind::CloseParen)?;
        }
        parser.finish(like, NodeKind::CreateLikeClause);
        parser.finish(checkpoint, NodeKind::CreateTableStmt);
        return Ok(());
    }

    if paren && !parser.at_query_start(0) {
        parse_table_element_list(parser)?;
    }
    if at_table_option(parser, 0) {
        parse_table_option_list(parser)?;
    }
    if parser.at_keyword(Keyword::Partition) {
        parse_partition_options(parser)?;
    }

    parser.eat_any_keyword(&[Keyword::Ignore, Keyword::Replace]);
    if parser.eat_keyword(Keyword::As) || parser.at_query_start(0) {
        parse_select_stmt(parser)?;
    }

    parser.finish(checkpoint, NodeKind::CreateTableStmt);
    Ok(())
}

fn parse_table_element_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;
    parse_table_element(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_table_element(parser)?;
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::TableElementList);
    Ok(())
}

fn at_table_constraint(parser: &Parser) -> bool {
    let token = parser.current_token();
    token.kind == TokenKind::Keyword
        && matches!(
            token.keyword,
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Index
                    | Keyword::Key
                    | Keyword::Fulltext
                    | Keyword::Spatial
                    | Keyword::Foreign
                    | Keyword::Check
            )
        )
}

fn parse_table_element(parser: &mut Parser) -> PResult {
    if at_table_constraint(parser) {
        parse_table_constraint(parser)
    } else {
        parse_column_def(parser)
    }
}

/// `name type [options]`
fn parse_column_def(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_identifier()?;
    parse_data_type(parser, DataTypeFlavor::Column)?;
    while parse_column_option(parser)? {}
    parser.finish(checkpoint, NodeKind::ColumnDef);
    Ok(())
}

/// One column attribute. Returns false when none is present.
fn parse_column_option(parser: &mut Parser) -> PResult<bool> {
    let checkpoint = parser.checkpoint();

    match parser.current_keyword() {
        Some(Keyword::Not) if parser.nth_is_keyword(1, Keyword::Null) => {
            parser.advance_as_keyword();
            parser.advance_as_keyword();
        }
        Some(Keyword::Null | Keyword::AutoIncrement | Keyword::Visible | Keyword::Invisible) => {
            parser.advance_as_keyword();
        }
        Some(Keyword::Default) => {
            parser.advance_as_keyword();
            parse_expr(parser, BindingPower::Collate)?;
        }
        Some(Keyword::On) => {
            parser.expect_keywords(&[Keyword::On, Keyword::Update])?;
            parse_expr(parser, BindingPower::Collate)?;
        }
        Some(Keyword::AutoRandom) => {
            parser.advance_as_keyword();
            if parser.eat(TokenKind::OpenParen) {
                expect_number(parser)?;
                if parser.eat(TokenKind::Comma) {
                    expect_number(parser)?;
                }
                parser.expect(TokenKind::CloseParen)?;
            }
        }
        Some(Keyword::Primary) => {
            parser.advance_as_keyword();
            parser.expect_keyword(Keyword::Key)?;
        }
        Some(Keyword::Key) => parser.advance_as_keyword(),
        Some(Keyword::Unique) => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Key);
        }
        // Nothing else may follow a column type, so the string is required.
        Some(Keyword::Comment) => {
            parser.advance_as_keyword();
            expect_string(parser)?;
        }
        Some(Keyword::Collate) => {
            parser.advance_as_keyword();
            parse_charset_name(parser)?;
        }
        Some(Keyword::Generated | Keyword::As) => {
            if parser.eat_keyword(Keyword::Generated) {
                parser.expect_keyword(Keyword::Always)?;
            }
            parser.expect_keyword(Keyword::As)?;
            parser.expect(TokenKind::OpenParen)?;
            parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseParen)?;
            parser.eat_any_keyword(&[Keyword::Virtual, Keyword::Stored]);
        }
        Some(Keyword::Constraint | Keyword::Check) => {
            if parser.eat_keyword(Keyword::Constraint) && parser.at_identifier() {
                parser.advance_as_identifier();
            }
            parse_check_body(parser)?;
        }
        Some(Keyword::References) => {
            parse_reference_def(parser)?;
        }
        Some(Keyword::Serial) if parser.nth_is_keyword(1, Keyword::Default) => {
            parser.expect_keywords(&[Keyword::Serial, Keyword::Default, Keyword::Value])?;
        }
        Some(Keyword::Storage) => {
            parser.advance_as_keyword();
            parser.expect_identifier()?;
        }
        _ => return Ok(false),
    }

    parser.finish(checkpoint, NodeKind::ColumnOption);
    Ok(true)
}

/// `CHECK (expr) [[NOT] ENFORCED]`
fn parse_check_body(parser: &mut Parser) -> PResult {
    parser.expect_keyword(Keyword::Check)?;
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    if parser.at_keyword(Keyword::Not) && parser.nth_is_keyword(1, Keyword::Enforced) {
        parser.advance_as_keyword();
    }
    parser.eat_keyword(Keyword::Enforced);
    Ok(())
}

/// `REFERENCES t (parts) [MATCH ...] [ON DELETE action] [ON UPDATE action]`
fn parse_reference_def(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::References)?;
    parse_table_name(parser)?;
    parse_index_part_list(parser)?;

    if parser.eat_keyword(Keyword::Match) {
        parser.expect_any_keyword(&[Keyword::Full, Keyword::Partial, Keyword::Simple])?;
    }

    while parser.at_keyword(Keyword::On)
        && matches!(
            parser.peek_nth(1).keyword,
            Some(Keyword::Delete | Keyword::Update)
        )
    {
        let action = parser.checkpoint();
        parser.advance_as_keyword();
        parser.advance_as_keyword();
        if parser.eat_keyword(Keyword::Set) {
            parser.expect_any_keyword(&[Keyword::Null, Keyword::Default])?;
        } else if parser.eat_keyword(Keyword::No) {
            parser.expect_keyword(Keyword::Action)?;
        } else {
            parser.expect_any_keyword(&[Keyword::Restrict, Keyword::Cascade])?;
        }
        parser.finish(action, NodeKind::ReferentialAction);
    }

    parser.finish(checkpoint, NodeKind::ReferenceDef);
    Ok(())
}

/// Primary, unique, plain, fulltext and spatial indexes, foreign keys and
/// checks, each optionally named by `CONSTRAINT [name]`.
fn parse_table_constraint(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat_keyword(Keyword::Constraint) && parser.at_identifier() {
        parser.advance_as_identifier();
    }

    match parser.current_keyword() {
        Some(Keyword::Primary) => {
            parser.expect_keywords(&[Keyword::Primary, Keyword::Key])?;
            parse_index_options(parser)?;
            parse_index_part_list(parser)?;
            parse_index_options(parser)?;
        }
        Some(Keyword::Unique | Keyword::Index | Keyword::Key | Keyword::Fulltext | Keyword::Spatial) => {
            let bare = parser.current_token().is_keyword(Keyword::Index)
                || parser.current_token().is_keyword(Keyword::Key);
            parser.advance_as_keyword();
            if !bare {
                parser.eat_any_keyword(&[Keyword::Index, Keyword::Key]);
            }
            if parser.at_identifier() {
                parser.advance_as_identifier();
            }
            parse_index_options(parser)?;
            parse_index_part_list(parser)?;
            parse_index_options(parser)?;
        }
        Some(Keyword::Foreign) => {
            parser.expect_keywords(&[Keyword::Foreign, Keyword::Key])?;
            if parser.at_identifier() {
                parser.advance_as_identifier();
            }
            parse_column_name_list(parser)?;
            parse_reference_def(parser)?;
        }
        Some(Keyword::Check) => parse_check_body(parser)?,
        _ => {
            parser.at_any_keyword(&[
                Keyword::Primary,
                Keyword::Unique,
                Keyword::Index,
                Keyword::Key,
                Keyword::Foreign,
                Keyword::Check,
            ]);
            return parser.unexpected();
        }
    }

    parser.finish(checkpoint, NodeKind::TableConstraint);
    Ok(())
}

/// `(col[(len)] [ASC|DESC], (expr), ...)`
fn parse_index_part_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect(TokenKind::OpenParen)?;

    loop {
        let part = parser.checkpoint();
        if parser.eat(TokenKind::OpenParen) {
            parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseParen)?;
        } else {
            parser.expect_identifier()?;
            if parser.eat(TokenKind::OpenParen) {
                expect_number(parser)?;
                parser.expect(TokenKind::CloseParen)?;
            }
        }
        parser.eat_any_keyword(&[Keyword::Asc, Keyword::Desc]);
        parser.finish(part, NodeKind::IndexPart);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.finish(checkpoint, NodeKind::IndexPartList);
    Ok(())
}

/// `USING BTREE|HASH`, `KEY_BLOCK_SIZE [=] n`, `COMMENT 's'`,
/// `VISIBLE|INVISIBLE`, `CLUSTERED|NONCLUSTERED`, `WITH PARSER p`.
fn parse_index_options(parser: &mut Parser) -> PResult {
    loop {
        let checkpoint = parser.checkpoint();
        match parser.current_keyword() {
            Some(Keyword::Using) => {
                parser.advance_as_keyword();
                parser.expect_any_keyword(&[Keyword::Btree, Keyword::Hash])?;
            }
            Some(Keyword::KeyBlockSize) => {
                parser.advance_as_keyword();
                eat_equals(parser);
                expect_number(parser)?;
            }
            Some(Keyword::Comment) => {
                parser.advance_as_keyword();
                expect_string(parser)?;
            }
            Some(
                Keyword::Visible | Keyword::Invisible | Keyword::Clustered | Keyword::Nonclustered,
            ) => parser.advance_as_keyword(),
            Some(Keyword::With) if parser.nth_is_keyword(1, Keyword::Parser) => {
                parser.advance_as_keyword();
                parser.advance_as_keyword();
                parser.expect_identifier()?;
            }
            _ => return Ok(()),
        }
        parser.finish(checkpoint, NodeKind::IndexOption);
    }
}

const TABLE_OPTIONS: &[Keyword] = &[
    Keyword::Engine,
    Keyword::Character,
    Keyword::Charset,
    Keyword::Collate,
    Keyword::Comment,
    Keyword::AutoIncrement,
    Keyword::RowFormat,
    Keyword::KeyBlockSize,
    Keyword::ShardRowIdBits,
    Keyword::PreSplitRegions,
    Keyword::AutoIdCache,
    Keyword::AutoRandom,
    Keyword::Ttl,
    Keyword::MaxRows,
    Keyword::MinRows,
    Keyword::Compression,
    Keyword::Encryption,
    Keyword::Password,
];

fn at_table_option(parser: &Parser, n: usize) -> bool {
    let token = parser.peek_nth(n);
    if token.is_keyword(Keyword::Default) {
        return matches!(
            parser.peek_nth(n + 1).keyword,
            Some(Keyword::Character | Keyword::Charset | Keyword::Collate)
        );
    }
    token
        .keyword
        .filter(|_| matches!(token.kind, TokenKind::Keyword | TokenKind::Word))
        .is_some_and(|keyword| TABLE_OPTIONS.contains(&keyword))
}

/// Table options in written order, separated by spaces or commas.
fn parse_table_option_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    loop {
        parse_table_option(parser)?;
        if parser.current_token_kind() == TokenKind::Comma && at_table_option(parser, 1) {
            parser.advance();
        } else if !at_table_option(parser, 0) {
            break;
        }
    }
    parser.finish(checkpoint, NodeKind::TableOptionList);
    Ok(())
}

fn parse_table_option(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.eat_keyword(Keyword::Default);

    match parser.current_keyword() {
        Some(Keyword::Character | Keyword::Charset) => parse_charset_clause(parser)?,
        Some(Keyword::Collate) => parse_collate_clause(parser)?,
        Some(Keyword::Engine) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            if parser.current_token_kind() == TokenKind::String {
                expect_string(parser)?;
            } else {
                parser.expect_identifier()?;
            }
        }
        Some(Keyword::Comment | Keyword::Compression | Keyword::Encryption | Keyword::Password) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            expect_string(parser)?;
        }
        Some(Keyword::RowFormat) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            match parser.current_token_kind() {
                TokenKind::Keyword | TokenKind::Word => parser.advance_as_keyword(),
                _ => return parser.expected("row format"),
            }
        }
        Some(Keyword::Ttl) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            parse_expr(parser, BindingPower::Default)?;
        }
        Some(_) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            expect_number(parser)?;
        }
        None => return parser.expected("table option"),
    }

    parser.finish(checkpoint, NodeKind::TableOption);
    Ok(())
}

fn parse_alter_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Alter)?;
    parser.eat_keyword(Keyword::Ignore);
    parser.expect_keyword(Keyword::Table)?;
    parse_table_name(parser)?;

    // A bare `PARTITION BY` repartitions without any other alteration.
    if !parser.at_keyword(Keyword::Partition) {
        let specs = parser.checkpoint();
        parse_alter_table_spec(parser)?;
        while parser.eat(TokenKind::Comma) {
            parse_alter_table_spec(parser)?;
        }
        parser.finish(specs, NodeKind::AlterTableSpecList);
    }

    if parser.at_keyword(Keyword::Partition) {
        let partition = parser.checkpoint();
        parse_partition_options(parser)?;
        parser.finish(partition, NodeKind::PartitionBySpec);
    }

    parser.finish(checkpoint, NodeKind::AlterTableStmt);
    Ok(())
}

fn parse_column_position(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if !parser.eat_keyword(Keyword::First) {
        if !parser.eat_keyword(Keyword::After) {
            return Ok(());
        }
        parser.expect_identifier()?;
    }
    parser.finish(checkpoint, NodeKind::ColumnPosition);
    Ok(())
}

fn parse_partition_names_or_all(parser: &mut Parser) -> PResult {
    if parser.eat_keyword(Keyword::All) {
        return Ok(());
    }
    parser.expect_identifier()?;
    while parser.current_token_kind() == TokenKind::Comma && parser.nth_kind(1) == TokenKind::Word {
        parser.advance();
        parser.expect_identifier()?;
    }
    Ok(())
}

fn parse_alter_table_spec(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    let kind = match parser.current_keyword() {
        Some(Keyword::Add) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Partition) {
                if parser.eat_keyword(Keyword::Partitions) {
                    expect_number(parser)?;
                } else {
                    parse_partition_definition_list(parser)?;
                }
                NodeKind::AddPartitionSpec
            } else if at_table_constraint(parser) {
                parse_table_constraint(parser)?;
                NodeKind::AddConstraintSpec
            } else {
                parser.eat_keyword(Keyword::Column);
                if parser.eat(TokenKind::OpenParen) {
                    parse_column_def(parser)?;
                    while parser.eat(TokenKind::Comma) {
                        parse_column_def(parser)?;
                    }
                    parser.expect(TokenKind::CloseParen)?;
                } else {
                    parse_column_def(parser)?;
                    parse_column_position(parser)?;
                }
                NodeKind::AddColumnSpec
            }
        }
        Some(Keyword::Drop) => {
            parser.advance_as_keyword();
            match parser.current_keyword() {
                Some(Keyword::Index | Keyword::Key) => {
                    parser.advance_as_keyword();
                    parse_if_exists(parser)?;
                    parser.expect_identifier()?;
                    NodeKind::DropIndexSpec
                }
                Some(Keyword::Primary) => {
                    parser.expect_keywords(&[Keyword::Primary, Keyword::Key])?;
                    NodeKind::DropPrimaryKeySpec
                }
                Some(Keyword::Foreign) => {
                    parser.expect_keywords(&[Keyword::Foreign, Keyword::Key])?;
                    parse_if_exists(parser)?;
                    parser.expect_identifier()?;
                    NodeKind::DropForeignKeySpec
                }
                Some(Keyword::Check | Keyword::Constraint) => {
                    parser.advance_as_keyword();
                    parser.expect_identifier()?;
                    NodeKind::DropCheckSpec
                }
                Some(Keyword::Partition) => {
                    parser.advance_as_keyword();
                    parse_if_exists(parser)?;
                    parse_partition_names_or_all(parser)?;
                    NodeKind::DropPartitionSpec
                }
                _ => {
                    parser.eat_keyword(Keyword::Column);
                    parse_if_exists(parser)?;
                    parser.expect_identifier()?;
                    parser.eat_any_keyword(&[Keyword::Restrict, Keyword::Cascade]);
                    NodeKind::DropColumnSpec
                }
            }
        }
        Some(Keyword::Modify) => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Column);
            parse_column_def(parser)?;
            parse_column_position(parser)?;
            NodeKind::ModifyColumnSpec
        }
        Some(Keyword::Change) => {
            parser.advance_as_keyword();
            parser.eat_keyword(Keyword::Column);
            parser.expect_identifier()?;
            parse_column_def(parser)?;
            parse_column_position(parser)?;
            NodeKind::ChangeColumnSpec
        }
        Some(Keyword::Alter) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Index) {
                parser.expect_identifier()?;
                parser.expect_any_keyword(&[Keyword::Visible, Keyword::Invisible])?;
                NodeKind::AlterIndexVisibilitySpec
            } else {
                parser.eat_keyword(Keyword::Column);
                parser.expect_identifier()?;
                if parser.eat_keyword(Keyword::Set) {
                    parser.expect_keyword(Keyword::Default)?;
                    parse_expr(parser, BindingPower::Collate)?;
                } else {
                    parser.expect_keywords(&[Keyword::Drop, Keyword::Default])?;
                }
                NodeKind::AlterColumnSpec
            }
        }
        Some(Keyword::Rename) => {
            parser.advance_as_keyword();
            if parser.eat_keyword(Keyword::Column) {
                parser.expect_identifier()?;
                parser.expect_keyword(Keyword::To)?;
                parser.expect_identifier()?;
                NodeKind::RenameColumnSpec
            } else if parser.eat_any_keyword(&[Keyword::Index, Keyword::Key]) {
                parser.expect_identifier()?;
                parser.expect_keyword(Keyword::To)?;
                parser.expect_identifier()?;
                NodeKind::RenameIndexSpec
            } else {
                parser.eat_any_keyword(&[Keyword::To, Keyword::As]);
                parse_table_name(parser)?;
                NodeKind::RenameTableSpec
            }
        }
        Some(Keyword::Algorithm) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            parse_option_word(parser)?;
            NodeKind::AlgorithmSpec
        }
        Some(Keyword::Lock) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            parse_option_word(parser)?;
            NodeKind::LockSpec
        }
        Some(Keyword::Truncate) => {
            parser.expect_keywords(&[Keyword::Truncate, Keyword::Partition])?;
            parse_partition_names_or_all(parser)?;
            NodeKind::TruncatePartitionSpec
        }
        Some(Keyword::Coalesce) => {
            parser.expect_keywords(&[Keyword::Coalesce, Keyword::Partition])?;
            expect_number(parser)?;
            NodeKind::CoalescePartitionSpec
        }
        Some(Keyword::Reorganize) => {
            parser.expect_keywords(&[Keyword::Reorganize, Keyword::Partition])?;
            parse_partition_names_or_all(parser)?;
            parser.expect_keyword(Keyword::Into)?;
            parse_partition_definition_list(parser)?;
            NodeKind::ReorganizePartitionSpec
        }
        Some(Keyword::Exchange) => {
            parser.expect_keywords(&[Keyword::Exchange, Keyword::Partition])?;
            parser.expect_identifier()?;
            parser.expect_keywords(&[Keyword::With, Keyword::Table])?;
            parse_table_name(parser)?;
            if parser.eat_any_keyword(&[Keyword::With, Keyword::Without]) {
                parser.expect_keyword(Keyword::Validation)?;
            }
            NodeKind::ExchangePartitionSpec
        }
        Some(Keyword::Remove) => {
            parser.expect_keywords(&[Keyword::Remove, Keyword::Partitioning])?;
            NodeKind::RemovePartitioningSpec
        }
        Some(Keyword::Convert) => {
            parser.expect_keyword(Keyword::Convert)?;
            parser.expect_keyword(Keyword::To)?;
            parse_charset_clause(parser)?;
            if parser.at_keyword(Keyword::Collate) {
                parse_collate_clause(parser)?;
            }
            NodeKind::ConvertCharsetSpec
        }
        _ if at_table_option(parser, 0) => {
            parse_table_option_list(parser)?;
            return Ok(());
        }
        _ => return parser.expected("ALTER TABLE specification"),
    };

    parser.finish(checkpoint, kind);
    Ok(())
}

/// A bare option value such as `INPLACE`, `DEFAULT` or `NONE`.
fn parse_option_word(parser: &mut Parser) -> PResult {
    match parser.current_token_kind() {
        TokenKind::Word | TokenKind::Keyword => {
            parser.advance_as_keyword();
            Ok(())
        }
        _ => parser.expected("option value"),
    }
}

fn parse_drop_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Drop)?;
    parser.eat_keyword(Keyword::Temporary);
    parser.expect_any_keyword(&[Keyword::Table, Keyword::Tables])?;
    parse_if_exists(parser)?;
    parse_table_name_list(parser)?;
    parser.eat_any_keyword(&[Keyword::Restrict, Keyword::Cascade]);
    parser.finish(checkpoint, NodeKind::DropTableStmt);
    Ok(())
}

pub fn parse_truncate_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Truncate)?;
    parser.eat_keyword(Keyword::Table);
    parse_table_name(parser)?;
    parser.finish(checkpoint, NodeKind::TruncateTableStmt);
    Ok(())
}

/// `RENAME TABLE a TO b, c TO d`
pub fn parse_rename_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Rename)?;
    parser.expect_any_keyword(&[Keyword::Table, Keyword::Tables])?;

    loop {
        let pair = parser.checkpoint();
        parse_table_name(parser)?;
        parser.expect_keyword(Keyword::To)?;
        parse_table_name(parser)?;
        parser.finish(pair, NodeKind::RenameTablePair);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::RenameTableStmt);
    Ok(())
}

/* Indexes */

fn parse_create_index_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Create)?;
    parser.eat_any_keyword(&[Keyword::Unique, Keyword::Fulltext, Keyword::Spatial]);
    parser.expect_keyword(Keyword::Index)?;
    parse_if_not_exists(parser)?;
    parser.expect_identifier()?;
    parse_index_options(parser)?;
    parser.expect_keyword(Keyword::On)?;
    parse_table_name(parser)?;
    parse_index_part_list(parser)?;
    parse_index_options(parser)?;

    while parser.at_any_keyword(&[Keyword::Algorithm, Keyword::Lock]) {
        let spec = parser.checkpoint();
        let kind = if parser.current_token().is_keyword(Keyword::Lock) {
            NodeKind::LockSpec
        } else {
            NodeKind::AlgorithmSpec
        };
        parser.advance_as_keyword();
        eat_equals(parser);
        parse_option_word(parser)?;
        parser.finish(spec, kind);
    }

    parser.finish(checkpoint, NodeKind::CreateIndexStmt);
    Ok(())
}

fn parse_drop_index_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Drop, Keyword::Index])?;
    parse_if_exists(parser)?;
    parser.expect_identifier()?;
    parser.expect_keyword(Keyword::On)?;
    parse_table_name(parser)?;
    parser.finish(checkpoint, NodeKind::DropIndexStmt);
    Ok(())
}

/* Views */

fn parse_create_view_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Create)?;
    parser.eat_keywords(&[Keyword::Or, Keyword::Replace])?;

    if parser.eat_keyword(Keyword::Algorithm) {
        parser.expect(TokenKind::Equals)?;
        parser.expect_any_keyword(&[Keyword::Undefined, Keyword::Merge, Keyword::Temptable])?;
    }
    if parser.at_keyword(Keyword::Definer) {
        let definer = parser.checkpoint();
        parser.advance_as_keyword();
        parser.expect(TokenKind::Equals)?;
        parse_user_identity(parser)?;
        parser.finish(definer, NodeKind::DefinerClause);
    }
    if parser.eat_keywords(&[Keyword::Sql, Keyword::Security])? {
        parser.expect_any_keyword(&[Keyword::Definer, Keyword::Invoker])?;
    }

    parser.expect_keyword(Keyword::View)?;
    parse_table_name(parser)?;
    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_column_name_list(parser)?;
    }
    parser.expect_keyword(Keyword::As)?;
    parse_select_stmt(parser)?;

    if parser.at_keyword(Keyword::With) {
        let check = parser.checkpoint();
        parser.advance_as_keyword();
        parser.eat_any_keyword(&[Keyword::Cascaded, Keyword::Local]);
        parser.expect_keywords(&[Keyword::Check, Keyword::Option])?;
        parser.finish(check, NodeKind::ViewCheckOption);
    }

    parser.finish(checkpoint, NodeKind::CreateViewStmt);
    Ok(())
}

/// `DROP VIEW|SEQUENCE [IF EXISTS] a, b [RESTRICT|CASCADE]`
fn parse_drop_object_list(parser: &mut Parser, object: Keyword, kind: NodeKind) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Drop)?;
    parser.expect_keyword(object)?;
    parse_if_exists(parser)?;
    parse_table_name_list(parser)?;
    parser.eat_any_keyword(&[Keyword::Restrict, Keyword::Cascade]);
    parser.finish(checkpoint, kind);
    Ok(())
}

/* Sequences */

fn parse_create_sequence_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Create, Keyword::Sequence])?;
    parse_if_not_exists(parser)?;
    parse_table_name(parser)?;

    while parse_sequence_option(parser)? {
        parser.eat(TokenKind::Comma);
    }
    if at_table_option(parser, 0) {
        parse_table_option_list(parser)?;
    }

    parser.finish(checkpoint, NodeKind::CreateSequenceStmt);
    Ok(())
}

/// One sequence option. Returns false when none is present.
fn parse_sequence_option(parser: &mut Parser) -> PResult<bool> {
    let checkpoint = parser.checkpoint();

    match parser.current_keyword() {
        Some(Keyword::Increment) => {
            parser.advance_as_keyword();
            if !parser.eat_keyword(Keyword::By) {
                eat_equals(parser);
            }
            parse_signed_number(parser)?;
        }
        Some(Keyword::Start) => {
            parser.advance_as_keyword();
            if !parser.eat_keyword(Keyword::With) {
                eat_equals(parser);
            }
            parse_signed_number(parser)?;
        }
        Some(Keyword::Minvalue | Keyword::Maxvalue | Keyword::Cache) => {
            parser.advance_as_keyword();
            eat_equals(parser);
            parse_signed_number(parser)?;
        }
        Some(
            Keyword::Nominvalue
            | Keyword::Nomaxvalue
            | Keyword::Nocache
            | Keyword::Cycle
            | Keyword::Nocycle,
        ) => parser.advance_as_keyword(),
        Some(Keyword::No) => {
            parser.advance_as_keyword();
            parser.expect_any_keyword(&[
                Keyword::Minvalue,
                Keyword::Maxvalue,
                Keyword::Cache,
                Keyword::Cycle,
            ])?;
        }
        _ => return Ok(false),
    }

    parser.finish(checkpoint, NodeKind::SequenceOption);
    Ok(true)
}

/* Recovery */

/// `FLASHBACK TABLE t [TO t2]` or `FLASHBACK CLUSTER TO TIMESTAMP 'ts'`.
pub fn parse_flashback_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Flashback)?;

    if parser.eat_keyword(Keyword::Cluster) {
        parser.expect_keywords(&[Keyword::To, Keyword::Timestamp])?;
        expect_string(parser)?;
        parser.finish(checkpoint, NodeKind::FlashbackClusterStmt);
        return Ok(());
    }

    parser.expect_keyword(Keyword::Table)?;
    parse_table_name(parser)?;
    if parser.eat_keyword(Keyword::To) {
        parser.expect_identifier()?;
    }
    parser.finish(checkpoint, NodeKind::FlashbackTableStmt);
    Ok(())
}

/// `RECOVER TABLE t [n]` or `RECOVER TABLE BY JOB n`.
pub fn parse_recover_table_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Recover, Keyword::Table])?;

    if parser.at_keyword(Keyword::By) {
        parser.expect_keywords(&[Keyword::By, Keyword::Job])?;
        expect_number(parser)?;
    } else {
        parse_table_name(parser)?;
        if parser.current_token_kind() == TokenKind::Integer {
            expect_number(parser)?;
        }
    }

    parser.finish(checkpoint, NodeKind::RecoverTableStmt);
    Ok(())
}
