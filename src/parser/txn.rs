use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::parser::{PResult, Parser};

/// `BEGIN [PESSIMISTIC|OPTIMISTIC] [WORK]` or `START TRANSACTION [READ ONLY |
/// READ WRITE | WITH CONSISTENT SNAPSHOT], ...`
pub fn parse_begin_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat_keyword(Keyword::Begin) {
        parser.eat_any_keyword(&[Keyword::Pessimistic, Keyword::Optimistic]);
        parser.eat_keyword(Keyword::Work);
    } else {
        parser.expect_keywords(&[Keyword::Start, Keyword::Transaction])?;
        if at_start_characteristic(parser) {
            parse_start_characteristic(parser)?;
            while parser.eat(TokenKind::Comma) {
                parse_start_characteristic(parser)?;
            }
        }
    }

    parser.finish(checkpoint, NodeKind::BeginStmt);
    Ok(())
}

fn at_start_characteristic(parser: &mut Parser) -> bool {
    parser.at_any_keyword(&[Keyword::Read, Keyword::With])
}

fn parse_start_characteristic(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    if parser.eat_keyword(Keyword::With) {
        parser.expect_keywords(&[Keyword::Consistent, Keyword::Snapshot])?;
    } else {
        parser.expect_keyword(Keyword::Read)?;
        parser.expect_any_keyword(&[Keyword::Only, Keyword::Write])?;
    }
    parser.finish(checkpoint, NodeKind::TransactionCharacteristic);
    Ok(())
}

/// `[AND [NO] CHAIN] [[NO] RELEASE]` after COMMIT and ROLLBACK.
fn parse_completion_options(parser: &mut Parser) -> PResult {
    if parser.eat_keyword(Keyword::And) {
        parser.eat_keyword(Keyword::No);
        parser.expect_keyword(Keyword::Chain)?;
    }
    if parser.at_keyword(Keyword::No) && parser.nth_is_keyword(1, Keyword::Release) {
        parser.advance_as_keyword();
    }
    parser.eat_keyword(Keyword::Release);
    Ok(())
}

pub fn parse_commit_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Commit)?;
    parser.eat_keyword(Keyword::Work);
    parse_completion_options(parser)?;
    parser.finish(checkpoint, NodeKind::CommitStmt);
    Ok(())
}

/// `ROLLBACK [WORK] [TO [SAVEPOINT] s]`
pub fn parse_rollback_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Rollback)?;
    parser.eat_keyword(Keyword::Work);

    if parser.eat_keyword(Keyword::To) {
        parser.eat_keyword(Keyword::Savepoint);
        parser.expect_identifier()?;
    } else {
        parse_completion_options(parser)?;
    }

    parser.finish(checkpoint, NodeKind::RollbackStmt);
    Ok(())
}

pub fn parse_savepoint_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Savepoint)?;
    parser.expect_identifier()?;
    parser.finish(checkpoint, NodeKind::SavepointStmt);
    Ok(())
}

pub fn parse_release_savepoint_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Release, Keyword::Savepoint])?;
    parser.expect_identifier()?;
    parser.finish(checkpoint, NodeKind::ReleaseSavepointStmt);
    Ok(())
}

/// `SET [GLOBAL|SESSION] TRANSACTION characteristic, ...` where each
/// characteristic is an isolation level or an access mode.
pub fn parse_set_transaction_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keyword(Keyword::Set)?;
    parser.eat_any_keyword(&[Keyword::Global, Keyword::Session]);
    parser.expect_keyword(Keyword::Transaction)?;

    loop {
        let characteristic = parser.checkpoint();
        if parser.eat_keyword(Keyword::Isolation) {
            parser.expect_keyword(Keyword::Level)?;
            parse_isolation_level(parser)?;
        } else {
            parser.expect_keyword(Keyword::Read)?;
            parser.expect_any_keyword(&[Keyword::Only, Keyword::Write])?;
        }
        parser.finish(characteristic, NodeKind::TransactionCharacteristic);

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.finish(checkpoint, NodeKind::SetTransactionStmt);
    Ok(())
}

fn parse_isolation_level(parser: &mut Parser) -> PResult {
    if parser.eat_keyword(Keyword::Serializable) {
        return Ok(());
    }
    if parser.eat_keyword(Keyword::Repeatable) {
        return parser.expect_keyword(Keyword::Read);
    }
    parser.expect_keyword(Keyword::Read)?;
    parser.expect_any_keyword(&[Keyword::Committed, Keyword::Uncommitted])
}
