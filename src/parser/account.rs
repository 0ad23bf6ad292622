//! Users, roles and privileges.

use crate::{
    ast::kinds::NodeKind,
    lexer::{keywords::Keyword, tokens::TokenKind},
};

use super::{
    expr::{expect_number, expect_string, parse_column_name_list, parse_if_exists, parse_if_not_exists},
    parser::{PResult, Parser},
};

/// `'name'@'host'`, `name@host`, `name` or `CURRENT_USER[()]`.
pub fn parse_user_identity(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat_keyword(Keyword::CurrentUser) {
        if parser.current_token_kind() == TokenKind::OpenParen
            && parser.nth_kind(1) == TokenKind::CloseParen
        {
            parser.advance();
            parser.advance();
        }
        parser.finish(checkpoint, NodeKind::UserIdentity);
        return Ok(());
    }

    match parser.current_token_kind() {
        TokenKind::String => parser.advance(),
        _ => parser.expect_identifier()?,
    }

    // The host is written right after the name: `u@h` lexes as a name and a
    // user variable, `u @ 'h'` as a name, `@` and a string.
    if parser.current_token_kind() == TokenKind::UserVariable && parser.is_adjacent(0) {
        parser.advance();
    } else if parser.eat(TokenKind::At) {
        match parser.current_token_kind() {
            TokenKind::String => parser.advance(),
            _ => parser.expect_identifier()?,
        }
    }

    parser.finish(checkpoint, NodeKind::UserIdentity);
    Ok(())
}

fn parse_user_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_user_identity(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_user_identity(parser)?;
    }
    parser.finish(checkpoint, NodeKind::UserList);
    Ok(())
}

/// `identity [IDENTIFIED BY [PASSWORD] 'pw' | IDENTIFIED WITH plugin
/// [BY 'pw' | AS 'hash']]`
fn parse_user_spec(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_user_identity(parser)?;

    if parser.at_keyword(Keyword::Identified) {
        let auth = parser.checkpoint();
        parser.advance_as_keyword();
        if parser.eat_keyword(Keyword::With) {
            match parser.current_token_kind() {
                TokenKind::String => parser.advance(),
                _ => parser.expect_identifier()?,
            }
            if parser.eat_any_keyword(&[Keyword::By, Keyword::As]) {
                expect_string(parser)?;
            }
        } else {
            parser.expect_keyword(Keyword::By)?;
            parser.eat_keyword(Keyword::Password);
            expect_string(parser)?;
        }
        parser.finish(auth, NodeKind::AuthOption);
    }

    parser.finish(checkpoint, NodeKind::UserSpec);
    Ok(())
}

fn parse_user_spec_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_user_spec(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_user_spec(parser)?;
    }
    parser.finish(checkpoint, NodeKind::UserSpecList);
    Ok(())
}

/// `REQUIRE NONE | SSL | X509 | CIPHER 's' [AND] ISSUER 's' [AND] SUBJECT 's'`
fn parse_require_clause(parser: &mut Parser) -> PResult {
    if !parser.at_keyword(Keyword::Require) {
        return Ok(());
    }

    let checkpoint = parser.checkpoint();
    parser.advance_as_keyword();

    if !parser.eat_any_keyword(&[Keyword::None, Keyword::Ssl, Keyword::X509]) {
        loop {
            parser.expect_any_keyword(&[Keyword::Cipher, Keyword::Issuer, Keyword::Subject])?;
            expect_string(parser)?;
            parser.eat_keyword(Keyword::And);
            if !parser.at_any_keyword(&[Keyword::Cipher, Keyword::Issuer, Keyword::Subject]) {
                break;
            }
        }
    }

    parser.finish(checkpoint, NodeKind::RequireClause);
    Ok(())
}

const RESOURCE_OPTIONS: &[Keyword] = &[
    Keyword::MaxQueriesPerHour,
    Keyword::MaxUpdatesPerHour,
    Keyword::MaxConnectionsPerHour,
    Keyword::MaxUserConnections,
];

/// `WITH MAX_QUERIES_PER_HOUR n ...`
fn parse_resource_options(parser: &mut Parser) -> PResult {
    if !(parser.at_keyword(Keyword::With)
        && parser
            .peek_nth(1)
            .keyword
            .is_some_and(|keyword| RESOURCE_OPTIONS.contains(&keyword)))
    {
        return Ok(());
    }

    parser.advance_as_keyword();
    while parser.at_any_keyword(RESOURCE_OPTIONS) {
        let checkpoint = parser.checkpoint();
        parser.advance_as_keyword();
        expect_number(parser)?;
        parser.finish(checkpoint, NodeKind::ResourceOption);
    }
    Ok(())
}

/// Password expiry, history and reuse policies, login failure locking,
/// account locking and `COMMENT`.
fn parse_password_options(parser: &mut Parser) -> PResult {
    loop {
        let checkpoint = parser.checkpoint();
        match parser.current_keyword() {
            Some(Keyword::Password) => {
                parser.advance_as_keyword();
                match parser.current_keyword() {
                    Some(Keyword::Expire) => {
                        parser.advance_as_keyword();
                        if parser.eat_keyword(Keyword::Interval) {
                            expect_number(parser)?;
                            parser.expect_keyword(Keyword::Day)?;
                        } else {
                            parser.eat_any_keyword(&[Keyword::Default, Keyword::Never]);
                        }
                    }
                    Some(Keyword::History) => {
                        parser.advance_as_keyword();
                        if !parser.eat_keyword(Keyword::Default) {
                            expect_number(parser)?;
                        }
                    }
                    Some(Keyword::Reuse) => {
                        parser.expect_keywords(&[Keyword::Reuse, Keyword::Interval])?;
                        if !parser.eat_keyword(Keyword::Default) {
                            expect_number(parser)?;
                            parser.expect_keyword(Keyword::Day)?;
                        }
                    }
                    _ => {
                        parser.at_any_keyword(&[Keyword::Expire, Keyword::History, Keyword::Reuse]);
                        return parser.unexpected();
                    }
                }
            }
            Some(Keyword::FailedLoginAttempts) => {
                parser.advance_as_keyword();
                expect_number(parser)?;
            }
            Some(Keyword::PasswordLockTime) => {
                parser.advance_as_keyword();
                if !parser.eat_keyword(Keyword::Unbounded) {
                    expect_number(parser)?;
                }
            }
            Some(Keyword::Account) => {
                parser.advance_as_keyword();
                parser.expect_any_keyword(&[Keyword::Lock, Keyword::Unlock])?;
            }
            Some(Keyword::Comment) => {
                parser.advance_as_keyword();
                expect_string(parser)?;
            }
            _ => return Ok(()),
        }
        parser.finish(checkpoint, NodeKind::PasswordOption);
    }
}

pub fn parse_create_user_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Create, Keyword::User])?;
    parse_if_not_exists(parser)?;
    parse_user_spec_list(parser)?;
    parse_require_clause(parser)?;
    parse_resource_options(parser)?;
    parse_password_options(parser)?;
    parser.finish(checkpoint, NodeKind::CreateUserStmt);
    Ok(())
}

/// `ALTER USER [IF EXISTS] specs [options]` or
/// `ALTER USER USER() IDENTIFIED BY 'pw'`.
pub fn parse_alter_user_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Alter, Keyword::User])?;

    if parser.at_keyword(Keyword::User) && parser.nth_kind(1) == TokenKind::OpenParen {
        let spec = parser.checkpoint();
        let identity = parser.checkpoint();
        parser.advance_as_keyword();
        parser.expect(TokenKind::OpenParen)?;
        parser.expect(TokenKind::CloseParen)?;
        parser.finish(identity, NodeKind::UserIdentity);

        let auth = parser.checkpoint();
        parser.expect_keywords(&[Keyword::Identified, Keyword::By])?;
        expect_string(parser)?;
        parser.finish(auth, NodeKind::AuthOption);
        parser.finish(spec, NodeKind::UserSpec);

        parser.finish(checkpoint, NodeKind::AlterUserStmt);
        return Ok(());
    }

    parse_if_exists(parser)?;
    parse_user_spec_list(parser)?;
    parse_require_clause(parser)?;
    parse_resource_options(parser)?;
    parse_password_options(parser)?;
    parser.finish(checkpoint, NodeKind::AlterUserStmt);
    Ok(())
}

pub fn parse_drop_user_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Drop, Keyword::User])?;
    parse_if_exists(parser)?;
    parse_user_list(parser)?;
    parser.finish(checkpoint, NodeKind::DropUserStmt);
    Ok(())
}

pub fn parse_create_role_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Create, Keyword::Role])?;
    parse_if_not_exists(parser)?;
    parse_user_list(parser)?;
    parser.finish(checkpoint, NodeKind::CreateRoleStmt);
    Ok(())
}

pub fn parse_drop_role_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Drop, Keyword::Role])?;
    parse_if_exists(parser)?;
    parse_user_list(parser)?;
    parser.finish(checkpoint, NodeKind::DropRoleStmt);
    Ok(())
}

/// Privilege grants name an object with `ON`; role grants go straight to
/// `TO` or `FROM`. Whichever comes first at depth zero decides the form.
fn is_privilege_form(parser: &Parser, target: Keyword) -> bool {
    let found = parser.find_at_depth_zero(|token| {
        token.kind == TokenKind::Keyword
            && (token.is_keyword(Keyword::On) || token.is_keyword(target))
    });
    found.is_some_and(|index| parser.nth_is_keyword(index, Keyword::On))
}

/// One privilege: `ALL [PRIVILEGES]` or a run of words such as
/// `CREATE TEMPORARY TABLES` or `REPLICATION CLIENT`, optionally followed
/// by a column list.
fn parse_privilege(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();

    if parser.eat_keyword(Keyword::All) {
        parser.eat_keyword(Keyword::Privileges);
    } else {
        if !matches!(parser.current_token_kind(), TokenKind::Word | TokenKind::Keyword) {
            return parser.expected("privilege");
        }
        while matches!(parser.current_token_kind(), TokenKind::Word | TokenKind::Keyword)
            && !parser.current_token().is_keyword(Keyword::On)
        {
            parser.advance_as_keyword();
        }
    }

    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_column_name_list(parser)?;
    }

    parser.finish(checkpoint, NodeKind::Privilege);
    Ok(())
}

fn parse_privilege_list(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parse_privilege(parser)?;
    while parser.eat(TokenKind::Comma) {
        parse_privilege(parser)?;
    }
    parser.finish(checkpoint, NodeKind::PrivilegeList);
    Ok(())
}

/// `[TABLE|FUNCTION|PROCEDURE] *`, `*.*`, `db.*`, `db.t` or `t`.
fn parse_grant_level(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.eat_any_keyword(&[Keyword::Table, Keyword::Function, Keyword::Procedure]);

    if !parser.eat(TokenKind::Star) {
        parser.expect_identifier()?;
    }
    if parser.eat(TokenKind::Dot) && !parser.eat(TokenKind::Star) {
        parser.expect_qualified_part()?;
    }

    parser.finish(checkpoint, NodeKind::GrantLevel);
    Ok(())
}

/// `GRANT privileges ON level TO users [REQUIRE ...] [WITH GRANT OPTION]` or
/// `GRANT roles TO users [WITH ADMIN OPTION]`.
pub fn parse_grant_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    let privileges = is_privilege_form(parser, Keyword::To);
    parser.expect_keyword(Keyword::Grant)?;

    if !privileges {
        parse_user_list(parser)?;
        parser.expect_keyword(Keyword::To)?;
        parse_user_list(parser)?;
        parser.eat_keywords(&[Keyword::With, Keyword::Admin, Keyword::Option])?;
        parser.finish(checkpoint, NodeKind::GrantRoleStmt);
        return Ok(());
    }

    parse_privilege_list(parser)?;
    parser.expect_keyword(Keyword::On)?;
    parse_grant_level(parser)?;
    parser.expect_keyword(Keyword::To)?;
    parse_user_spec_list(parser)?;
    parse_require_clause(parser)?;
    if parser.at_keyword(Keyword::With) && parser.nth_is_keyword(1, Keyword::Grant) {
        parser.expect_keywords(&[Keyword::With, Keyword::Grant, Keyword::Option])?;
    } else {
        parse_resource_options(parser)?;
    }

    parser.finish(checkpoint, NodeKind::GrantStmt);
    Ok(())
}

/// `REVOKE privileges ON level FROM users` or `REVOKE roles FROM users`.
pub fn parse_revoke_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    let privileges = is_privilege_form(parser, Keyword::From);
    parser.expect_keyword(Keyword::Revoke)?;

    if !privileges {
        parse_user_list(parser)?;
        parser.expect_keyword(Keyword::From)?;
        parse_user_list(parser)?;
        parser.finish(checkpoint, NodeKind::RevokeRoleStmt);
        return Ok(());
    }

    parse_privilege_list(parser)?;
    parser.expect_keyword(Keyword::On)?;
    parse_grant_level(parser)?;
    parser.expect_keyword(Keyword::From)?;
    parse_user_list(parser)?;
    parser.finish(checkpoint, NodeKind::RevokeStmt);
    Ok(())
}

/// `SET PASSWORD [FOR user] = 'pw' | PASSWORD('pw')`
pub fn parse_set_password_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Set, Keyword::Password])?;
    if parser.eat_keyword(Keyword::For) {
        parse_user_identity(parser)?;
    }
    parser.expect(TokenKind::Equals)?;

    if parser.at_keyword(Keyword::Password) && parser.nth_kind(1) == TokenKind::OpenParen {
        parser.advance_as_keyword();
        parser.advance();
        expect_string(parser)?;
        parser.expect(TokenKind::CloseParen)?;
    } else {
        expect_string(parser)?;
    }

    parser.finish(checkpoint, NodeKind::SetPasswordStmt);
    Ok(())
}

/// `SET ROLE DEFAULT | NONE | ALL [EXCEPT roles] | roles`
pub fn parse_set_role_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Set, Keyword::Role])?;

    if parser.eat_keyword(Keyword::All) {
        if parser.eat_keyword(Keyword::Except) {
            parse_user_list(parser)?;
        }
    } else if !parser.eat_any_keyword(&[Keyword::Default, Keyword::None]) {
        parse_user_list(parser)?;
    }

    parser.finish(checkpoint, NodeKind::SetRoleStmt);
    Ok(())
}

/// `SET DEFAULT ROLE NONE | ALL | roles TO users`
pub fn parse_set_default_role_stmt(parser: &mut Parser) -> PResult {
    let checkpoint = parser.checkpoint();
    parser.expect_keywords(&[Keyword::Set, Keyword::Default, Keyword::Role])?;
    if !parser.eat_any_keyword(&[Keyword::None, Keyword::All]) {
        parse_user_list(parser)?;
    }
    parser.expect_keyword(Keyword::To)?;
    parse_user_list(parser)?;
    parser.finish(checkpoint, NodeKind::SetDefaultRoleStmt);
    Ok(())
}
