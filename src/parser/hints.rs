use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{ast::kinds::NodeKind, lexer::tokens::TokenKind};

use super::parser::{PResult, Parser};

/// One entry of an optimizer hint comment, e.g. `HASH_JOIN(@sel_1 t1, t2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintItem {
    pub name: String,
    /// Leading `@block` argument, naming the query block the hint targets.
    pub query_block: Option<String>,
    pub args: Vec<String>,
}

lazy_static! {
    static ref HINT_ITEM: Regex =
        Regex::new(r"^[\s,]*([A-Za-z_][A-Za-z0-9_]*)\s*(\(([^()]*)\))?").unwrap();
    static ref HINT_ARG: Regex = Regex::new(r#"'[^']*'|"[^"]*"|`[^`]*`|[^\s,]+"#).unwrap();
}

/// Splits the body of a `/*+ ... */` comment into hint entries.
///
/// Parsing stops at the first entry that does not fit `NAME[(args)]`; the
/// entries before it are kept.
pub fn parse_hints(text: &str) -> Vec<HintItem> {
    let body = text
        .strip_prefix("/*+")
        .and_then(|body| body.strip_suffix("*/"))
        .unwrap_or(text);

    let mut items = Vec::new();
    let mut rest = body;

    while let Some(captures) = HINT_ITEM.captures(rest) {
        let matched = &captures[0];
        let name = captures[1].to_ascii_uppercase();
        let after = &rest[matched.len()..];

        // `NAME(` without a matching `)`
        if captures.get(2).is_none() && after.trim_start().starts_with('(') {
            break;
        }

        let mut args: Vec<String> = captures
            .get(3)
            .map(|inner| {
                HINT_ARG
                    .find_iter(inner.as_str())
                    .map(|arg| arg.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let query_block = match args.first() {
            Some(first) if first.starts_with('@') => Some(args.remove(0)[1..].to_string()),
            _ => None,
        };

        items.push(HintItem {
            name,
            query_block,
            args,
        });
        rest = after;
    }

    items
}

/// Attaches a hint comment to the statement or query block being built.
pub fn parse_hint_clause(parser: &mut Parser) -> PResult {
    if parser.current_token_kind() != TokenKind::Hint {
        return Ok(());
    }
    let checkpoint = parser.checkpoint();
    parser.advance();
    parser.finish(checkpoint, NodeKind::HintClause);
    Ok(())
}
