//! Typed accessors on rule contexts.
//!
//! The contexts themselves are generated with the node kinds; this module
//! adds accessors for the productions whose layout callers commonly need.
//! Optional parts are returned as `Option`, repeated parts as iterators.

use crate::{
    config::config::SqlMode,
    lexer::{
        lexer::{unescape_string, unquote_identifier},
        tokens::TokenKind,
    },
    parser::{
        hints::{parse_hints, HintItem},
        json::{parse_json_path, JsonPathLeg},
    },
};

use super::{
    ast::{Binding, NodeRef, RuleContext, TokenRef},
    kinds::*,
};

/// Name tokens of a node, unquoted, in order.
fn name_parts(node: NodeRef<'_>) -> Vec<String> {
    node.tokens()
        .filter(|token| token.binding() == Binding::Identifier || token.kind() == TokenKind::String)
        .map(|token| token_name(token))
        .collect()
}

fn token_name(token: TokenRef<'_>) -> String {
    match token.kind() {
        TokenKind::QuotedIdentifier => unquote_identifier(token.text()),
        TokenKind::String => unescape_string(token.text(), false),
        _ => token.text().to_string(),
    }
}

impl<'t> IdentifierContext<'t> {
    /// The name with quotes removed.
    pub fn name(&self) -> Option<String> {
        self.node().tokens().next().map(token_name)
    }
}

impl<'t> IdentifierListContext<'t> {
    pub fn names(&self) -> impl Iterator<Item = String> + 't {
        self.node()
            .child_contexts::<IdentifierContext<'t>>()
            .filter_map(|identifier| identifier.name())
    }
}

impl<'t> TableNameContext<'t> {
    /// The qualifying schema of `db.t`.
    pub fn schema(&self) -> Option<String> {
        let mut parts = name_parts(self.node());
        if parts.len() == 2 {
            Some(parts.remove(0))
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<String> {
        name_parts(self.node()).pop()
    }
}

impl<'t> ColumnRefContext<'t> {
    /// Parts of the reference, outermost first: `[db, t, col]`.
    pub fn parts(&self) -> Vec<String> {
        name_parts(self.node())
    }

    pub fn column(&self) -> Option<String> {
        self.parts().pop()
    }

    pub fn table(&self) -> Option<String> {
        let mut parts = self.parts();
        parts.pop();
        parts.pop()
    }
}

impl<'t> UserIdentityContext<'t> {
    /// The user name, or `None` for `CURRENT_USER`.
    pub fn user(&self) -> Option<String> {
        let token = self.node().tokens().next()?;
        match token.kind() {
            TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::String
                if token.binding() != Binding::Keyword =>
            {
                Some(token_name(token))
            }
            _ => None,
        }
    }

    /// The host part of `user@host`.
    pub fn host(&self) -> Option<String> {
        let mut tokens = self.node().tokens().skip(1);
        let token = tokens.next()?;
        match token.kind() {
            TokenKind::UserVariable => {
                let host = &token.text()[1..];
                Some(match host.chars().next() {
                    Some('\'' | '"') => unescape_string(host, false),
                    Some('`') => unquote_identifier(host),
                    _ => host.to_string(),
                })
            }
            TokenKind::At => tokens.next().map(token_name),
            _ => None,
        }
    }
}

impl<'t> StringLiteralContext<'t> {
    /// The charset named by an introducer, without its leading `_`.
    pub fn charset(&self) -> Option<&'t str> {
        self.node()
            .first_token_of_kind(TokenKind::Introducer)
            .map(|token| token.text().trim_start_matches('_'))
    }

    /// The unescaped text under the default mode. Adjacent strings are
    /// concatenated.
    pub fn value(&self) -> String {
        self.value_in(&SqlMode::default())
    }

    pub fn value_in(&self, mode: &SqlMode) -> String {
        self.node()
            .tokens()
            .filter(|token| matches!(token.kind(), TokenKind::String | TokenKind::NationalString))
            .map(|token| unescape_string(token.text(), mode.no_backslash_escapes))
            .collect()
    }
}

impl<'t> JsonPathContext<'t> {
    pub fn path(&self) -> Option<String> {
        self.node()
            .tokens()
            .next()
            .map(|token| unescape_string(token.text(), false))
    }

    /// The parsed legs. Paths are validated while parsing, so a path that
    /// reached the tree always yields its legs.
    pub fn legs(&self) -> Vec<JsonPathLeg> {
        self.path()
            .and_then(|path| parse_json_path(&path).ok())
            .unwrap_or_default()
    }
}

impl<'t> HintClauseContext<'t> {
    /// Well-formed hints of the clause; malformed entries are skipped.
    pub fn hints(&self) -> Vec<HintItem> {
        self.node()
            .first_token_of_kind(TokenKind::Hint)
            .map(|token| parse_hints(token.text()))
            .unwrap_or_default()
    }
}

impl<'t> BinaryExprContext<'t> {
    pub fn left(&self) -> Option<NodeRef<'t>> {
        self.node().nth_child_node(0)
    }

    /// The operator token.
    pub fn operator(&self) -> Option<TokenRef<'t>> {
        self.node().tokens().next()
    }

    pub fn right(&self) -> Option<NodeRef<'t>> {
        self.node().nth_child_node(1)
    }
}

impl<'t> AliasContext<'t> {
    pub fn name(&self) -> Option<String> {
        self.node()
            .tokens()
            .find(|token| token.binding() != Binding::Keyword)
            .map(token_name)
    }
}

impl<'t> SelectFieldContext<'t> {
    pub fn expr(&self) -> Option<NodeRef<'t>> {
        self.node().first_child_node().filter(|node| node.kind() != NodeKind::Alias)
    }

    pub fn alias(&self) -> Option<AliasContext<'t>> {
        self.node().child_context()
    }
}

impl<'t> QuerySpecContext<'t> {
    pub fn hint_clause(&self) -> Option<HintClauseContext<'t>> {
        self.node().child_context()
    }

    pub fn fields(&self) -> Option<FieldListContext<'t>> {
        self.node().child_context()
    }

    pub fn from_clause(&self) -> Option<FromClauseContext<'t>> {
        self.node().child_context()
    }

    pub fn where_clause(&self) -> Option<WhereClauseContext<'t>> {
        self.node().child_context()
    }
}

impl<'t> CreateTableStmtContext<'t> {
    pub fn table_name(&self) -> Option<TableNameContext<'t>> {
        self.node().child_context()
    }

    pub fn if_not_exists(&self) -> bool {
        self.node().has_keyword(crate::lexer::keywords::Keyword::Exists)
    }

    pub fn elements(&self) -> Option<TableElementListContext<'t>> {
        self.node().child_context()
    }

    pub fn like_clause(&self) -> Option<CreateLikeClauseContext<'t>> {
        self.node().child_context()
    }

    pub fn options(&self) -> Option<TableOptionListContext<'t>> {
        self.node().child_context()
    }

    pub fn partition_options(&self) -> Option<PartitionOptionsContext<'t>> {
        self.node().child_context()
    }
}

impl<'t> TableElementListContext<'t> {
    pub fn columns(&self) -> impl Iterator<Item = ColumnDefContext<'t>> + 't {
        self.node().child_contexts()
    }

    pub fn constraints(&self) -> impl Iterator<Item = TableConstraintContext<'t>> + 't {
        self.node().child_contexts()
    }
}

impl<'t> ColumnDefContext<'t> {
    pub fn name(&self) -> Option<String> {
        self.node().tokens().next().map(token_name)
    }

    pub fn data_type(&self) -> Option<DataTypeContext<'t>> {
        self.node().child_context()
    }

    pub fn options(&self) -> impl Iterator<Item = ColumnOptionContext<'t>> + 't {
        self.node().child_contexts()
    }
}

impl<'t> DataTypeContext<'t> {
    /// The leading type keyword, e.g. `VARCHAR`.
    pub fn type_name(&self) -> Option<&'t str> {
        self.node().tokens().next().map(|token| token.text())
    }

    pub fn length(&self) -> Option<TypeLengthContext<'t>> {
        self.node().child_context()
    }
}

impl<'t> PartitionDefinitionListContext<'t> {
    pub fn definitions(&self) -> impl Iterator<Item = PartitionDefinitionContext<'t>> + 't {
        self.node().child_contexts()
    }
}

impl<'t> PartitionDefinitionContext<'t> {
    pub fn name(&self) -> Option<String> {
        self.node()
            .tokens()
            .find(|token| token.binding() == Binding::Identifier)
            .map(token_name)
    }
}
