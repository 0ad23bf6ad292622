//! Parser state and the batch driver.
//!
//! The parser walks the token stream once, consuming tokens through the
//! small set of primitives below and closing parse nodes with
//! [`Parser::finish`]. Grammar rules live in the sibling modules and are
//! dispatched through the lookup tables in [`super::lookups`]:
//! - Statement handlers keyed by the first token
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Ambiguous positions are resolved with [`Parser::speculate`], which
//! rolls the token position, the arena and the binding table back when an
//! alternative fails.

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Binding, BuilderMark, Checkpoint, NodeId, NodeRef, TokenId, Tree, TreeBuilder},
        kinds::NodeKind,
    },
    config::config::{ParserConfig, SqlMode},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::{
        keywords::Keyword,
        lexer::TokenStream,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::lookups::{Trigger, LOOKUPS};

pub type PResult<T = ()> = Result<T, Error>;

/// Parser position that [`Parser::restore`] can return to.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pos: usize,
    mark: BuilderMark,
    expected: Vec<&'static str>,
    depth: usize,
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Tokens of the whole batch, ending with EOF
    tokens: Vec<Token>,
    /// How each token was consumed; parallel to `tokens`
    bindings: Vec<Binding>,
    /// Index of the current token
    pos: usize,
    builder: TreeBuilder,
    config: ParserConfig,
    /// Descriptions of what would have been accepted at `pos`
    expected: Vec<&'static str>,
    /// Current grammar nesting, bounded by `config.max_depth`
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::new(),
                span: Span::new(end, end),
                position: Default::default(),
                keyword: None,
            });
        }

        Parser {
            bindings: vec![Binding::Unbound; tokens.len()],
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            config,
            expected: vec![],
            depth: 0,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn mode(&self) -> &SqlMode {
        &self.config.sql_mode
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Token `n` positions ahead; clamps to EOF.
    pub fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.peek_nth(n).kind
    }

    /// Whether token `n` ahead spells `keyword`. Records nothing.
    pub fn nth_is_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_nth(n).is_keyword(keyword)
    }

    pub fn current_keyword(&self) -> Option<Keyword> {
        let token = self.current_token();
        match token.kind {
            TokenKind::Keyword | TokenKind::Word => token.keyword,
            _ => None,
        }
    }

    /// Whether token `n` ahead starts exactly where its predecessor ends.
    pub fn is_adjacent(&self, n: usize) -> bool {
        let index = self.pos + n;
        if index == 0 || index >= self.tokens.len() {
            return false;
        }
        let previous = &self.tokens[index - 1];
        let token = &self.tokens[index];
        token.kind != TokenKind::EOF && previous.span.end == token.span.start
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn expect_description(&mut self, description: &'static str) {
        if !self.expected.contains(&description) {
            self.expected.push(description);
        }
    }

    /// Tests the current token kind and records it as acceptable.
    pub fn at(&mut self, kind: TokenKind) -> bool {
        self.expect_description(kind.describe());
        self.current_token_kind() == kind
    }

    /// Tests the current token for `keyword` and records it as acceptable.
    pub fn at_keyword(&mut self, keyword: Keyword) -> bool {
        self.expect_description(keyword.as_str());
        self.current_token().is_keyword(keyword)
    }

    pub fn at_any_keyword(&mut self, keywords: &[Keyword]) -> bool {
        let mut found = false;
        for keyword in keywords {
            found |= self.at_keyword(*keyword);
        }
        found
    }

    /// An unquoted word or a quoted identifier.
    pub fn at_identifier(&mut self) -> bool {
        self.expect_description("identifier");
        matches!(
            self.current_token_kind(),
            TokenKind::Word | TokenKind::QuotedIdentifier
        )
    }

    fn bump(&mut self, binding: Binding) {
        if self.current_token_kind() == TokenKind::EOF {
            return;
        }
        trace!(target: "sqlfront::parser", "consume {} as {:?}", self.current_token().debug(), binding);
        self.bindings[self.pos] = binding;
        self.builder.push_token(TokenId::new(self.pos));
        self.pos += 1;
        self.expected.clear();
    }

    /// Consumes the current token with the binding its kind implies.
    pub fn advance(&mut self) {
        let binding = match self.current_token_kind() {
            TokenKind::Keyword => Binding::Keyword,
            TokenKind::Word | TokenKind::QuotedIdentifier => Binding::Identifier,
            _ => Binding::Terminal,
        };
        self.bump(binding);
    }

    /// Consumes the current token as a keyword, whatever its kind.
    pub fn advance_as_keyword(&mut self) {
        self.bump(Binding::Keyword);
    }

    /// Consumes the current token as a name.
    pub fn advance_as_identifier(&mut self) {
        self.bump(Binding::Identifier);
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.at_keyword(keyword) {
            self.advance_as_keyword();
            true
        } else {
            false
        }
    }

    /// Consumes whichever of `keywords` is current.
    pub fn eat_any_keyword(&mut self, keywords: &[Keyword]) -> bool {
        if self.at_any_keyword(keywords) {
            self.advance_as_keyword();
            true
        } else {
            false
        }
    }

    /// Consumes `keywords` in sequence if the first one is current.
    pub fn eat_keywords(&mut self, keywords: &[Keyword]) -> PResult<bool> {
        match keywords.split_first() {
            Some((first, rest)) if self.eat_keyword(*first) => {
                self.expect_keywords(rest)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> PResult {
        if self.eat(kind) {
            Ok(())
        } else {
            self.unexpected()
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> PResult {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            self.unexpected()
        }
    }

    pub fn expect_keywords(&mut self, keywords: &[Keyword]) -> PResult {
        for keyword in keywords {
            self.expect_keyword(*keyword)?;
        }
        Ok(())
    }

    pub fn expect_any_keyword(&mut self, keywords: &[Keyword]) -> PResult {
        if self.eat_any_keyword(keywords) {
            Ok(())
        } else {
            self.unexpected()
        }
    }

    pub fn expect_identifier(&mut self) -> PResult {
        if self.at_identifier() {
            self.advance_as_identifier();
            Ok(())
        } else {
            self.unexpected()
        }
    }

    /// A name after `.` in a qualified name; any keyword is accepted there.
    pub fn expect_qualified_part(&mut self) -> PResult {
        match self.current_token_kind() {
            TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::Keyword => {
                self.advance_as_identifier();
                Ok(())
            }
            _ => {
                self.expect_description("identifier");
                self.unexpected()
            }
        }
    }

    /// Marks where a node may start.
    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    /// Closes a node of `kind` over everything consumed since `checkpoint`.
    pub fn finish(&mut self, checkpoint: Checkpoint, kind: NodeKind) -> NodeId {
        let offset = self.current_token().span.start;
        self.builder.finish(checkpoint, kind, &self.tokens, offset)
    }

    /// Builds the syntax error for the current token from the recorded
    /// expectations.
    pub fn unexpected<T>(&self) -> PResult<T> {
        Err(self.unexpected_error())
    }

    pub fn unexpected_error(&self) -> Error {
        let token = self.current_token();
        let expected = self.expected.iter().map(|item| item.to_string()).collect();
        let error = match token.kind {
            TokenKind::EOF => ErrorImpl::UnexpectedEof { expected },
            _ => ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected,
            },
        };
        Error::new(error, token.span)
    }

    /// Fails with `expected` as the only acceptable description.
    pub fn expected<T>(&mut self, description: &'static str) -> PResult<T> {
        self.expect_description(description);
        self.unexpected()
    }

    pub fn error_at_current(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.current_token().span)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            mark: self.builder.mark(),
            expected: self.expected.clone(),
            depth: self.depth,
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        for binding in &mut self.bindings[snapshot.pos..self.pos] {
            *binding = Binding::Unbound;
        }
        self.pos = snapshot.pos;
        self.builder.reset(snapshot.mark);
        self.expected = snapshot.expected;
        self.depth = snapshot.depth;
    }

    /// Runs `alternative` and keeps its result only if it succeeds.
    ///
    /// On failure every token, node and binding it produced is rolled
    /// back. The alternative must only close nodes over checkpoints it took
    /// itself.
    pub fn speculate<F>(&mut self, alternative: F) -> bool
    where
        F: FnOnce(&mut Parser) -> PResult,
    {
        let snapshot = self.snapshot();
        match alternative(self) {
            Ok(()) => true,
            Err(error) => {
                trace!(target: "sqlfront::parser", "alternative rejected: {}", error);
                self.restore(snapshot);
                false
            }
        }
    }

    /// Runs a recursive rule one level deeper, failing with
    /// `NestingTooDeep` past the configured limit.
    pub fn nested<T, F>(&mut self, rule: F) -> PResult<T>
    where
        F: FnOnce(&mut Parser) -> PResult<T>,
    {
        if self.depth >= self.config.max_depth {
            return Err(self.error_at_current(ErrorImpl::NestingTooDeep {
                limit: self.config.max_depth,
            }));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Whether the tokens from the current one are a query start, looking
    /// through any number of opening parentheses.
    pub fn at_query_start(&self, n: usize) -> bool {
        let mut index = n;
        while self.nth_kind(index) == TokenKind::OpenParen {
            index += 1;
        }
        let token = self.peek_nth(index);
        token.kind == TokenKind::Keyword
            && matches!(
                token.keyword,
                Some(Keyword::Select | Keyword::With | Keyword::Table | Keyword::Values)
            )
    }

    /// Index (relative to the current token) of the first token at
    /// parenthesis depth zero that satisfies `predicate`, stopping at `;`.
    pub fn find_at_depth_zero<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&Token) -> bool,
    {
        let mut depth = 0usize;
        let mut index = 0;
        loop {
            let token = self.peek_nth(index);
            match token.kind {
                TokenKind::EOF | TokenKind::Semicolon => return None,
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => depth = depth.saturating_sub(1),
                _ if depth == 0 && predicate(token) => return Some(index),
                _ => {}
            }
            index += 1;
        }
    }

    fn skip_to_statement_end(&mut self, from: usize) {
        let mut index = from.max(self.pos);
        while index < self.tokens.len() - 1 && self.tokens[index].kind != TokenKind::Semicolon {
            index += 1;
        }
        if self.tokens[index].kind == TokenKind::Semicolon {
            index += 1;
        }
        self.pos = index.min(self.tokens.len() - 1);
        self.expected.clear();
    }

    fn token_index_at(&self, offset: usize) -> usize {
        self.tokens
            .iter()
            .position(|token| token.span.start >= offset)
            .unwrap_or(self.tokens.len() - 1)
    }

    fn contains_invalid(&self, from: usize, to: usize) -> bool {
        self.tokens[from..to]
            .iter()
            .any(|token| token.kind == TokenKind::Invalid)
    }

    fn into_tree(self, root: NodeId) -> Tree {
        self.builder.build(self.tokens, self.bindings, root)
    }
}

/// Parses one statement at the current position.
pub fn parse_stmt(parser: &mut Parser) -> PResult {
    let trigger = match parser.current_keyword() {
        Some(keyword) => Trigger::Keyword(keyword),
        None => Trigger::Token(parser.current_token_kind()),
    };

    match LOOKUPS.get_stmt(trigger) {
        Some(stmt_fn) => stmt_fn(parser),
        None => parser.expected("statement"),
    }
}

/// A statement ends at `;` or at the end of input; neither is consumed.
fn expect_statement_end(parser: &mut Parser) -> PResult {
    if parser.at(TokenKind::Semicolon) || parser.at(TokenKind::EOF) {
        Ok(())
    } else {
        parser.unexpected()
    }
}

/// Outcome of parsing one batch.
///
/// The tree always exists: its `StatementList` root holds every statement
/// that parsed, in input order. Failed statements leave no nodes behind and
/// contribute one error each.
#[derive(Debug, Clone)]
pub struct ParseResult {
    tree: Tree,
    diagnostics: Diagnostics,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Lexical and syntax errors ordered by position.
    pub fn errors(&self) -> &[Error] {
        self.diagnostics.as_slice()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn statements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.tree.statements()
    }

    pub fn into_result(self) -> Result<Tree, Vec<Error>> {
        if self.diagnostics.is_empty() {
            Ok(self.tree)
        } else {
            Err(self.diagnostics.into_vec())
        }
    }
}

/// Parses a `;`-separated batch.
///
/// Each statement is parsed from a snapshot. When one fails, everything it
/// built is rolled back, its error is recorded (unless it contains a token
/// the lexer already reported) and parsing resumes after the next `;`.
pub fn parse(stream: TokenStream, config: &ParserConfig) -> ParseResult {
    let TokenStream { tokens, errors } = stream;

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(errors);

    let mut parser = Parser::new(tokens, config.clone());
    let root = parser.checkpoint();
    let mut statements = 0;

    loop {
        while parser.eat(TokenKind::Semicolon) {}
        if !parser.has_tokens() {
            break;
        }

        let start = parser.position();
        let snapshot = parser.snapshot();

        match parse_stmt(&mut parser).and_then(|_| expect_statement_end(&mut parser)) {
            Ok(()) => {
                statements += 1;
                debug!(target: "sqlfront::parser", "parsed statement {}", statements);
            }
            Err(error) => {
                debug!(target: "sqlfront::parser", "statement failed: {}", error);
                let failed_at = parser.token_index_at(error.get_span().start);
                parser.restore(snapshot);
                parser.skip_to_statement_end(failed_at);

                if !parser.contains_invalid(start, parser.position()) {
                    diagnostics.push(error);
                }
            }
        }
    }

    let root = parser.finish(root, NodeKind::StatementList);
    debug!(
        target: "sqlfront::parser",
        "batch done: {} statement(s), {} error(s)",
        statements,
        diagnostics.len()
    );

    ParseResult {
        tree: parser.into_tree(root),
        diagnostics,
    }
}
