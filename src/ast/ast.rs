use std::fmt::Debug;

use serde::Serialize;

use crate::{
    lexer::{
        keywords::Keyword,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    kinds::NodeKind,
    render::{DumpWriter, JsonWriter, SexpWriter},
    walker::ParseTreeWalker,
};

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Index of a token in its tree's token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TokenId {
    pub(crate) fn new(index: usize) -> Self {
        TokenId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An edge from a node to one of its ordered children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    Token(TokenId),
}

/// How the grammar used a token in the accepted parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Binding {
    /// Not part of any accepted statement.
    Unbound,
    /// Consumed as a keyword.
    Keyword,
    /// Consumed as an identifier (including keywords used as names).
    Identifier,
    /// Consumed as a literal, operator or punctuation.
    Terminal,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    first_edge: u32,
    edge_count: u32,
    span: Span,
}

/// Concrete parse tree of one batch.
///
/// Nodes live in an arena and reference their children through an edge
/// table, so the tree is a plain value: `Send`, `Sync` and cheap to move.
/// Tokens are owned by the tree and shared by reference with every view.
#[derive(Debug, Clone)]
pub struct Tree {
    tokens: Vec<Token>,
    bindings: Vec<Binding>,
    nodes: Vec<NodeData>,
    edges: Vec<Child>,
    root: NodeId,
}

impl Tree {
    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    pub fn token(&self, id: TokenId) -> TokenRef<'_> {
        TokenRef { tree: self, id }
    }

    /// Every token of the input, bound or not, ending in EOF.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn binding(&self, id: TokenId) -> Binding {
        self.bindings[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Successfully parsed statements, in input order.
    pub fn statements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.root().child_nodes()
    }

    /// Indented rendering, one node or token per line.
    pub fn dump(&self) -> String {
        let mut writer = DumpWriter::default();
        self.walk(&mut writer);
        writer.out
    }

    /// Serializes the tree as nested JSON objects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut writer = JsonWriter::default();
        self.walk(&mut writer);
        writer.finish()
    }
}

/// Pending-children position the builder can close a node at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Builder state that can be restored after a failed alternative.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuilderMark {
    nodes: usize,
    edges: usize,
    pending: usize,
}

/// Builds the arena bottom-up.
///
/// Consumed tokens and finished nodes are pushed onto a pending stack;
/// `finish` closes a node over everything pushed since a checkpoint. A
/// checkpoint taken before an operand can therefore wrap that operand once
/// an infix operator shows up.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
    edges: Vec<Child>,
    pending: Vec<Child>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pending.len())
    }

    pub fn push_token(&mut self, id: TokenId) {
        self.pending.push(Child::Token(id));
    }

    /// Closes a node of `kind` over the children pushed since `checkpoint`.
    /// An empty node gets an empty span at `offset`.
    pub fn finish(
        &mut self,
        checkpoint: Checkpoint,
        kind: NodeKind,
        tokens: &[Token],
        offset: usize,
    ) -> NodeId {
        let start = checkpoint.0.min(self.pending.len());
        let children: Vec<Child> = self.pending.drain(start..).collect();

        let span = children
            .iter()
            .map(|child| match child {
                Child::Node(id) => self.nodes[id.index()].span,
                Child::Token(id) => tokens[id.index()].span,
            })
            .reduce(Span::cover)
            .unwrap_or(Span::new(offset, offset));

        let first_edge = self.edges.len() as u32;
        let edge_count = children.len() as u32;
        self.edges.extend(children);

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            first_edge,
            edge_count,
            span,
        });
        self.pending.push(Child::Node(id));
        id
    }

    pub fn mark(&self) -> BuilderMark {
        BuilderMark {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            pending: self.pending.len(),
        }
    }

    /// Drops every node, edge and pending child created after `mark`.
    pub fn reset(&mut self, mark: BuilderMark) {
        self.nodes.truncate(mark.nodes);
        self.edges.truncate(mark.edges);
        self.pending.truncate(mark.pending);
    }

    pub fn build(self, tokens: Vec<Token>, bindings: Vec<Binding>, root: NodeId) -> Tree {
        Tree {
            tokens,
            bindings,
            nodes: self.nodes,
            edges: self.edges,
            root,
        }
    }
}

/// Borrowed view of a node.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
}

/// A child seen through a [`NodeRef`].
#[derive(Debug, Clone, Copy)]
pub enum ChildRef<'t> {
    Node(NodeRef<'t>),
    Token(TokenRef<'t>),
}

impl<'t> ChildRef<'t> {
    pub fn as_node(self) -> Option<NodeRef<'t>> {
        match self {
            ChildRef::Node(node) => Some(node),
            ChildRef::Token(_) => None,
        }
    }

    pub fn as_token(self) -> Option<TokenRef<'t>> {
        match self {
            ChildRef::Token(token) => Some(token),
            ChildRef::Node(_) => None,
        }
    }

    pub fn span(self) -> Span {
        match self {
            ChildRef::Node(node) => node.span(),
            ChildRef::Token(token) => token.span(),
        }
    }
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// Covers all descendant tokens.
    pub fn span(&self) -> Span {
        self.data().span
    }

    fn edges(&self) -> &'t [Child] {
        let data = self.data();
        let start = data.first_edge as usize;
        &self.tree.edges[start..start + data.edge_count as usize]
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = ChildRef<'t>> + ExactSizeIterator {
        let tree = self.tree;
        self.edges().iter().map(move |child| match *child {
            Child::Node(id) => ChildRef::Node(NodeRef { tree, id }),
            Child::Token(id) => ChildRef::Token(TokenRef { tree, id }),
        })
    }

    pub fn child_count(&self) -> usize {
        self.data().edge_count as usize
    }

    pub fn child(self, index: usize) -> Option<ChildRef<'t>> {
        self.children().nth(index)
    }

    pub fn child_nodes(self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> {
        self.children().filter_map(ChildRef::as_node)
    }

    /// Direct token children.
    pub fn tokens(self) -> impl DoubleEndedIterator<Item = TokenRef<'t>> {
        self.children().filter_map(ChildRef::as_token)
    }

    pub fn first_child(self) -> Option<ChildRef<'t>> {
        self.children().next()
    }

    pub fn first_child_node(self) -> Option<NodeRef<'t>> {
        self.child_nodes().next()
    }

    pub fn nth_child_node(self, n: usize) -> Option<NodeRef<'t>> {
        self.child_nodes().nth(n)
    }

    pub fn child_of_kind(self, kind: NodeKind) -> Option<NodeRef<'t>> {
        self.child_nodes().find(|child| child.kind() == kind)
    }

    pub fn children_of_kind(self, kind: NodeKind) -> impl Iterator<Item = NodeRef<'t>> {
        self.child_nodes().filter(move |child| child.kind() == kind)
    }

    /// First direct child of context type `C`.
    pub fn child_context<C: RuleContext<'t>>(self) -> Option<C> {
        self.child_nodes().find_map(C::cast)
    }

    /// All direct children of context type `C`, in order.
    pub fn child_contexts<C: RuleContext<'t> + 't>(self) -> impl Iterator<Item = C> + 't {
        self.child_nodes().filter_map(C::cast)
    }

    /// Reinterprets this node as the context of its kind.
    pub fn cast<C: RuleContext<'t>>(self) -> Option<C> {
        C::cast(self)
    }

    /// Whether a direct token child was consumed as `keyword`.
    pub fn has_keyword(self, keyword: Keyword) -> bool {
        self.tokens().any(|token| token.keyword() == Some(keyword))
    }

    /// Keywords consumed directly by this node, in order.
    pub fn keywords(self) -> impl Iterator<Item = Keyword> + 't {
        self.tokens().filter_map(|token| token.keyword())
    }

    pub fn first_token_of_kind(self, kind: TokenKind) -> Option<TokenRef<'t>> {
        self.tokens().find(|token| token.kind() == kind)
    }

    /// All tokens under this node in source order.
    pub fn descendant_tokens(self) -> Vec<TokenRef<'t>> {
        let mut out = vec![];
        let mut stack: Vec<ChildRef<'t>> = self.children().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                ChildRef::Node(node) => stack.extend(node.children().rev()),
                ChildRef::Token(token) => out.push(token),
            }
        }
        out
    }

    /// Raw text of every descendant token in source order.
    pub fn token_texts(self) -> Vec<&'t str> {
        self.descendant_tokens()
            .iter()
            .map(|token| token.text())
            .collect()
    }

    /// Source text of the descendant tokens joined by single spaces.
    pub fn text(self) -> String {
        self.token_texts().join(" ")
    }

    /// Compact S-expression form, with tokens as their raw text:
    /// `(BinaryExpr (NumericLiteral 1) + (NumericLiteral 2))`.
    pub fn to_sexp(self) -> String {
        let mut writer = SexpWriter::default();
        ParseTreeWalker::walk(&mut writer, self);
        writer.out
    }
}

impl Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeRef({}@{})", self.kind(), self.span())
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

/// Borrowed view of a token inside a tree.
#[derive(Clone, Copy)]
pub struct TokenRef<'t> {
    tree: &'t Tree,
    id: TokenId,
}

impl<'t> TokenRef<'t> {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn token(&self) -> &'t Token {
        &self.tree.tokens[self.id.index()]
    }

    pub fn kind(&self) -> TokenKind {
        self.token().kind
    }

    pub fn text(&self) -> &'t str {
        &self.token().value
    }

    pub fn span(&self) -> Span {
        self.token().span
    }

    pub fn position(&self) -> Position {
        self.token().position
    }

    pub fn binding(&self) -> Binding {
        self.tree.binding(self.id)
    }

    /// The keyword, if the parse consumed this token as one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.binding() {
            Binding::Keyword => self.token().keyword,
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenRef({:?} {:?}@{})", self.kind(), self.text(), self.span())
    }
}

/// Typed view of a node of one specific kind.
///
/// Implemented by the generated `*Context` types. Accessors on a context
/// return `Option` for optional grammar elements and iterators for
/// repeated ones; a context never outlives the tree it views.
pub trait RuleContext<'t>: Copy {
    const KIND: NodeKind;

    #[doc(hidden)]
    fn wrap(node: NodeRef<'t>) -> Self;

    fn node(&self) -> NodeRef<'t>;

    fn cast(node: NodeRef<'t>) -> Option<Self> {
        if node.kind() == Self::KIND {
            Some(Self::wrap(node))
        } else {
            None
        }
    }
}
