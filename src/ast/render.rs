use std::fmt::Write;

use serde::Serialize;

use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{Binding, NodeRef, TokenRef},
    kinds::Listener,
};

/// Indented rendering, one node or token per line.
#[derive(Default)]
pub(crate) struct DumpWriter {
    pub out: String,
    depth: usize,
}

impl Listener for DumpWriter {
    fn enter_every_rule(&mut self, node: NodeRef<'_>) {
        let _ = writeln!(
            self.out,
            "{:indent$}{} {}",
            "",
            node.kind(),
            node.span(),
            indent = self.depth * 2
        );
        self.depth += 1;
    }

    fn exit_every_rule(&mut self, _node: NodeRef<'_>) {
        self.depth -= 1;
    }

    fn visit_terminal(&mut self, token: TokenRef<'_>) {
        let _ = writeln!(
            self.out,
            "{:indent$}{:?} {:?}",
            "",
            token.kind(),
            token.text(),
            indent = self.depth * 2
        );
    }
}

/// `(Kind child ...)` with tokens as their raw text.
#[derive(Default)]
pub(crate) struct SexpWriter {
    pub out: String,
    // whether the innermost open node already has a child
    open: Vec<bool>,
}

impl SexpWriter {
    fn separate(&mut self) {
        if let Some(has_child) = self.open.last_mut() {
            *has_child = true;
            self.out.push(' ');
        }
    }
}

impl Listener for SexpWriter {
    fn enter_every_rule(&mut self, node: NodeRef<'_>) {
        self.separate();
        self.out.push('(');
        self.out.push_str(node.kind().name());
        self.open.push(false);
    }

    fn exit_every_rule(&mut self, _node: NodeRef<'_>) {
        self.open.pop();
        self.out.push(')');
    }

    fn visit_terminal(&mut self, token: TokenRef<'_>) {
        self.separate();
        self.out.push_str(token.text());
    }
}

#[derive(Serialize)]
struct SerializedToken<'t> {
    token: TokenKind,
    text: &'t str,
    span: Span,
    binding: Binding,
}

/// Nested JSON objects: nodes carry `kind`, `span` and `children`, tokens
/// carry `token`, `text`, `span` and `binding`.
///
/// Structure is written by hand as the walk proceeds so the nesting depth
/// of the tree never turns into call depth. Leaf values go through serde.
#[derive(Default)]
pub(crate) struct JsonWriter {
    pub out: String,
    open: Vec<bool>,
    error: Option<serde_json::Error>,
}

impl JsonWriter {
    pub fn finish(self) -> Result<String, serde_json::Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn begin_child(&mut self) {
        let Some(has_child) = self.open.last_mut() else {
            return;
        };
        if *has_child {
            self.out.push(',');
        }
        *has_child = true;
        self.out.push('\n');
        self.indent(self.open.len());
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }

    fn push_value<T: Serialize + ?Sized>(&mut self, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.out.push_str(&json),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
    }
}

impl Listener for JsonWriter {
    fn enter_every_rule(&mut self, node: NodeRef<'_>) {
        self.begin_child();
        self.out.push_str("{\"kind\": ");
        self.push_value(node.kind().name());
        self.out.push_str(", \"span\": ");
        self.push_value(&node.span());
        self.out.push_str(", \"children\": [");
        self.open.push(false);
    }

    fn exit_every_rule(&mut self, _node: NodeRef<'_>) {
        if self.open.pop() == Some(true) {
            self.out.push('\n');
            self.indent(self.open.len());
        }
        self.out.push_str("]}");
    }

    fn visit_terminal(&mut self, token: TokenRef<'_>) {
        self.begin_child();
        self.push_value(&SerializedToken {
            token: token.kind(),
            text: token.text(),
            span: token.span(),
            binding: token.binding(),
        });
    }
}
