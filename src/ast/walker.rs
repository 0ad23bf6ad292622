use tracing::trace;

use super::{
    ast::{ChildRef, NodeRef, TokenRef, Tree},
    kinds::{dispatch_enter, dispatch_exit, Listener},
};

enum Event<'t> {
    Enter(NodeRef<'t>),
    Exit(NodeRef<'t>),
    Terminal(TokenRef<'t>),
}

/// Drives a [`Listener`] over a subtree.
///
/// The walk is depth first and iterative, so arbitrarily deep trees cannot
/// overflow the stack. For every node the listener sees
/// `enter_every_rule`, the kind's `enter_*`, the children in order (tokens
/// through `visit_terminal`), the kind's `exit_*` and `exit_every_rule`.
pub struct ParseTreeWalker;

impl ParseTreeWalker {
    pub fn walk<L: Listener + ?Sized>(listener: &mut L, node: NodeRef<'_>) {
        trace!(target: "sqlfront::walker", "walking {}", node.kind());
        let mut stack = vec![Event::Enter(node)];

        while let Some(event) = stack.pop() {
            match event {
                Event::Enter(node) => {
                    listener.enter_every_rule(node);
                    dispatch_enter(listener, node);
                    stack.push(Event::Exit(node));
                    stack.extend(node.children().rev().map(|child| match child {
                        ChildRef::Node(child) => Event::Enter(child),
                        ChildRef::Token(token) => Event::Terminal(token),
                    }));
                }
                Event::Exit(node) => {
                    dispatch_exit(listener, node);
                    listener.exit_every_rule(node);
                }
                Event::Terminal(token) => listener.visit_terminal(token),
            }
        }
    }
}

impl Tree {
    /// Walks the whole tree from its root.
    pub fn walk<L: Listener + ?Sized>(&self, listener: &mut L) {
        ParseTreeWalker::walk(listener, self.root());
    }
}
