//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-width operators
//! - `MK_KEYWORDS!` - Generates the closed keyword enumeration
//! - `MK_NODE_KINDS!` - Generates the node kinds, their rule contexts, the
//!   listener trait and its dispatch table from one list
//!
//! Generating the listener and the dispatch `match` from the same list as
//! `NodeKind` is what makes traversal exhaustive: adding a kind without a
//! callback pair does not compile.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's raw text
/// * `$span` - The byte span in the source buffer
/// * `$position` - Line and column of the first byte
/// * `$keyword` - The keyword candidate, if the text is a keyword
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span, position, None);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr, $position:expr, $keyword:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            position: $position,
            keyword: $keyword,
        }
    };
}

/// Creates a lexer handler for an operator of a known byte width.
///
/// Generates a handler that emits a token with the given kind covering the
/// next `$width` bytes and advances the lexer past them.
///
/// # Example
///
/// ```ignore
/// RegexPattern::new(r"\A<=>", MK_DEFAULT_HANDLER!(TokenKind::NullSafeEquals, 3))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $width:literal) => {
        |lexer: &mut Lexer<'_>, _len: usize| Step::Emit(lexer.emit($kind, $width))
    };
}

/// Generates the `Keyword` enumeration.
///
/// Each entry names the variant, its canonical upper-case text and its
/// `KeywordClass` (which must be in scope at the invocation site).
#[macro_export]
macro_rules! MK_KEYWORDS {
    ($( $variant:ident => $text:literal : $class:ident, )*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $( $variant, )*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[ $( Keyword::$variant, )* ];

            /// Canonical upper-case spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Keyword::$variant => $text, )*
                }
            }

            pub fn class(self) -> KeywordClass {
                match self {
                    $( Keyword::$variant => KeywordClass::$class, )*
                }
            }
        }
    };
}

/// Generates `NodeKind`, one rule context type per kind, the `Listener`
/// trait and the dispatch functions used by the walker.
///
/// `NodeRef`, `TokenRef` and `RuleContext` must be in scope at the
/// invocation site.
#[macro_export]
macro_rules! MK_NODE_KINDS {
    ($( $(#[$meta:meta])* $kind:ident => $context:ident, $enter:ident, $exit:ident; )*) => {
        /// One tag per grammar production.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $( $(#[$meta])* $kind, )*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$kind, )* ];

            pub fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$kind => stringify!($kind), )*
                }
            }
        }

        impl std::fmt::Display for NodeKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        $(
            #[doc = concat!("Rule context of a [`NodeKind::", stringify!($kind), "`] node.")]
            #[derive(Debug, Clone, Copy)]
            pub struct $context<'t>(NodeRef<'t>);

            impl<'t> RuleContext<'t> for $context<'t> {
                const KIND: NodeKind = NodeKind::$kind;

                fn wrap(node: NodeRef<'t>) -> Self {
                    $context(node)
                }

                fn node(&self) -> NodeRef<'t> {
                    self.0
                }
            }

            impl<'t> std::ops::Deref for $context<'t> {
                type Target = NodeRef<'t>;

                fn deref(&self) -> &NodeRef<'t> {
                    &self.0
                }
            }
        )*

        /// Observer of a depth-first walk over a parse tree.
        ///
        /// Every node kind has an `enter_*` / `exit_*` pair receiving the
        /// kind's rule context. All callbacks default to no-ops, so a
        /// listener only implements the kinds it cares about.
        pub trait Listener {
            fn enter_every_rule(&mut self, _node: NodeRef<'_>) {}

            fn exit_every_rule(&mut self, _node: NodeRef<'_>) {}

            fn visit_terminal(&mut self, _token: TokenRef<'_>) {}

            $(
                fn $enter(&mut self, _ctx: $context<'_>) {}

                fn $exit(&mut self, _ctx: $context<'_>) {}
            )*
        }

        pub(crate) fn dispatch_enter<L: Listener + ?Sized>(listener: &mut L, node: NodeRef<'_>) {
            match node.kind() {
                $( NodeKind::$kind => listener.$enter($context(node)), )*
            }
        }

        pub(crate) fn dispatch_exit<L: Listener + ?Sized>(listener: &mut L, node: NodeRef<'_>) {
            match node.kind() {
                $( NodeKind::$kind => listener.$exit($context(node)), )*
            }
        }
    };
}
