use std::fmt::Display;

use serde::Serialize;

use crate::{Position, Span};

use super::keywords::Keyword;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    EOF,
    /// Bytes the lexer could not form a token from. Always paired with a
    /// lexical error record.
    Invalid,

    /// Unquoted word. Carries a keyword candidate when its text is an
    /// unreserved or function-class keyword; the grammar decides whether it
    /// is used as keyword or identifier.
    Word,
    /// Reserved word (or function name under IGNORE_SPACE).
    Keyword,
    /// `` `name` `` or, under ANSI_QUOTES, `"name"`.
    QuotedIdentifier,
    /// `_utf8mb4` style charset introducer before a string literal.
    Introducer,

    String,
    /// `N'...'`
    NationalString,
    /// `X'...'` or `0x...`
    HexString,
    /// `B'...'` or `0b...`
    BitString,
    Integer,
    Decimal,
    Float,

    /// `/*+ ... */` right after SELECT, INSERT, UPDATE, DELETE or REPLACE.
    Hint,
    /// `@name`, `@'name'`
    UserVariable,
    /// `@@name`, `@@global.name`
    SystemVariable,
    /// `?`
    ParamMarker,
    /// A lone `@`, as in `'user' @ 'host'`.
    At,

    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Dot,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Tilde,
    ShiftLeft,
    ShiftRight,

    Equals,
    NullSafeEquals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    /// `!`
    Not,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `:=`
    Assignment,
    /// `->`
    Arrow,
    /// `->>`
    DoubleArrow,
}

impl TokenKind {
    /// Human readable description used in expected-token lists.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Invalid => "invalid token",
            TokenKind::Word | TokenKind::QuotedIdentifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Introducer => "charset introducer",
            TokenKind::String | TokenKind::NationalString => "string literal",
            TokenKind::HexString => "hexadecimal literal",
            TokenKind::BitString => "bit literal",
            TokenKind::Integer => "integer",
            TokenKind::Decimal | TokenKind::Float => "number",
            TokenKind::Hint => "optimizer hint",
            TokenKind::UserVariable => "user variable",
            TokenKind::SystemVariable => "system variable",
            TokenKind::ParamMarker => "?",
            TokenKind::At => "@",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Tilde => "~",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::Equals => "=",
            TokenKind::NullSafeEquals => "<=>",
            TokenKind::NotEquals => "<>",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Not => "!",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Assignment => ":=",
            TokenKind::Arrow => "->",
            TokenKind::DoubleArrow => "->>",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::NationalString
                | TokenKind::HexString
                | TokenKind::BitString
                | TokenKind::Integer
                | TokenKind::Decimal
                | TokenKind::Float
        )
    }

    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Decimal | TokenKind::Float)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, decoded with the input charset.
    pub value: String,
    pub span: Span,
    pub position: Position,
    /// Keyword candidate for `Word` tokens, the keyword for `Keyword` tokens.
    pub keyword: Option<Keyword>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Whether this token spells `keyword`, reserved or not.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.is_one_of_many(&[TokenKind::Keyword, TokenKind::Word]) && self.keyword == Some(keyword)
    }

    /// Whether the token can name a schema object without quoting.
    pub fn is_identifier_like(&self) -> bool {
        self.is_one_of_many(&[TokenKind::Word, TokenKind::QuotedIdentifier])
    }

    /// Compact one-line form used by the token dump of the CLI.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::EOF]) {
            format!("{} @{}", self.kind, self.position)
        } else {
            format!(
                "{} {:?} @{} [{}]",
                self.kind, self.value, self.position, self.span
            )
        }
    }
}
