use std::ops::Range;

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::{debug, trace};

use crate::{
    config::config::ParserConfig,
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    charset::Charset,
    keywords::Keyword,
    tokens::{Token, TokenKind},
};

/// What a pattern handler did with the text its regex matched.
pub enum Step {
    /// Produced a token; the lexer has advanced past it.
    Emit(Token),
    /// Consumed trivia (whitespace, comments, comment delimiters).
    Skip,
    /// The match does not apply here; try the next pattern.
    Decline,
}

/// Receives the lexer positioned at the match and the match length.
pub type RegexHandler = for<'a> fn(&mut Lexer<'a>, usize) -> Step;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

/// Handler for a literal whose whole extent is the regex match.
macro_rules! MK_LITERAL_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer<'_>, len: usize| Step::Emit(lexer.emit($kind, len))
    };
}

/// Handler for a numeric literal. Declines when an identifier character
/// follows, since identifiers may begin with digits (`1abc`, `0x1g`).
macro_rules! MK_NUMBER_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer<'_>, len: usize| {
            if lexer.is_identifier_byte_at(lexer.pos + len) {
                Step::Decline
            } else {
                Step::Emit(lexer.emit($kind, len))
            }
        }
    };
}

lazy_static! {
    /// Patterns in priority order. Every regex is anchored with `\A` and
    /// runs over raw bytes so spans are byte offsets whatever the charset.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"(?-u)\A[ \t\r\n\x0B\x0C]+", skip_handler),
        RegexPattern::new(r"(?-u)\A/\*", block_comment_handler),
        RegexPattern::new(r"(?-u)\A\*/", executable_comment_end_handler),
        RegexPattern::new(r"(?-u)\A--(?:[ \t\r\n\x0B\x0C]|\z)", line_comment_handler),
        RegexPattern::new(r"(?-u)\A#", line_comment_handler),
        RegexPattern::new(
            r"(?-u)\A@@[A-Za-z0-9_$\x80-\xFF]+(?:\.[A-Za-z0-9_$\x80-\xFF]+)?",
            system_variable_handler,
        ),
        RegexPattern::new(r"(?-u)\A@[A-Za-z0-9_$.\x80-\xFF]+", user_variable_handler),
        RegexPattern::new(r#"(?-u)\A@['"`]"#, quoted_user_variable_handler),
        RegexPattern::new(r"(?-u)\A@", MK_DEFAULT_HANDLER!(TokenKind::At, 1)),
        RegexPattern::new(r"(?-u)\A<=>", MK_DEFAULT_HANDLER!(TokenKind::NullSafeEquals, 3)),
        RegexPattern::new(r"(?-u)\A->>", MK_DEFAULT_HANDLER!(TokenKind::DoubleArrow, 3)),
        RegexPattern::new(r"(?-u)\A->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, 2)),
        RegexPattern::new(r"(?-u)\A<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, 2)),
        RegexPattern::new(r"(?-u)\A>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, 2)),
        RegexPattern::new(r"(?-u)\A<>", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, 2)),
        RegexPattern::new(r"(?-u)\A!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, 2)),
        RegexPattern::new(r"(?-u)\A<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, 2)),
        RegexPattern::new(r"(?-u)\A>>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, 2)),
        RegexPattern::new(r"(?-u)\A&&", MK_DEFAULT_HANDLER!(TokenKind::And, 2)),
        RegexPattern::new(r"(?-u)\A\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, 2)),
        RegexPattern::new(r"(?-u)\A:=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, 2)),
        RegexPattern::new(r"(?-u)\A[Nn]'", national_string_handler),
        RegexPattern::new(r"(?-u)\A[Xx]'[0-9A-Fa-f]*'", MK_LITERAL_HANDLER!(TokenKind::HexString)),
        RegexPattern::new(r"(?-u)\A[Bb]'[01]*'", MK_LITERAL_HANDLER!(TokenKind::BitString)),
        RegexPattern::new(r"(?-u)\A'", single_quote_handler),
        RegexPattern::new(r#"(?-u)\A""#, double_quote_handler),
        RegexPattern::new(r"(?-u)\A`", backtick_handler),
        RegexPattern::new(r"(?-u)\A0x[0-9A-Fa-f]+", MK_NUMBER_HANDLER!(TokenKind::HexString)),
        RegexPattern::new(r"(?-u)\A0b[01]+", MK_NUMBER_HANDLER!(TokenKind::BitString)),
        RegexPattern::new(
            r"(?-u)\A(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)[eE][+-]?[0-9]+",
            MK_NUMBER_HANDLER!(TokenKind::Float),
        ),
        RegexPattern::new(r"(?-u)\A(?:[0-9]+\.[0-9]*|\.[0-9]+)", MK_NUMBER_HANDLER!(TokenKind::Decimal)),
        RegexPattern::new(r"(?-u)\A[0-9]+", MK_NUMBER_HANDLER!(TokenKind::Integer)),
        RegexPattern::new(r"(?-u)\A_[A-Za-z0-9]+", introducer_handler),
        RegexPattern::new(r"(?-u)\A[A-Za-z0-9_$\x80-\xFF]+", word_handler),
        RegexPattern::new(r"(?-u)\A=", MK_DEFAULT_HANDLER!(TokenKind::Equals, 1)),
        RegexPattern::new(r"(?-u)\A<", MK_DEFAULT_HANDLER!(TokenKind::Less, 1)),
        RegexPattern::new(r"(?-u)\A>", MK_DEFAULT_HANDLER!(TokenKind::Greater, 1)),
        RegexPattern::new(r"(?-u)\A!", MK_DEFAULT_HANDLER!(TokenKind::Not, 1)),
        RegexPattern::new(r"(?-u)\A~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, 1)),
        RegexPattern::new(r"(?-u)\A\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, 1)),
        RegexPattern::new(r"(?-u)\A&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, 1)),
        RegexPattern::new(r"(?-u)\A\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, 1)),
        RegexPattern::new(r"(?-u)\A\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, 1)),
        RegexPattern::new(r"(?-u)\A-", MK_DEFAULT_HANDLER!(TokenKind::Dash, 1)),
        RegexPattern::new(r"(?-u)\A\*", MK_DEFAULT_HANDLER!(TokenKind::Star, 1)),
        RegexPattern::new(r"(?-u)\A/", MK_DEFAULT_HANDLER!(TokenKind::Slash, 1)),
        RegexPattern::new(r"(?-u)\A%", MK_DEFAULT_HANDLER!(TokenKind::Percent, 1)),
        RegexPattern::new(r"(?-u)\A\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, 1)),
        RegexPattern::new(r"(?-u)\A\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, 1)),
        RegexPattern::new(r"(?-u)\A,", MK_DEFAULT_HANDLER!(TokenKind::Comma, 1)),
        RegexPattern::new(r"(?-u)\A;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, 1)),
        RegexPattern::new(r"(?-u)\A\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, 1)),
        RegexPattern::new(r"(?-u)\A\?", MK_DEFAULT_HANDLER!(TokenKind::ParamMarker, 1)),
    ];
}

/// Turns an input buffer into tokens on demand.
///
/// The lexer never stops at bad input: every lexical problem is recorded
/// in [`Lexer::errors`] and surfaces as an [`TokenKind::Invalid`] token so
/// the parser can discard the statement containing it. The last token is
/// always [`TokenKind::EOF`].
pub struct Lexer<'a> {
    patterns: &'static [RegexPattern],
    source: &'a [u8],
    config: &'a ParserConfig,
    pub(crate) pos: usize,
    line: u32,
    line_start: usize,
    invalid: Vec<Range<usize>>,
    errors: Vec<Error>,
    executable_comment: Option<usize>,
    last_keyword: Option<Keyword>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], config: &'a ParserConfig) -> Lexer<'a> {
        let mut lexer = Lexer {
            patterns: PATTERNS.as_slice(),
            source,
            config,
            pos: 0,
            line: 1,
            line_start: 0,
            invalid: vec![],
            errors: vec![],
            executable_comment: None,
            last_keyword: None,
            done: false,
        };
        lexer.validate_charset();
        lexer
    }

    /// Rewinds to the start of the input, discarding recorded errors other
    /// than encoding errors.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.line_start = 0;
        self.errors.clear();
        self.executable_comment = None;
        self.last_keyword = None;
        self.done = false;
        self.validate_charset();
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn charset(&self) -> Charset {
        self.config.charset
    }

    fn validate_charset(&mut self) {
        let charset = self.config.charset;
        self.invalid = charset.invalid_ranges(self.source);

        for range in self.invalid.clone() {
            debug!(start = range.start, end = range.end, %charset, "invalid byte sequence");
            self.push_error(
                ErrorImpl::InvalidEncoding {
                    charset: charset.name().to_string(),
                },
                range.start,
                range.end,
            );
        }
    }

    pub fn remainder(&self) -> &'a [u8] {
        &self.source[self.pos.min(self.source.len())..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_position(&self) -> Position {
        Position {
            line: self.line,
            column: (self.pos - self.line_start) as u32 + 1,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for (offset, byte) in self.source[self.pos..end].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = self.pos + offset + 1;
            }
        }
        self.pos = end;
    }

    fn is_identifier_byte_at(&self, at: usize) -> bool {
        self.source
            .get(at)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$' || *b >= 0x80)
    }

    fn overlaps_invalid(&self, start: usize, end: usize) -> bool {
        self.invalid
            .iter()
            .any(|range| range.start < end && start < range.end)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.config.charset.decode(&self.source[start..end])
    }

    /// Creates a token over the next `len` bytes and advances past them.
    /// Tokens overlapping an invalid byte sequence become `Invalid`.
    pub fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        self.emit_with_keyword(kind, len, None)
    }

    fn emit_with_keyword(&mut self, kind: TokenKind, len: usize, keyword: Option<Keyword>) -> Token {
        let start = self.pos;
        let end = (start + len).min(self.source.len());
        let kind = if self.overlaps_invalid(start, end) {
            TokenKind::Invalid
        } else {
            kind
        };
        let keyword = if kind == TokenKind::Invalid { None } else { keyword };

        let token = MK_TOKEN!(
            kind,
            self.text(start, end),
            Span::new(start, end),
            self.current_position(),
            keyword
        );
        self.advance_n(end - start);
        token
    }

    fn push_error(&mut self, error: ErrorImpl, start: usize, end: usize) {
        debug!(error = %error, start, end, "lexical error");
        self.errors.push(Error::new(error, Span::new(start, end)));
    }

    /// Offset of the end of the current line (the newline itself excluded).
    fn end_of_line(&self) -> usize {
        self.remainder()
            .iter()
            .position(|b| *b == b'\n')
            .map(|offset| self.pos + offset)
            .unwrap_or(self.source.len())
    }

    /// Finds the end (exclusive) of a quoted run starting at `open`.
    /// A doubled quote is an escaped quote; with `backslash`, a backslash
    /// escapes the following byte.
    fn scan_quoted(&self, open: usize, quote: u8, backslash: bool) -> Option<usize> {
        let mut i = open + 1;
        while i < self.source.len() {
            let byte = self.source[i];
            if backslash && byte == b'\\' {
                i += 2;
                continue;
            }
            if byte == quote {
                if self.source.get(i + 1) == Some(&quote) {
                    i += 2;
                    continue;
                }
                return Some(i + 1);
            }
            i += 1;
        }
        None
    }

    /// Emits a quoted token of `kind` whose opening quote is `prefix` bytes
    /// into the current position. Unterminated quotes invalidate the rest of
    /// the line.
    fn quoted(&mut self, kind: TokenKind, prefix: usize, quote: u8, backslash: bool) -> Step {
        let start = self.pos;
        match self.scan_quoted(start + prefix, quote, backslash) {
            Some(end) => Step::Emit(self.emit(kind, end - start)),
            None => {
                let end = self.end_of_line();
                let error = if kind == TokenKind::QuotedIdentifier {
                    ErrorImpl::UnterminatedIdentifier
                } else {
                    ErrorImpl::UnterminatedString
                };
                self.push_error(error, start, end);
                Step::Emit(self.emit(TokenKind::Invalid, end - start))
            }
        }
    }

    fn backslash_escapes(&self) -> bool {
        !self.config.sql_mode.no_backslash_escapes
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let patterns = self.patterns;

        'scan: loop {
            if self.at_eof() {
                if let Some(start) = self.executable_comment.take() {
                    self.push_error(ErrorImpl::UnterminatedComment, start, self.source.len());
                }
                self.done = true;
                let eof = MK_TOKEN!(
                    TokenKind::EOF,
                    String::new(),
                    Span::new(self.pos, self.pos),
                    self.current_position(),
                    None
                );
                return Some(eof);
            }

            for pattern in patterns.iter() {
                let len = match pattern.regex.find(self.remainder()) {
                    Some(matched) => matched.end(),
                    None => continue,
                };

                match (pattern.handler)(self, len) {
                    Step::Emit(token) => {
                        trace!(kind = %token.kind, value = %token.value, span = %token.span, "token");
                        self.last_keyword = match token.kind {
                            TokenKind::Keyword => token.keyword,
                            _ => None,
                        };
                        return Some(token);
                    }
                    Step::Skip => continue 'scan,
                    Step::Decline => continue,
                }
            }

            let start = self.pos;
            let token = self.text(start, start + 1);
            self.push_error(ErrorImpl::UnrecognisedToken { token }, start, start + 1);
            return Some(self.emit(TokenKind::Invalid, 1));
        }
    }
}

fn skip_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    lexer.advance_n(len);
    Step::Skip
}

fn line_comment_handler(lexer: &mut Lexer<'_>, _len: usize) -> Step {
    let end = lexer.end_of_line();
    lexer.advance_n(end - lexer.pos);
    Step::Skip
}

/// `/* ... */`, `/*+ hint */`, `/*!50100 executable */` and `/*T! ... */`.
fn block_comment_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    let start = lexer.pos;
    let body = &lexer.remainder()[len..];

    if lexer.executable_comment.is_none() {
        if body.starts_with(b"!") {
            let digits = body[1..]
                .iter()
                .take(6)
                .take_while(|b| b.is_ascii_digit())
                .count();
            lexer.executable_comment = Some(start);
            lexer.advance_n(len + 1 + digits);
            return Step::Skip;
        }

        if body.starts_with(b"T!") {
            let feature = match body[2..].first() {
                Some(b'[') => body[2..]
                    .iter()
                    .position(|b| *b == b']')
                    .map(|i| i + 1)
                    .unwrap_or(0),
                _ => 0,
            };
            lexer.executable_comment = Some(start);
            lexer.advance_n(len + 2 + feature);
            return Step::Skip;
        }
    }

    let close = body.windows(2).position(|window| window == b"*/");
    let Some(close) = close else {
        let end = lexer.source.len();
        lexer.push_error(ErrorImpl::UnterminatedComment, start, end);
        return Step::Emit(lexer.emit(TokenKind::Invalid, end - start));
    };

    let end = len + close + 2;
    if body.starts_with(b"+") && lexer.last_keyword.is_some_and(Keyword::takes_hint) {
        return Step::Emit(lexer.emit(TokenKind::Hint, end));
    }

    lexer.advance_n(end);
    Step::Skip
}

/// The `*/` closing an executable comment is trivia; anywhere else it is
/// a `*` followed by `/`.
fn executable_comment_end_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    if lexer.executable_comment.take().is_some() {
        lexer.advance_n(len);
        Step::Skip
    } else {
        Step::Decline
    }
}

fn system_variable_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    Step::Emit(lexer.emit(TokenKind::SystemVariable, len))
}

fn user_variable_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    Step::Emit(lexer.emit(TokenKind::UserVariable, len))
}

fn quoted_user_variable_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    let quote = lexer.remainder()[len - 1];
    let backslash = quote != b'`' && lexer.backslash_escapes();
    lexer.quoted(TokenKind::UserVariable, 1, quote, backslash)
}

fn national_string_handler(lexer: &mut Lexer<'_>, _len: usize) -> Step {
    let backslash = lexer.backslash_escapes();
    lexer.quoted(TokenKind::NationalString, 1, b'\'', backslash)
}

fn single_quote_handler(lexer: &mut Lexer<'_>, _len: usize) -> Step {
    let backslash = lexer.backslash_escapes();
    lexer.quoted(TokenKind::String, 0, b'\'', backslash)
}

fn double_quote_handler(lexer: &mut Lexer<'_>, _len: usize) -> Step {
    if lexer.config.sql_mode.ansi_quotes {
        lexer.quoted(TokenKind::QuotedIdentifier, 0, b'"', false)
    } else {
        let backslash = lexer.backslash_escapes();
        lexer.quoted(TokenKind::String, 0, b'"', backslash)
    }
}

fn backtick_handler(lexer: &mut Lexer<'_>, _len: usize) -> Step {
    lexer.quoted(TokenKind::QuotedIdentifier, 0, b'`', false)
}

fn introducer_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    let name = lexer.text(lexer.pos + 1, lexer.pos + len);
    if lexer.is_identifier_byte_at(lexer.pos + len) || !Charset::is_introducer_name(&name) {
        return Step::Decline;
    }
    Step::Emit(lexer.emit(TokenKind::Introducer, len))
}

fn word_handler(lexer: &mut Lexer<'_>, len: usize) -> Step {
    let text = lexer.text(lexer.pos, lexer.pos + len);
    let keyword = Keyword::lookup(&text);

    let kind = match keyword {
        Some(keyword) if keyword.is_reserved() => TokenKind::Keyword,
        Some(keyword) if keyword.is_function() && lexer.config.sql_mode.ignore_space => {
            TokenKind::Keyword
        }
        _ => TokenKind::Word,
    };

    Step::Emit(lexer.emit_with_keyword(kind, len, keyword))
}

/// Output of [`tokenize`]: the full token sequence (ending in EOF) and the
/// lexical errors found on the way.
#[derive(Debug, Clone)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub errors: Vec<Error>,
}

pub fn tokenize(input: &[u8], config: &ParserConfig) -> TokenStream {
    let mut lexer = Lexer::new(input, config);
    let tokens: Vec<Token> = lexer.by_ref().collect();

    debug!(
        tokens = tokens.len(),
        errors = lexer.errors().len(),
        charset = %config.charset,
        "tokenized input"
    );

    TokenStream {
        tokens,
        errors: lexer.take_errors(),
    }
}

/// Decodes the value of a string literal token: strips the quotes (and an
/// `N` prefix), folds doubled quotes and applies backslash escapes unless
/// `no_backslash_escapes` is set. Text that does not open with a quote is
/// returned unchanged.
pub fn unescape_string(raw: &str, no_backslash_escapes: bool) -> String {
    let raw = match raw.as_bytes() {
        [b'N' | b'n', b'\'', ..] => &raw[1..],
        _ => raw,
    };
    let quote = match raw.as_bytes().first() {
        Some(b'\'') => '\'',
        Some(b'"') => '"',
        Some(_) => return raw.to_string(),
        None => return String::new(),
    };
    let body = if raw.len() >= 2 && raw.ends_with(quote) {
        &raw[1..raw.len() - 1]
    } else {
        &raw[1..]
    };

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == quote && chars.peek() == Some(&quote) {
            chars.next();
            result.push(quote);
        } else if ch == '\\' && !no_backslash_escapes {
            match chars.next() {
                Some('0') => result.push('\0'),
                Some('b') => result.push('\u{8}'),
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('Z') => result.push('\u{1a}'),
                // kept escaped for LIKE patterns
                Some(wildcard @ ('%' | '_')) => {
                    result.push('\\');
                    result.push(wildcard);
                }
                Some(other) => result.push(other),
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Strips the quotes of a quoted identifier and folds doubled quotes.
/// Unquoted text is returned unchanged.
pub fn unquote_identifier(raw: &str) -> String {
    let quote = match raw.chars().next() {
        Some(quote @ ('`' | '"')) => quote,
        _ => return raw.to_string(),
    };
    let body = if raw.len() >= 2 && raw.ends_with(quote) {
        &raw[1..raw.len() - 1]
    } else {
        &raw[1..]
    };

    let doubled: String = [quote, quote].iter().collect();
    body.replace(&doubled, &quote.to_string())
}
