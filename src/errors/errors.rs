use std::fmt::Display;

use thiserror::Error;

use crate::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Token descriptions the grammar would have accepted at the error
    /// position. Empty for lexical errors.
    pub fn expected(&self) -> &[String] {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => expected,
            ErrorImpl::UnexpectedEof { expected } => expected,
            _ => &[],
        }
    }

    /// The offending text, when the error is tied to a token.
    pub fn found(&self) -> Option<&str> {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token }
            | ErrorImpl::UnexpectedToken { token, .. }
            | ErrorImpl::AmbiguousConstruct { token, .. } => Some(token),
            ErrorImpl::InvalidJsonPath { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::InvalidEncoding { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::UnterminatedIdentifier
                | ErrorImpl::UnterminatedComment
                | ErrorImpl::UnrecognisedToken { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidEncoding { .. } => "InvalidEncoding",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedIdentifier => "UnterminatedIdentifier",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::AmbiguousConstruct { .. } => "AmbiguousConstruct",
            ErrorImpl::InvalidJsonPath { .. } => "InvalidJsonPath",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::InvalidSqlMode { .. } => "InvalidSqlMode",
            ErrorImpl::UnknownCharset { .. } => "UnknownCharset",
            ErrorImpl::InvalidConfig { .. } => "InvalidConfig",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidEncoding { charset } => ErrorTip::Suggestion(format!(
                "The statement text is not valid `{}`, was it sent with another charset?",
                charset
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Missing closing quote for string literal"))
            }
            ErrorImpl::UnterminatedIdentifier => {
                ErrorTip::Suggestion(String::from("Missing closing quote for identifier"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Missing `*/` at the end of the comment"))
            }
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } if !expected.is_empty() => {
                ErrorTip::Suggestion(format!(
                    "Unexpected `{}`, expected {}",
                    token,
                    describe_expected(expected)
                ))
            }
            ErrorImpl::UnexpectedToken { token, .. } => {
                ErrorTip::Suggestion(format!("Unexpected `{}`, did you miss a `;`?", token))
            }
            ErrorImpl::UnexpectedEof { expected } if !expected.is_empty() => {
                ErrorTip::Suggestion(format!(
                    "The statement ends too early, expected {}",
                    describe_expected(expected)
                ))
            }
            ErrorImpl::UnexpectedEof { .. } => ErrorTip::None,
            ErrorImpl::AmbiguousConstruct { message, .. } => {
                ErrorTip::Suggestion(message.clone())
            }
            ErrorImpl::InvalidJsonPath { message, .. } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions and subqueries may nest at most {} levels",
                limit
            )),
            ErrorImpl::InvalidSqlMode { .. }
            | ErrorImpl::UnknownCharset { .. }
            | ErrorImpl::InvalidConfig { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.span)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("one of {} or {}", init.join(", "), last),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid byte sequence for charset {charset}")]
    InvalidEncoding { charset: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated quoted identifier")]
    UnterminatedIdentifier,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token {token:?}{}", expected_suffix(.expected))]
    UnexpectedToken { token: String, expected: Vec<String> },
    #[error("unexpected end of input{}", expected_suffix(.expected))]
    UnexpectedEof { expected: Vec<String> },
    #[error("ambiguous construct at {token:?}: {message}")]
    AmbiguousConstruct { token: String, message: String },
    #[error("invalid JSON path {path:?}: {message}")]
    InvalidJsonPath { path: String, message: String },
    #[error("nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
    #[error("unknown sql mode {mode:?}")]
    InvalidSqlMode { mode: String },
    #[error("unknown charset {name:?}")]
    UnknownCharset { name: String },
    #[error("invalid parser configuration: {message}")]
    InvalidConfig { message: String },
}

fn expected_suffix(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected {}", describe_expected(expected))
    }
}
