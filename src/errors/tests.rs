//! Unit tests for error handling.
//!
//! This module contains tests for error types, tips and the ordering of
//! collected diagnostics.

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Span;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "\u{1}".to_string(),
        },
        Span::new(10, 11),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.is_lexical());
}

#[test]
fn test_error_span() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "FROM".to_string(),
            expected: vec![],
        },
        Span::new(42, 46),
    );

    assert_eq!(error.get_span().start, 42);
    assert_eq!(error.get_span().end, 46);
    assert_eq!(error.found(), Some("FROM"));
    assert!(!error.is_lexical());
}

#[test]
fn test_unexpected_token_lists_expected_set() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "SELEC".to_string(),
            expected: vec!["SELECT".to_string(), "INSERT".to_string(), "UPDATE".to_string()],
        },
        Span::new(0, 5),
    );

    assert_eq!(
        error.to_string(),
        "unexpected token \"SELEC\", expected one of SELECT, INSERT or UPDATE at 0..5"
    );
    assert_eq!(error.expected().len(), 3);
}

#[test]
fn test_unexpected_eof_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedEof {
            expected: vec!["identifier".to_string()],
        },
        Span::new(14, 14),
    );

    assert_eq!(
        error.kind().to_string(),
        "unexpected end of input, expected identifier"
    );
}

#[test]
fn test_error_tip() {
    let error = Error::new(ErrorImpl::UnterminatedComment, Span::new(0, 2));
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("*/")),
        ErrorTip::None => panic!("expected a suggestion"),
    }

    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "\u{1}".to_string(),
        },
        Span::new(0, 1),
    );
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_nesting_error_tip_mentions_limit() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 8 }, Span::new(3, 4));
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(error.get_tip().to_string().contains('8'));
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Error::new(ErrorImpl::UnterminatedString, Span::new(30, 35)));
    diagnostics.push(Error::new(
        ErrorImpl::InvalidEncoding {
            charset: "utf8mb4".to_string(),
        },
        Span::new(3, 4),
    ));
    diagnostics.push(Error::new(ErrorImpl::UnterminatedComment, Span::new(12, 20)));

    let starts: Vec<usize> = diagnostics.iter().map(|e| e.get_span().start).collect();
    assert_eq!(starts, vec![3, 12, 30]);
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn test_diagnostics_keep_insertion_order_for_equal_positions() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Error::new(ErrorImpl::UnterminatedString, Span::new(5, 9)));
    diagnostics.push(Error::new(ErrorImpl::UnterminatedIdentifier, Span::new(5, 9)));

    let names: Vec<&str> = diagnostics.iter().map(|e| e.get_error_name()).collect();
    assert_eq!(names, vec!["UnterminatedString", "UnterminatedIdentifier"]);
}

#[test]
fn test_diagnostics_overlap() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Error::new(ErrorImpl::UnterminatedString, Span::new(10, 20)));

    assert!(diagnostics.overlaps(15, 16));
    assert!(diagnostics.overlaps(0, 11));
    assert!(!diagnostics.overlaps(20, 25));
    assert!(!diagnostics.overlaps(0, 10));
}
