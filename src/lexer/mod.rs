//! Lexical analysis module for the SQL front end.
//!
//! This module contains the lexer (tokenizer) that converts a raw input
//! buffer into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using anchored byte regex patterns in priority order
//! - Keyword recognition with reserved, unreserved and function classes
//! - Quoted strings and identifiers, numeric, hex and bit literals
//! - Comments, optimizer hints and executable comments
//! - Charset validation of the input buffer
//! - Byte span and line/column tracking for error reporting

pub mod charset;
pub mod keywords;
pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
