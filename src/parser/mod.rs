//! Parser module for building the concrete parse tree.
//!
//! This module turns the token stream of a batch into a [`Tree`]. It uses a
//! Pratt parser for expressions with MySQL operator precedence and
//! recursive descent for statements, and handles:
//!
//! - Queries, set operations, joins and window definitions
//! - Data manipulation and data definition statements
//! - Transactions, access control and administrative commands
//! - Per-statement error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.
//!
//! [`Tree`]: crate::ast::ast::Tree

pub mod account;
pub mod admin;
pub mod ddl;
pub mod dml;
pub mod expr;
pub mod hints;
pub mod json;
pub mod lookups;
pub mod parser;
pub mod partition;
pub mod query;
pub mod txn;
pub mod types;

#[cfg(test)]
mod tests;
