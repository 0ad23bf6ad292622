//! Error types and diagnostics collection.
//!
//! This module defines the errors produced while lexing and parsing:
//!
//! - Error structures carrying the byte span they refer to
//! - Specific error variants for the lexical and syntactic phases
//! - Helpful names and tips for presentation layers
//! - An ordered `Diagnostics` list that collects errors without aborting

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
