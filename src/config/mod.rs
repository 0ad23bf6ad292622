//! Parser configuration.
//!
//! Pure data: the declared source charset, the SQL mode flag set and the
//! recursion limit. A `ParserConfig` is built once and shared read-only by
//! any number of parse requests.

pub mod config;

#[cfg(test)]
mod tests;
