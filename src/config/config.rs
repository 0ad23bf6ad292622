use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::charset::Charset,
    Span,
};

/// Dialect flags that change how text is tokenized and how a few operators
/// bind. Only the syntactically relevant subset of the server's `sql_mode`
/// is modelled; the remaining names are accepted and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlMode {
    /// `"text"` is a quoted identifier instead of a string literal.
    pub ansi_quotes: bool,
    /// `||` is string concatenation instead of logical OR.
    pub pipes_as_concat: bool,
    /// `NOT` binds as tightly as `!`.
    pub high_not_precedence: bool,
    /// Backslash is an ordinary character inside string literals.
    pub no_backslash_escapes: bool,
    /// Whitespace is allowed between a built-in function name and `(`,
    /// which turns those names into reserved words.
    pub ignore_space: bool,
}

/// Mode names that are valid for the server but have no syntactic effect.
const IGNORED_MODES: &[&str] = &[
    "REAL_AS_FLOAT",
    "ONLY_FULL_GROUP_BY",
    "STRICT_TRANS_TABLES",
    "STRICT_ALL_TABLES",
    "NO_ZERO_IN_DATE",
    "NO_ZERO_DATE",
    "ERROR_FOR_DIVISION_BY_ZERO",
    "NO_ENGINE_SUBSTITUTION",
    "NO_AUTO_VALUE_ON_ZERO",
    "NO_UNSIGNED_SUBTRACTION",
    "NO_DIR_IN_CREATE",
    "ALLOW_INVALID_DATES",
    "PAD_CHAR_TO_FULL_LENGTH",
    "TIME_TRUNCATE_FRACTIONAL",
    "TRADITIONAL",
];

impl SqlMode {
    /// The `ANSI` combination mode.
    pub fn ansi() -> Self {
        SqlMode {
            ansi_quotes: true,
            pipes_as_concat: true,
            ignore_space: true,
            ..SqlMode::default()
        }
    }

    fn set(&mut self, name: &str) -> bool {
        match name {
            "ANSI_QUOTES" => self.ansi_quotes = true,
            "PIPES_AS_CONCAT" => self.pipes_as_concat = true,
            "HIGH_NOT_PRECEDENCE" => self.high_not_precedence = true,
            "NO_BACKSLASH_ESCAPES" => self.no_backslash_escapes = true,
            "IGNORE_SPACE" => self.ignore_space = true,
            "ANSI" => {
                self.ansi_quotes = true;
                self.pipes_as_concat = true;
                self.ignore_space = true;
            }
            other => return IGNORED_MODES.contains(&other),
        }
        true
    }
}

impl FromStr for SqlMode {
    type Err = Error;

    /// Parses the comma separated `sql_mode` format, e.g.
    /// `"ANSI_QUOTES,PIPES_AS_CONCAT"`. Names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = SqlMode::default();

        for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if !mode.set(&name.to_ascii_uppercase()) {
                return Err(Error::new(
                    ErrorImpl::InvalidSqlMode {
                        mode: name.to_string(),
                    },
                    Span::default(),
                ));
            }
        }

        Ok(mode)
    }
}

impl Display for SqlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = [
            (self.ansi_quotes, "ANSI_QUOTES"),
            (self.pipes_as_concat, "PIPES_AS_CONCAT"),
            (self.high_not_precedence, "HIGH_NOT_PRECEDENCE"),
            (self.no_backslash_escapes, "NO_BACKSLASH_ESCAPES"),
            (self.ignore_space, "IGNORE_SPACE"),
        ];
        let names: Vec<&str> = flags
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}

/// Everything a parse request needs besides the input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Charset the input buffer is encoded in.
    pub charset: Charset,
    pub sql_mode: SqlMode,
    /// Maximum grammar nesting (parentheses, subqueries, unary chains).
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            charset: Charset::Utf8mb4,
            sql_mode: SqlMode::default(),
            max_depth: 256,
        }
    }
}

impl ParserConfig {
    pub fn with_sql_mode(mut self, sql_mode: SqlMode) -> Self {
        self.sql_mode = sql_mode;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Loads a configuration from JSON, e.g.
    /// `{"charset": "latin1", "sql_mode": {"ansi_quotes": true}}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|err| {
            Error::new(
                ErrorImpl::InvalidConfig {
                    message: err.to_string(),
                },
                Span::default(),
            )
        })
    }
}
