use std::str::FromStr;

use super::config::{ParserConfig, SqlMode};
use crate::lexer::charset::Charset;

#[test]
fn test_default_config() {
    let config = ParserConfig::default();
    assert_eq!(config.charset, Charset::Utf8mb4);
    assert_eq!(config.sql_mode, SqlMode::default());
    assert_eq!(config.max_depth, 256);
}

#[test]
fn test_sql_mode_from_str() {
    let mode = SqlMode::from_str("ansi_quotes, PIPES_AS_CONCAT").unwrap();
    assert!(mode.ansi_quotes);
    assert!(mode.pipes_as_concat);
    assert!(!mode.ignore_space);
}

#[test]
fn test_sql_mode_ansi_combination() {
    let mode = SqlMode::from_str("ANSI").unwrap();
    assert_eq!(mode, SqlMode::ansi());
    assert_eq!(mode.to_string(), "ANSI_QUOTES,PIPES_AS_CONCAT,IGNORE_SPACE");
}

#[test]
fn test_sql_mode_ignores_non_syntactic_names() {
    let mode = SqlMode::from_str("STRICT_TRANS_TABLES,ONLY_FULL_GROUP_BY").unwrap();
    assert_eq!(mode, SqlMode::default());
}

#[test]
fn test_sql_mode_rejects_unknown_name() {
    let error = SqlMode::from_str("ANSI_QUOTES,NOT_A_MODE").unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidSqlMode");
}

#[test]
fn test_config_from_json() {
    let config = ParserConfig::from_json(
        r#"{"charset": "latin1", "sql_mode": {"ansi_quotes": true}}"#,
    )
    .unwrap();
    assert_eq!(config.charset, Charset::Latin1);
    assert!(config.sql_mode.ansi_quotes);
    assert_eq!(config.max_depth, 256);
}

#[test]
fn test_config_from_json_rejects_unknown_charset() {
    let error = ParserConfig::from_json(r#"{"charset": "klingon"}"#).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidConfig");
}

#[test]
fn test_config_json_round_trip() {
    let config = ParserConfig::default().with_charset(Charset::Ascii);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ParserConfig::from_json(&json).unwrap(), config);
}
