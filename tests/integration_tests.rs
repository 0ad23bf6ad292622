//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public API from raw input through tokenization,
//! parsing and tree traversal, and check the properties every parse must
//! keep regardless of the statement mix.

use std::{collections::HashMap, thread};

use proptest::prelude::*;
use rstest::rstest;
use sqlfront::{
    ast::{
        ast::{Binding, NodeRef, TokenRef},
        kinds::{ColumnDefContext, Listener, NodeKind},
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse, parse_with, render_caret, Charset, ParseResult, ParserConfig, SqlMode,
};

fn lexed_texts(sql: &str, config: &ParserConfig) -> Vec<String> {
    tokenize(sql.as_bytes(), config)
        .tokens
        .into_iter()
        .filter(|token| token.kind != TokenKind::EOF)
        .map(|token| token.value)
        .collect()
}

fn tree_texts(result: &ParseResult) -> Vec<String> {
    result
        .tree()
        .root()
        .token_texts()
        .into_iter()
        .map(String::from)
        .collect()
}

fn find(node: NodeRef<'_>, kind: NodeKind) -> Option<NodeRef<'_>> {
    if node.kind() == kind {
        return Some(node);
    }
    node.child_nodes().find_map(|child| find(child, kind))
}

const BATCH: &str = "\
    WITH recent AS (SELECT id, total FROM orders WHERE created_at > NOW() - INTERVAL 7 DAY)
    SELECT c.name, SUM(r.total) AS spent
      FROM customers c JOIN recent r ON r.id = c.id
     GROUP BY c.name HAVING spent > 100 ORDER BY spent DESC LIMIT 10;
    INSERT INTO audit (who, at) VALUES (CURRENT_USER(), NOW()) ON DUPLICATE KEY UPDATE at = VALUES(at);
    UPDATE orders SET status = 'shipped' WHERE id IN (SELECT id FROM recent_ids);
    -- housekeeping
    DELETE FROM sessions WHERE expires < NOW();
    CREATE TABLE IF NOT EXISTS logs (id BIGINT AUTO_INCREMENT PRIMARY KEY, msg TEXT, KEY idx_msg (msg(32)))
      ENGINE = InnoDB DEFAULT CHARSET = utf8mb4;
    ALTER TABLE logs ADD COLUMN level INT DEFAULT 0 AFTER id, DROP INDEX idx_msg;
    GRANT SELECT, INSERT ON shop.* TO 'app'@'%';
    SET @@session.sql_mode = 'ANSI', @n = 1;
    BEGIN; COMMIT;
    EXPLAIN SELECT * FROM t1 UNION ALL SELECT * FROM t2;
";

#[test]
fn test_mixed_batch_parses() {
    let result = parse(BATCH);
    assert!(result.is_ok(), "{:?}", result.errors());

    let kinds: Vec<NodeKind> = result.statements().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::SelectStmt,
            NodeKind::InsertStmt,
            NodeKind::UpdateStmt,
            NodeKind::DeleteStmt,
            NodeKind::CreateTableStmt,
            NodeKind::AlterTableStmt,
            NodeKind::GrantStmt,
            NodeKind::SetStmt,
            NodeKind::BeginStmt,
            NodeKind::CommitStmt,
            NodeKind::ExplainStmt,
        ]
    );
}

#[test]
fn test_tree_tokens_round_trip_lexer_tokens() {
    let config = ParserConfig::default();
    let result = parse_with(BATCH.as_bytes(), &config);

    assert_eq!(tree_texts(&result), lexed_texts(BATCH, &config));
    assert!(result
        .tree()
        .root()
        .descendant_tokens()
        .iter()
        .all(|token| token.binding() != Binding::Unbound));
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse(BATCH);
    let second = parse(BATCH);

    assert_eq!(first.tree().dump(), second.tree().dump());
    assert_eq!(first.tree().to_json().unwrap(), second.tree().to_json().unwrap());
}

#[test]
fn test_batch_resilience() {
    let sql = "SELECT 1; SELEC 2; SELECT 3;";
    let result = parse(sql);

    assert_eq!(result.statements().count(), 2);
    assert_eq!(result.errors().len(), 1);

    let error = &result.errors()[0];
    assert_eq!(error.found(), Some("SELEC"));
    assert_eq!(&sql[error.get_span().start..error.get_span().end], "SELEC");

    let texts: Vec<String> = result.statements().map(|node| node.text()).collect();
    assert_eq!(texts, vec!["SELECT 1", "SELECT 3"]);
}

#[test]
fn test_errors_are_ordered_by_position() {
    let result = parse("SELECT FROM; SELECT 'open; SELECT 1 +;");
    let starts: Vec<usize> = result.errors().iter().map(|error| error.get_span().start).collect();

    assert!(!starts.is_empty());
    assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_lexical_error_is_reported_once() {
    let result = parse("SELECT 'unterminated");

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].kind(), &ErrorImpl::UnterminatedString);
    assert!(result.errors()[0].is_lexical());
    assert_eq!(result.statements().count(), 0);
}

#[test]
fn test_invalid_encoding_is_reported() {
    let input = b"SELECT '\xff\xfe' FROM t";
    let result = parse_with(input, &ParserConfig::default());

    assert!(result
        .errors()
        .iter()
        .any(|error| matches!(error.kind(), ErrorImpl::InvalidEncoding { .. })));
}

#[test]
fn test_latin1_input_accepts_high_bytes() {
    let input = b"SELECT 'caf\xe9' FROM t";
    let config = ParserConfig::default().with_charset(Charset::Latin1);

    assert!(parse_with(input, &config).is_ok());
}

#[test]
fn test_multiplication_nests_in_addition() {
    let result = parse("SELECT 1 + 2 * 3");
    let sum = find(result.tree().root(), NodeKind::BinaryExpr).unwrap();

    assert_eq!(sum.tokens().next().map(|token| token.text()), Some("+"));
    let right = sum.nth_child_node(1).unwrap();
    assert_eq!(right.kind(), NodeKind::BinaryExpr);
    assert_eq!(right.text(), "2 * 3");
}

#[test]
fn test_unreserved_keyword_as_name_and_keyword() {
    let result = parse("SELECT timestamp FROM t WHERE timestamp > TIMESTAMP '2024-01-01 00:00:00'");
    assert!(result.is_ok(), "{:?}", result.errors());

    let bindings: Vec<Binding> = result
        .tree()
        .root()
        .descendant_tokens()
        .iter()
        .filter(|token| token.text().eq_ignore_ascii_case("timestamp"))
        .map(|token| token.binding())
        .collect();
    assert_eq!(
        bindings,
        vec![Binding::Identifier, Binding::Identifier, Binding::Keyword]
    );
    assert!(find(result.tree().root(), NodeKind::TemporalLiteral).is_some());
}

#[test]
fn test_create_table_elements_keep_order() {
    let result = parse("CREATE TABLE t (a INT, b INT, c INT)");
    let elements = find(result.tree().root(), NodeKind::TableElementList).unwrap();

    let names: Vec<String> = elements
        .child_contexts::<ColumnDefContext>()
        .filter_map(|column| column.name())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[rstest]
#[case(SqlMode::default(), "||")]
#[case(SqlMode::ansi(), "AND")]
fn test_pipes_follow_sql_mode(#[case] mode: SqlMode, #[case] top_operator: &str) {
    let config = ParserConfig::default().with_sql_mode(mode);
    let result = parse_with(b"SELECT a || b AND c", &config);
    assert!(result.is_ok());

    let top = find(result.tree().root(), NodeKind::BinaryExpr).unwrap();
    assert_eq!(top.tokens().next().map(|token| token.text()), Some(top_operator));
}

#[rstest]
#[case(SqlMode::default(), NodeKind::StringLiteral)]
#[case(SqlMode::ansi(), NodeKind::ColumnRef)]
fn test_double_quotes_follow_ansi_quotes(#[case] mode: SqlMode, #[case] expected: NodeKind) {
    let config = ParserConfig::default().with_sql_mode(mode);
    let result = parse_with(b"SELECT \"x\" FROM t", &config);
    assert!(result.is_ok());

    let field = find(result.tree().root(), NodeKind::SelectField).unwrap();
    assert_eq!(field.first_child_node().map(|node| node.kind()), Some(expected));
}

#[test]
fn test_config_from_json_drives_parse() {
    let config = ParserConfig::from_json(r#"{"sql_mode": {"ansi_quotes": true}, "max_depth": 8}"#)
        .unwrap();
    assert_eq!(config.charset, Charset::Utf8mb4);

    let result = parse_with(b"SELECT ((((((((((1))))))))))", &config);
    assert!(matches!(
        result.errors()[0].kind(),
        ErrorImpl::NestingTooDeep { limit: 8 }
    ));
}

#[test]
fn test_deep_nesting_is_rejected_without_overflow() {
    let sql = format!("SELECT {}1{}", "(".repeat(5000), ")".repeat(5000));

    let handle = thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(move || {
            let result = parse(&sql);
            result.errors().iter().map(|error| error.kind().clone()).collect::<Vec<_>>()
        })
        .unwrap();
    let errors = handle.join().unwrap();

    assert_eq!(errors, vec![ErrorImpl::NestingTooDeep { limit: 256 }]);
}

#[test]
fn test_render_caret_for_every_error() {
    let source = "SELECT 1;\nSELECT a FORM t;\nDROP;";
    let result = parse(source);
    assert_eq!(result.errors().len(), 2);

    let rendered: Vec<String> = result
        .errors()
        .iter()
        .map(|error| render_caret(source, error))
        .collect();
    assert!(rendered[0].contains("2 | SELECT a FORM t;"));
    assert!(rendered[1].contains("3 | DROP;"));
}

#[test]
fn test_parse_result_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseResult>();
    assert_send_sync::<ParserConfig>();

    let result = parse(BATCH);
    let dump = result.tree().dump();
    let from_thread = thread::scope(|scope| {
        scope
            .spawn(|| result.tree().dump())
            .join()
            .unwrap()
    });
    assert_eq!(dump, from_thread);
}

#[derive(Default)]
struct Counter {
    entered: HashMap<NodeKind, usize>,
    exited: HashMap<NodeKind, usize>,
    depth: usize,
    max_depth: usize,
    terminals: usize,
}

impl Listener for Counter {
    fn enter_every_rule(&mut self, node: NodeRef<'_>) {
        *self.entered.entry(node.kind()).or_default() += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn exit_every_rule(&mut self, node: NodeRef<'_>) {
        *self.exited.entry(node.kind()).or_default() += 1;
        self.depth -= 1;
    }

    fn visit_terminal(&mut self, _token: TokenRef<'_>) {
        self.terminals += 1;
    }
}

#[test]
fn test_walker_enters_and_exits_every_node_once() {
    let result = parse(BATCH);
    let mut counter = Counter::default();
    result.tree().walk(&mut counter);

    assert_eq!(counter.entered, counter.exited);
    assert_eq!(counter.depth, 0);
    assert_eq!(
        counter.entered.values().sum::<usize>(),
        result.tree().node_count()
    );
    assert_eq!(counter.terminals, result.tree().root().descendant_tokens().len());
}

#[test]
fn test_walker_handles_deep_trees() {
    let sql = format!("SELECT {}", vec!["-1"; 1500].join(" + "));
    let result = parse(&sql);
    assert!(result.is_ok());

    let mut counter = Counter::default();
    result.tree().walk(&mut counter);
    assert!(counter.max_depth > 1000);
}

#[test]
fn test_renderings_handle_deep_trees() {
    let sql = format!("SELECT 1{}", " + 1".repeat(50_000));
    let result = parse(&sql);
    assert!(result.is_ok());

    let tree = result.tree();
    let mut counter = Counter::default();
    tree.walk(&mut counter);
    let nodes: usize = counter.entered.values().sum();
    let tokens = counter.terminals;
    assert!(nodes > 100_000);

    let dump = tree.dump();
    assert_eq!(dump.lines().count(), nodes + tokens);

    let statement = tree.statements().next().unwrap();
    let sexp = statement.to_sexp();
    assert!(sexp.starts_with("(SelectStmt"));
    assert_eq!(sexp.matches('(').count(), sexp.matches(')').count());

    let json = tree.to_json().unwrap();
    assert_eq!(json.matches("\"kind\"").count(), nodes);
    assert_eq!(json.matches("\"binding\"").count(), tokens);
    assert!(json.ends_with("]}"));
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_map(|suffix| format!("c_{}", suffix))
}

fn expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        name(),
        (0u32..10_000).prop_map(|n| n.to_string()),
        "[a-z ]{0,8}".prop_map(|text| format!("'{}'", text)),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "=", "<>", "AND", "OR"]), inner.clone())
                .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
            inner.clone().prop_map(|inner| format!("({})", inner)),
            inner.clone().prop_map(|inner| format!("NOT {}", inner)),
            (name(), prop::collection::vec(inner, 1..3))
                .prop_map(|(function, args)| format!("{}({})", function, args.join(", "))),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (expr(), name(), expr()).prop_map(|(field, table, filter)| format!(
            "SELECT {} FROM {} WHERE {}",
            field, table, filter
        )),
        (name(), name(), expr()).prop_map(|(table, column, value)| format!(
            "UPDATE {} SET {} = {}",
            table, column, value
        )),
        (name(), prop::collection::vec(expr(), 1..4)).prop_map(|(table, values)| format!(
            "INSERT INTO {} VALUES ({})",
            table,
            values.join(", ")
        )),
        (name(), expr()).prop_map(|(table, filter)| format!("DELETE FROM {} WHERE {}", table, filter)),
    ]
}

proptest! {
    #[test]
    fn prop_generated_statements_parse_and_round_trip(statements in prop::collection::vec(statement(), 1..4)) {
        let sql = statements.join(";\n");
        let config = ParserConfig::default();
        let result = parse_with(sql.as_bytes(), &config);

        prop_assert!(result.is_ok(), "{}: {:?}", sql, result.errors());
        prop_assert_eq!(result.statements().count(), statements.len());
        prop_assert_eq!(tree_texts(&result), lexed_texts(&sql, &config));
    }

    #[test]
    fn prop_parse_is_deterministic(sql in "[ -~\n]{0,80}") {
        let first = parse(&sql);
        let second = parse(&sql);

        prop_assert_eq!(first.tree().dump(), second.tree().dump());
        prop_assert_eq!(first.errors(), second.errors());
    }

    #[test]
    fn prop_statement_spans_stay_inside_input(sql in "[ -~\n]{0,80}") {
        let result = parse(&sql);

        for statement in result.statements() {
            prop_assert!(statement.span().end <= sql.len());
        }
        for error in result.errors() {
            prop_assert!(error.get_span().start <= sql.len());
        }
    }

    #[test]
    fn prop_good_statements_survive_a_bad_neighbour(statement in statement(), garbage in "[a-z]{1,6} [a-z]{1,6}") {
        let sql = format!("{}; SELEC {}; {}", statement, garbage, statement);
        let result = parse(&sql);

        prop_assert_eq!(result.statements().count(), 2);
        prop_assert_eq!(result.errors().len(), 1);
    }
}
