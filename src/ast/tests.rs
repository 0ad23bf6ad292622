//! Unit tests for the ast module.
//!
//! This module contains tests for the parse tree and its views:
//! - Typed context accessors
//! - Listener traversal order
//! - Tree renderings
//! - Token bindings

use rstest::rstest;

use crate::{
    parse,
    parser::{
        hints::{parse_hints, HintItem},
        json::{parse_json_path, ArrayIndex, JsonPathLeg},
    },
};

use super::{
    ast::{Binding, ChildRef, NodeRef, RuleContext, TokenRef, Tree},
    kinds::*,
    walker::ParseTreeWalker,
};

fn find(node: NodeRef<'_>, kind: NodeKind) -> Option<NodeRef<'_>> {
    if node.kind() == kind {
        return Some(node);
    }
    node.child_nodes().find_map(|child| find(child, kind))
}

fn collect<'t, C: RuleContext<'t>>(node: NodeRef<'t>, out: &mut Vec<C>) {
    out.extend(node.cast::<C>());
    for child in node.child_nodes() {
        collect(child, out);
    }
}

fn parsed(sql: &str) -> Tree {
    let result = parse(sql);
    assert!(result.is_ok(), "{:?}", result.errors());
    result.into_result().unwrap()
}

#[rstest]
#[case("SELECT * FROM t", None, "t")]
#[case("SELECT * FROM shop.orders", Some("shop"), "orders")]
#[case("SELECT * FROM `my db`.`order`", Some("my db"), "order")]
#[case("SELECT * FROM status", None, "status")]
fn test_table_name_parts(#[case] sql: &str, #[case] schema: Option<&str>, #[case] name: &str) {
    let tree = parsed(sql);
    let table = find(tree.root(), NodeKind::TableName)
        .and_then(|node| node.cast::<TableNameContext>())
        .unwrap();

    assert_eq!(table.schema().as_deref(), schema);
    assert_eq!(table.name().as_deref(), Some(name));
}

#[test]
fn test_column_ref_parts() {
    let tree = parsed("SELECT shop.orders.id, o.total, qty FROM shop.orders o");
    let mut columns: Vec<ColumnRefContext> = vec![];
    collect(tree.root(), &mut columns);

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].parts(), vec!["shop", "orders", "id"]);
    assert_eq!(columns[0].table().as_deref(), Some("orders"));
    assert_eq!(columns[1].column().as_deref(), Some("total"));
    assert_eq!(columns[1].table().as_deref(), Some("o"));
    assert_eq!(columns[2].table(), None);
}

#[test]
fn test_string_literal_value_and_charset() {
    let tree = parsed(r"SELECT _latin1'it''s' ' a\tb'");
    let literal = find(tree.root(), NodeKind::StringLiteral)
        .and_then(|node| node.cast::<StringLiteralContext>())
        .unwrap();

    assert_eq!(literal.charset(), Some("latin1"));
    assert_eq!(literal.value(), "it's a\tb");
}

#[test]
fn test_select_field_parts() {
    let tree = parsed("SELECT a + 1 AS total FROM t");
    let field = find(tree.root(), NodeKind::SelectField)
        .and_then(|node| node.cast::<SelectFieldContext>())
        .unwrap();

    assert_eq!(field.expr().map(|expr| expr.kind()), Some(NodeKind::BinaryExpr));
    assert_eq!(
        field.alias().and_then(|alias| alias.name()).as_deref(),
        Some("total")
    );

    let binary = field.expr().and_then(|expr| expr.cast::<BinaryExprContext>()).unwrap();
    assert_eq!(binary.left().map(|node| node.kind()), Some(NodeKind::ColumnRef));
    assert_eq!(binary.operator().map(|token| token.text()), Some("+"));
    assert_eq!(binary.right().map(|node| node.kind()), Some(NodeKind::NumericLiteral));
}

#[test]
fn test_query_spec_clauses() {
    let tree = parsed("SELECT /*+ MAX_EXECUTION_TIME(1000) */ a FROM t WHERE a > 1");
    let query = find(tree.root(), NodeKind::QuerySpec)
        .and_then(|node| node.cast::<QuerySpecContext>())
        .unwrap();

    assert!(query.fields().is_some());
    assert!(query.from_clause().is_some());
    assert!(query.where_clause().is_some());

    let hints = query.hint_clause().map(|clause| clause.hints()).unwrap_or_default();
    assert_eq!(
        hints,
        vec![HintItem {
            name: String::from("MAX_EXECUTION_TIME"),
            query_block: None,
            args: vec![String::from("1000")],
        }]
    );
}

#[test]
fn test_create_table_accessors() {
    let tree = parsed(
        "CREATE TABLE IF NOT EXISTS shop.items (id BIGINT NOT NULL, name VARCHAR(64), PRIMARY KEY (id)) \
         ENGINE = InnoDB PARTITION BY HASH (id) PARTITIONS 4",
    );
    let create = find(tree.root(), NodeKind::CreateTableStmt)
        .and_then(|node| node.cast::<CreateTableStmtContext>())
        .unwrap();

    assert!(create.if_not_exists());
    let table = create.table_name().unwrap();
    assert_eq!(table.schema().as_deref(), Some("shop"));
    assert_eq!(table.name().as_deref(), Some("items"));
    assert!(create.like_clause().is_none());
    assert!(create.options().is_some());
    assert!(create.partition_options().is_some());

    let elements = create.elements().unwrap();
    let columns: Vec<ColumnDefContext> = elements.columns().collect();
    assert_eq!(columns.len(), 2);
    assert_eq!(elements.constraints().count(), 1);

    assert_eq!(columns[0].name().as_deref(), Some("id"));
    assert_eq!(columns[0].options().count(), 1);
    let varchar = columns[1].data_type().unwrap();
    assert_eq!(varchar.type_name(), Some("VARCHAR"));
    assert!(varchar.length().is_some());
}

#[test]
fn test_create_table_without_if_not_exists() {
    let tree = parsed("CREATE TABLE t LIKE s");
    let create = find(tree.root(), NodeKind::CreateTableStmt)
        .and_then(|node| node.cast::<CreateTableStmtContext>())
        .unwrap();

    assert!(!create.if_not_exists());
    assert!(create.like_clause().is_some());
    assert!(create.elements().is_none());
}

#[test]
fn test_json_path_context() {
    let tree = parsed("SELECT doc->'$.items[last-1].\"sku id\"' FROM t");
    let path = find(tree.root(), NodeKind::JsonPath)
        .and_then(|node| node.cast::<JsonPathContext>())
        .unwrap();

    assert_eq!(path.path().as_deref(), Some("$.items[last-1].\"sku id\""));
    assert_eq!(
        path.legs(),
        vec![
            JsonPathLeg::Member(String::from("items")),
            JsonPathLeg::Index(ArrayIndex::Last(1)),
            JsonPathLeg::Member(String::from("sku id")),
        ]
    );
}

#[rstest]
#[case("$", vec![])]
#[case("$.*", vec![JsonPathLeg::MemberWildcard])]
#[case("$[*]", vec![JsonPathLeg::IndexWildcard])]
#[case("$[0 to last]", vec![JsonPathLeg::Range(ArrayIndex::Index(0), ArrayIndex::Last(0))])]
#[case("$**.a", vec![JsonPathLeg::DoubleWildcard, JsonPathLeg::Member(String::from("a"))])]
fn test_json_path_legs(#[case] path: &str, #[case] legs: Vec<JsonPathLeg>) {
    assert_eq!(parse_json_path(path), Ok(legs));
}

#[rstest]
#[case("a.b")]
#[case("$.")]
#[case("$.1a")]
#[case("$[x]")]
#[case("$[1")]
#[case("$**")]
fn test_json_path_rejects_malformed(#[case] path: &str) {
    assert!(parse_json_path(path).is_err());
}

#[test]
fn test_hints_with_query_block_and_trailing_garbage() {
    let hints = parse_hints("/*+ HASH_JOIN(@sel_1 t1, t2) use_index(t idx) NO_INDEX_MERGE( */");

    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0].name, "HASH_JOIN");
    assert_eq!(hints[0].query_block.as_deref(), Some("sel_1"));
    assert_eq!(hints[0].args, vec!["t1", "t2"]);
    assert_eq!(hints[1].name, "USE_INDEX");
    assert_eq!(hints[1].args, vec!["t", "idx"]);
}

#[derive(Default)]
struct EventRecorder {
    events: Vec<String>,
}

impl Listener for EventRecorder {
    fn enter_every_rule(&mut self, node: NodeRef<'_>) {
        self.events.push(format!("enter {}", node.kind()));
    }

    fn exit_every_rule(&mut self, node: NodeRef<'_>) {
        self.events.push(format!("exit {}", node.kind()));
    }

    fn visit_terminal(&mut self, token: TokenRef<'_>) {
        self.events.push(format!("token {}", token.text()));
    }

    fn enter_binary_expr(&mut self, ctx: BinaryExprContext<'_>) {
        let operator = ctx.operator().map(|token| token.text()).unwrap_or_default();
        self.events.push(format!("enter_binary_expr {}", operator));
    }

    fn exit_binary_expr(&mut self, _ctx: BinaryExprContext<'_>) {
        self.events.push(String::from("exit_binary_expr"));
    }
}

fn expected_events(node: NodeRef<'_>, out: &mut Vec<String>) {
    out.push(format!("enter {}", node.kind()));
    for child in node.children() {
        match child {
            ChildRef::Node(child) => expected_events(child, out),
            ChildRef::Token(token) => out.push(format!("token {}", token.text())),
        }
    }
    out.push(format!("exit {}", node.kind()));
}

#[test]
fn test_walker_visits_depth_first() {
    let tree = parsed("SELECT a + b FROM t; DELETE FROM t WHERE a = 1");

    let mut recorder = EventRecorder::default();
    tree.walk(&mut recorder);

    let generic: Vec<String> = recorder
        .events
        .iter()
        .filter(|event| !event.contains("binary_expr"))
        .cloned()
        .collect();
    let mut expected = vec![];
    expected_events(tree.root(), &mut expected);
    assert_eq!(generic, expected);
}

#[test]
fn test_walker_calls_kind_callbacks_inside_generic_ones() {
    let tree = parsed("SELECT a + b");

    let mut recorder = EventRecorder::default();
    ParseTreeWalker::walk(&mut recorder, tree.root());

    let events = &recorder.events;
    let enter = events.iter().position(|event| event == "enter_binary_expr +").unwrap();
    assert_eq!(events[enter - 1], "enter BinaryExpr");
    assert_eq!(events[enter + 1], "enter ColumnRef");

    let exit = events.iter().position(|event| event == "exit_binary_expr").unwrap();
    assert_eq!(events[exit - 1], "exit ColumnRef");
    assert_eq!(events[exit + 1], "exit BinaryExpr");
}

#[test]
fn test_walker_on_subtree() {
    struct Columns(Vec<String>);

    impl Listener for Columns {
        fn enter_column_ref(&mut self, ctx: ColumnRefContext<'_>) {
            self.0.extend(ctx.column());
        }
    }

    let tree = parsed("SELECT a FROM t WHERE b = c");
    let where_clause = find(tree.root(), NodeKind::WhereClause).unwrap();

    let mut columns = Columns(vec![]);
    ParseTreeWalker::walk(&mut columns, where_clause);
    assert_eq!(columns.0, vec!["b", "c"]);
}

#[test]
fn test_token_bindings() {
    let tree = parsed("SELECT status FROM t");
    let bindings: Vec<(&str, Binding)> = tree
        .root()
        .descendant_tokens()
        .iter()
        .map(|token| (token.text(), token.binding()))
        .collect();

    assert_eq!(
        bindings,
        vec![
            ("SELECT", Binding::Keyword),
            ("status", Binding::Identifier),
            ("FROM", Binding::Keyword),
            ("t", Binding::Identifier),
        ]
    );
}

#[test]
fn test_token_texts_cover_statement() {
    let tree = parsed("SELECT a, `b c` FROM t WHERE x IN (1, 2)");
    let statement = tree.statements().next().unwrap();

    assert_eq!(
        statement.token_texts(),
        vec!["SELECT", "a", ",", "`b c`", "FROM", "t", "WHERE", "x", "IN", "(", "1", ",", "2", ")"]
    );
    assert_eq!(statement.text(), "SELECT a , `b c` FROM t WHERE x IN ( 1 , 2 )");
}

#[test]
fn test_dump_indents_children() {
    let tree = parsed("SELECT 1");
    let dump = tree.dump();
    let lines: Vec<&str> = dump.lines().collect();

    assert!(lines[0].starts_with("StatementList "));
    assert!(lines[1].starts_with("  SelectStmt 0..8"));
    assert!(dump.contains("Integer \"1\""));
}

#[test]
fn test_to_json_mirrors_tree() {
    let tree = parsed("SELECT 1");
    let json: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();

    assert_eq!(json["kind"], "StatementList");
    let statement = &json["children"][0];
    assert_eq!(statement["kind"], "SelectStmt");
    assert_eq!(statement["span"]["start"], 0);
    assert_eq!(statement["span"]["end"], 8);
}

#[test]
fn test_node_spans_cover_children() {
    let tree = parsed("SELECT a FROM t WHERE a BETWEEN 1 AND 10");
    let mut stack = vec![tree.statements().next().unwrap()];

    while let Some(node) = stack.pop() {
        for child in node.children() {
            let span = child.span();
            assert!(node.span().start <= span.start && span.end <= node.span().end);
        }
        stack.extend(node.child_nodes());
    }
}

#[test]
fn test_node_kind_names_are_unique() {
    let mut names: Vec<&str> = NodeKind::ALL.iter().map(|kind| kind.name()).collect();
    let total = names.len();
    names.sort();
    names.dedup();

    assert_eq!(names.len(), total);
    assert_eq!(NodeKind::StatementList.to_string(), "StatementList");
}

#[test]
fn test_cast_checks_kind() {
    let tree = parsed("SELECT 1");
    let statement = tree.statements().next().unwrap();

    assert!(statement.cast::<SelectStmtContext>().is_some());
    assert!(statement.cast::<DeleteStmtContext>().is_none());
    assert_eq!(SelectStmtContext::KIND, NodeKind::SelectStmt);
}
