//! Unit tests for the parser module.
//!
//! This module contains tests for parsing SQL batches including:
//! - Statement dispatch for every statement family
//! - Expression precedence and SQL mode effects
//! - Query structure, set operations, subqueries and aliases
//! - Data definition elements, ALTER specifications and partitions
//! - Ambiguity resolution between similar looking forms
//! - Batch recovery and error reporting

use rstest::rstest;

use crate::{
    ast::{
        ast::{Binding, NodeRef, RuleContext, TokenId},
        kinds::{NodeKind, PartitionDefinitionListContext, SelectFieldContext, UserIdentityContext},
    },
    config::config::{ParserConfig, SqlMode},
    errors::errors::ErrorImpl,
    lexer::keywords::Keyword,
    parse, parse_with,
    parser::parser::ParseResult,
};

fn parse_ok(sql: &str) -> ParseResult {
    let result = parse(sql);
    assert!(result.is_ok(), "{:?} failed: {:?}", sql, result.errors());
    result
}

fn parse_in(sql: &str, sql_mode: SqlMode) -> ParseResult {
    parse_with(sql.as_bytes(), &ParserConfig::default().with_sql_mode(sql_mode))
}

fn first_statement(result: &ParseResult) -> NodeRef<'_> {
    result.statements().next().expect("no statement parsed")
}

/// First node of `kind` in pre-order.
fn find<'t>(node: NodeRef<'t>, kind: NodeKind) -> Option<NodeRef<'t>> {
    if node.kind() == kind {
        return Some(node);
    }
    node.child_nodes().find_map(|child| find(child, kind))
}

fn count(node: NodeRef<'_>, kind: NodeKind) -> usize {
    let own = usize::from(node.kind() == kind);
    own + node.child_nodes().map(|child| count(child, kind)).sum::<usize>()
}

fn expr_sexp(sql: &str, sql_mode: SqlMode) -> String {
    let result = parse_in(sql, sql_mode);
    assert!(result.is_ok(), "{:?}", result.errors());
    let field = find(result.tree().root(), NodeKind::SelectField).expect("no select field");
    field.first_child_node().expect("empty field").to_sexp()
}

#[rstest]
#[case("SELECT 1", NodeKind::SelectStmt)]
#[case("(SELECT 1)", NodeKind::SelectStmt)]
#[case("TABLE t", NodeKind::SelectStmt)]
#[case("VALUES ROW(1, 2), ROW(3, 4)", NodeKind::SelectStmt)]
#[case("WITH c AS (SELECT 1) SELECT * FROM c", NodeKind::SelectStmt)]
#[case("WITH c AS (SELECT 1) UPDATE t SET a = 1", NodeKind::UpdateStmt)]
#[case("WITH c AS (SELECT 1) DELETE FROM t", NodeKind::DeleteStmt)]
#[case("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)", NodeKind::InsertStmt)]
#[case("REPLACE INTO t VALUES (1)", NodeKind::ReplaceStmt)]
#[case("UPDATE t SET a = a + 1 WHERE id = 1", NodeKind::UpdateStmt)]
#[case("DELETE FROM t WHERE id = 1 LIMIT 10", NodeKind::DeleteStmt)]
#[case("LOAD DATA INFILE 'rows.csv' INTO TABLE t", NodeKind::LoadDataStmt)]
#[case("CALL p(1, 'x')", NodeKind::CallStmt)]
#[case("DO 1 + 1", NodeKind::DoStmt)]
#[case("CREATE DATABASE IF NOT EXISTS d", NodeKind::CreateDatabaseStmt)]
#[case("ALTER DATABASE d DEFAULT CHARACTER SET utf8mb4", NodeKind::AlterDatabaseStmt)]
#[case("DROP SCHEMA d", NodeKind::DropDatabaseStmt)]
#[case("CREATE TABLE t (a INT)", NodeKind::CreateTableStmt)]
#[case("ALTER TABLE t ADD COLUMN b INT", NodeKind::AlterTableStmt)]
#[case("DROP TABLE IF EXISTS t1, t2", NodeKind::DropTableStmt)]
#[case("TRUNCATE TABLE t", NodeKind::TruncateTableStmt)]
#[case("RENAME TABLE a TO b, c TO d", NodeKind::RenameTableStmt)]
#[case("CREATE UNIQUE INDEX i ON t (a, b DESC)", NodeKind::CreateIndexStmt)]
#[case("DROP INDEX i ON t", NodeKind::DropIndexStmt)]
#[case("CREATE OR REPLACE VIEW v AS SELECT 1", NodeKind::CreateViewStmt)]
#[case("DROP VIEW IF EXISTS v", NodeKind::DropViewStmt)]
#[case("CREATE SEQUENCE s START WITH 1 INCREMENT BY 2", NodeKind::CreateSequenceStmt)]
#[case("DROP SEQUENCE s", NodeKind::DropSequenceStmt)]
#[case("FLASHBACK TABLE t TO t2", NodeKind::FlashbackTableStmt)]
#[case("FLASHBACK CLUSTER TO TIMESTAMP '2024-01-01 00:00:00'", NodeKind::FlashbackClusterStmt)]
#[case("RECOVER TABLE BY JOB 42", NodeKind::RecoverTableStmt)]
#[case("BEGIN", NodeKind::BeginStmt)]
#[case("BEGIN PESSIMISTIC", NodeKind::BeginStmt)]
#[case("START TRANSACTION READ ONLY", NodeKind::BeginStmt)]
#[case("COMMIT", NodeKind::CommitStmt)]
#[case("ROLLBACK TO SAVEPOINT s", NodeKind::RollbackStmt)]
#[case("SAVEPOINT s", NodeKind::SavepointStmt)]
#[case("RELEASE SAVEPOINT s", NodeKind::ReleaseSavepointStmt)]
#[case("SET TRANSACTION ISOLATION LEVEL READ COMMITTED", NodeKind::SetTransactionStmt)]
#[case("SET GLOBAL TRANSACTION READ ONLY", NodeKind::SetTransactionStmt)]
#[case("CREATE USER 'u'@'%' IDENTIFIED BY 'secret'", NodeKind::CreateUserStmt)]
#[case("ALTER USER 'u' ACCOUNT LOCK", NodeKind::AlterUserStmt)]
#[case("DROP USER IF EXISTS 'u'@'%'", NodeKind::DropUserStmt)]
#[case("CREATE ROLE r1, r2", NodeKind::CreateRoleStmt)]
#[case("DROP ROLE r1", NodeKind::DropRoleStmt)]
#[case("GRANT SELECT, INSERT ON db.* TO 'u'@'%'", NodeKind::GrantStmt)]
#[case("GRANT r1 TO 'u'@'%'", NodeKind::GrantRoleStmt)]
#[case("REVOKE ALL PRIVILEGES ON *.* FROM 'u'", NodeKind::RevokeStmt)]
#[case("REVOKE r1 FROM 'u'", NodeKind::RevokeRoleStmt)]
#[case("SET PASSWORD = 'secret'", NodeKind::SetPasswordStmt)]
#[case("SET ROLE ALL", NodeKind::SetRoleStmt)]
#[case("SET DEFAULT ROLE r1 TO 'u'", NodeKind::SetDefaultRoleStmt)]
#[case("USE d", NodeKind::UseStmt)]
#[case("SET @a = 1, SESSION sql_mode = ''", NodeKind::SetStmt)]
#[case("SHOW FULL TABLES FROM d LIKE 't%'", NodeKind::ShowStmt)]
#[case("EXPLAIN SELECT 1", NodeKind::ExplainStmt)]
#[case("DESCRIBE t", NodeKind::DescribeStmt)]
#[case("ANALYZE TABLE t WITH 10 BUCKETS", NodeKind::AnalyzeTableStmt)]
#[case("KILL TIDB QUERY 12", NodeKind::KillStmt)]
#[case("FLUSH PRIVILEGES", NodeKind::FlushStmt)]
#[case("PREPARE s FROM 'SELECT ?'", NodeKind::PrepareStmt)]
#[case("EXECUTE s USING @a, @b", NodeKind::ExecuteStmt)]
#[case("DEALLOCATE PREPARE s", NodeKind::DeallocateStmt)]
#[case("DROP PREPARE s", NodeKind::DeallocateStmt)]
#[case("LOCK TABLES t READ, u AS x WRITE", NodeKind::LockTablesStmt)]
#[case("UNLOCK TABLES", NodeKind::UnlockTablesStmt)]
#[case("ADMIN SHOW DDL JOBS 10", NodeKind::AdminStmt)]
#[case("ADMIN CHECK TABLE t1, t2", NodeKind::AdminStmt)]
#[case("ADMIN CANCEL DDL JOBS 1, 2", NodeKind::AdminStmt)]
#[case("SPLIT TABLE t BETWEEN (0) AND (100) REGIONS 10", NodeKind::SplitRegionStmt)]
#[case("BACKUP DATABASE * TO 'local:///tmp/backup'", NodeKind::BackupStmt)]
#[case("RESTORE TABLE d.t FROM 'local:///tmp/backup'", NodeKind::RestoreStmt)]
fn test_statement_dispatch(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    assert_eq!(first_statement(&result).kind(), expected);
}

#[test]
fn test_statement_list_keeps_input_order() {
    let result = parse_ok("USE d; SELECT 1; COMMIT");
    let kinds: Vec<NodeKind> = result.statements().map(|statement| statement.kind()).collect();

    assert_eq!(result.tree().root().kind(), NodeKind::StatementList);
    assert_eq!(
        kinds,
        vec![NodeKind::UseStmt, NodeKind::SelectStmt, NodeKind::CommitStmt]
    );
}

#[test]
fn test_empty_statements_are_skipped() {
    let result = parse_ok(";; SELECT 1;;");
    assert_eq!(result.statements().count(), 1);
}

#[rstest]
#[case("SELECT 1 + 2 * 3", "(BinaryExpr (NumericLiteral 1) + (BinaryExpr (NumericLiteral 2) * (NumericLiteral 3)))")]
#[case("SELECT 1 - 2 - 3", "(BinaryExpr (BinaryExpr (NumericLiteral 1) - (NumericLiteral 2)) - (NumericLiteral 3))")]
#[case("SELECT a OR b AND c", "(BinaryExpr (ColumnRef a) OR (BinaryExpr (ColumnRef b) AND (ColumnRef c)))")]
#[case("SELECT NOT a = b", "(UnaryExpr NOT (BinaryExpr (ColumnRef a) = (ColumnRef b)))")]
#[case("SELECT -a * b", "(BinaryExpr (UnaryExpr - (ColumnRef a)) * (ColumnRef b))")]
#[case("SELECT a = 1 AND b BETWEEN 1 AND 2", "(BinaryExpr (BinaryExpr (ColumnRef a) = (NumericLiteral 1)) AND (BetweenExpr (ColumnRef b) BETWEEN (NumericLiteral 1) AND (NumericLiteral 2)))")]
#[case("SELECT a NOT IN (1, 2)", "(InExpr (ColumnRef a) NOT IN ( (ExprList (NumericLiteral 1) , (NumericLiteral 2)) ))")]
#[case("SELECT a IS NOT NULL", "(IsExpr (ColumnRef a) IS NOT NULL)")]
#[case("SELECT 1 || 2 AND 3", "(BinaryExpr (NumericLiteral 1) || (BinaryExpr (NumericLiteral 2) AND (NumericLiteral 3)))")]
fn test_expression_precedence(#[case] sql: &str, #[case] expected: &str) {
    assert_eq!(expr_sexp(sql, SqlMode::default()), expected);
}

#[test]
fn test_pipes_as_concat_binds_tighter_than_and() {
    let mode = SqlMode {
        pipes_as_concat: true,
        ..SqlMode::default()
    };
    assert_eq!(
        expr_sexp("SELECT 1 || 2 AND 3", mode),
        "(BinaryExpr (BinaryExpr (NumericLiteral 1) || (NumericLiteral 2)) AND (NumericLiteral 3))"
    );
}

#[test]
fn test_high_not_precedence_binds_to_operand() {
    let mode = SqlMode {
        high_not_precedence: true,
        ..SqlMode::default()
    };
    assert_eq!(
        expr_sexp("SELECT NOT a = b", mode),
        "(BinaryExpr (UnaryExpr NOT (ColumnRef a)) = (ColumnRef b))"
    );
}

#[test]
fn test_intersect_binds_tighter_than_union() {
    let result = parse_ok("SELECT 1 UNION SELECT 2 INTERSECT SELECT 3");
    let statement = first_statement(&result);
    let outer = statement.first_child_node().unwrap();

    assert_eq!(outer.kind(), NodeKind::SetOprExpr);
    assert_eq!(outer.nth_child_node(0).unwrap().kind(), NodeKind::QuerySpec);
    let inner = outer.nth_child_node(1).unwrap();
    assert_eq!(inner.kind(), NodeKind::SetOprExpr);
    assert!(inner.has_keyword(Keyword::Intersect));
}

#[test]
fn test_union_is_left_associative() {
    let result = parse_ok("SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3");
    let outer = first_statement(&result).first_child_node().unwrap();

    assert_eq!(outer.kind(), NodeKind::SetOprExpr);
    assert_eq!(outer.nth_child_node(0).unwrap().kind(), NodeKind::SetOprExpr);
    assert_eq!(outer.nth_child_node(1).unwrap().kind(), NodeKind::QuerySpec);
}

#[test]
fn test_order_and_limit_apply_to_whole_set_operation() {
    let result = parse_ok("SELECT a FROM t UNION SELECT a FROM u ORDER BY a LIMIT 5");
    let statement = first_statement(&result);
    let children: Vec<NodeKind> = statement.child_nodes().map(|node| node.kind()).collect();

    assert_eq!(
        children,
        vec![NodeKind::SetOprExpr, NodeKind::OrderByClause, NodeKind::LimitClause]
    );
}

#[rstest]
#[case("SELECT (SELECT 1)", NodeKind::SubqueryExpr)]
#[case("SELECT (1)", NodeKind::ParenExpr)]
#[case("SELECT (1, 2)", NodeKind::RowExpr)]
#[case("SELECT ((SELECT 1) + 1)", NodeKind::ParenExpr)]
fn test_parenthesis_forms(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    let field = find(result.tree().root(), NodeKind::SelectField).unwrap();
    assert_eq!(field.first_child_node().unwrap().kind(), expected);
}

#[test]
fn test_in_subquery_and_in_list() {
    let result = parse_ok("SELECT * FROM t WHERE a IN (SELECT b FROM u) AND c IN (1, 2)");
    let root = result.tree().root();

    assert_eq!(count(root, NodeKind::InExpr), 2);
    assert_eq!(count(root, NodeKind::SubqueryExpr), 1);
    assert_eq!(count(root, NodeKind::ExprList), 1);
}

#[test]
fn test_quantified_comparison() {
    let result = parse_ok("SELECT * FROM t WHERE a > ALL (SELECT b FROM u)");
    assert!(find(result.tree().root(), NodeKind::CompareSubqueryExpr).is_some());
}

#[test]
fn test_derived_table_and_parenthesized_joins() {
    let result = parse_ok("SELECT * FROM (SELECT 1 AS x) AS d, (t1 JOIN t2 ON t1.a = t2.a)");
    let root = result.tree().root();

    assert!(find(root, NodeKind::DerivedTable).is_some());
    assert!(find(root, NodeKind::ParenTableRefs).is_some());
    assert!(find(root, NodeKind::OnCondition).is_some());
}

#[test]
fn test_joins_nest_to_the_left() {
    let result = parse_ok("SELECT * FROM a JOIN b USING (id) LEFT JOIN c ON b.x = c.x");
    let refs = find(result.tree().root(), NodeKind::TableRefList).unwrap();
    let outer = refs.first_child_node().unwrap();

    assert_eq!(outer.kind(), NodeKind::JoinClause);
    assert_eq!(outer.first_child_node().unwrap().kind(), NodeKind::JoinClause);
}

#[rstest]
#[case("SELECT a AS x FROM t", Some("x"))]
#[case("SELECT a x FROM t", Some("x"))]
#[case("SELECT a 'x' FROM t", Some("x"))]
#[case("SELECT a `x y` FROM t", Some("x y"))]
#[case("SELECT a FROM t", None)]
fn test_select_field_alias(#[case] sql: &str, #[case] expected: Option<&str>) {
    let result = parse_ok(sql);
    let field = find(result.tree().root(), NodeKind::SelectField).unwrap();
    let field = field.cast::<SelectFieldContext>().unwrap();

    assert_eq!(
        field.alias().and_then(|alias| alias.name()).as_deref(),
        expected
    );
}

#[test]
fn test_wildcards() {
    let result = parse_ok("SELECT *, t.*, d.t.* FROM d.t");
    assert_eq!(count(result.tree().root(), NodeKind::WildcardField), 3);
}

#[test]
fn test_unreserved_keywords_are_names() {
    let result = parse_ok("SELECT begin, comment, status FROM t");
    assert_eq!(count(result.tree().root(), NodeKind::ColumnRef), 3);
}

#[test]
fn test_function_call_requires_adjacent_paren_for_builtins() {
    let result = parse_ok("SELECT count(*), my_func (1) FROM t");
    let root = result.tree().root();

    assert_eq!(count(root, NodeKind::AggregateFuncCall), 1);
    assert_eq!(count(root, NodeKind::FunctionCall), 1);
}

#[test]
fn test_interval_forms() {
    let result = parse_ok("SELECT d + INTERVAL 1 DAY, INTERVAL(5, 1, 10) FROM t");
    let root = result.tree().root();

    assert_eq!(count(root, NodeKind::IntervalExpr), 1);
    assert_eq!(count(root, NodeKind::FunctionCall), 1);
}

#[test]
fn test_default_with_and_without_column() {
    let result = parse_ok("INSERT INTO t VALUES (DEFAULT, DEFAULT(b))");
    assert_eq!(count(result.tree().root(), NodeKind::DefaultExpr), 2);
}

#[test]
fn test_member_of() {
    let result = parse_ok("SELECT 1 MEMBER OF ('[1, 2]')");
    assert!(find(result.tree().root(), NodeKind::MemberOfExpr).is_some());
}

#[test]
fn test_json_extract_path() {
    let result = parse_ok("SELECT doc->'$.a[0]', doc->>'$.b' FROM t");
    let root = result.tree().root();

    assert_eq!(count(root, NodeKind::JsonExtractExpr), 2);
    assert_eq!(count(root, NodeKind::JsonPath), 2);
}

#[test]
fn test_invalid_json_path_is_reported() {
    let result = parse("SELECT doc->'a.b' FROM t");

    assert_eq!(result.errors().len(), 1);
    assert!(matches!(
        result.errors()[0].kind(),
        ErrorImpl::InvalidJsonPath { .. }
    ));
    assert_eq!(result.statements().count(), 0);
}

#[test]
fn test_as_of_timestamp() {
    let result = parse_ok("SELECT * FROM t AS OF TIMESTAMP '2024-01-01' AS x");
    let factor = find(result.tree().root(), NodeKind::TableFactor).unwrap();

    assert!(factor.child_of_kind(NodeKind::AsOfClause).is_some());
    assert!(factor.child_of_kind(NodeKind::Alias).is_some());
}

#[test]
fn test_create_table_elements_in_order() {
    let result = parse_ok(
        "CREATE TABLE t (\
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
            name VARCHAR(32) DEFAULT 'x' COMMENT 'name', \
            KEY idx_name (name), \
            age INT\
        ) ENGINE = InnoDB, DEFAULT CHARSET = utf8mb4",
    );
    let elements = find(result.tree().root(), NodeKind::TableElementList).unwrap();
    let kinds: Vec<NodeKind> = elements.child_nodes().map(|node| node.kind()).collect();

    assert_eq!(
        kinds,
        vec![
            NodeKind::ColumnDef,
            NodeKind::ColumnDef,
            NodeKind::TableConstraint,
            NodeKind::ColumnDef,
        ]
    );
    let options = find(result.tree().root(), NodeKind::TableOptionList).unwrap();
    assert_eq!(options.children_of_kind(NodeKind::TableOption).count(), 2);
}

#[test]
fn test_column_options() {
    let result = parse_ok(
        "CREATE TABLE t (a INT NOT NULL DEFAULT 0 ON UPDATE CURRENT_TIMESTAMP UNIQUE KEY COMMENT 'c')",
    );
    let column = find(result.tree().root(), NodeKind::ColumnDef).unwrap();
    assert_eq!(column.children_of_kind(NodeKind::ColumnOption).count(), 5);
}

#[test]
fn test_column_comment_accepts_national_string() {
    let result = parse_ok("CREATE TABLE t (a INT COMMENT N'x', b INT)");
    let column = find(result.tree().root(), NodeKind::ColumnDef).unwrap();
    assert_eq!(column.children_of_kind(NodeKind::ColumnOption).count(), 1);
}

#[rstest]
#[case("CREATE TABLE t (a INT COMMENT \"x\")")]
#[case("CREATE TABLE t (a INT) COMMENT \"x\"")]
fn test_ansi_quotes_comment_is_ambiguous(#[case] sql: &str) {
    assert!(parse_in(sql, SqlMode::default()).is_ok());

    let result = parse_in(sql, SqlMode::ansi());
    assert_eq!(result.errors().len(), 1);
    let error = &result.errors()[0];
    assert!(matches!(error.kind(), ErrorImpl::AmbiguousConstruct { .. }));
    assert_eq!(&sql[error.get_span().start..error.get_span().end], "\"x\"");
}

#[test]
fn test_generated_column_and_foreign_key() {
    let result = parse_ok(
        "CREATE TABLE t (\
            a INT, \
            b INT GENERATED ALWAYS AS (a + 1) STORED, \
            CONSTRAINT fk FOREIGN KEY (a) REFERENCES p (id) ON DELETE CASCADE\
        )",
    );
    let root = result.tree().root();

    assert!(find(root, NodeKind::ReferenceDef).is_some());
    assert!(find(root, NodeKind::ReferentialAction).is_some());
}

#[rstest]
#[case("CREATE TABLE t LIKE s", NodeKind::CreateLikeClause)]
#[case("CREATE TABLE t (LIKE s)", NodeKind::CreateLikeClause)]
#[case("CREATE TABLE t AS SELECT * FROM s", NodeKind::SelectStmt)]
#[case("CREATE TABLE t (SELECT * FROM s)", NodeKind::SelectStmt)]
#[case("CREATE TABLE t (a INT) SELECT a FROM s", NodeKind::TableElementList)]
fn test_create_table_forms(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    let statement = first_statement(&result);

    assert_eq!(statement.kind(), NodeKind::CreateTableStmt);
    assert!(statement.child_of_kind(expected).is_some());
}

#[test]
fn test_range_partitions_in_order() {
    let result = parse_ok(
        "CREATE TABLE t (a INT) PARTITION BY RANGE (a) (\
            PARTITION p0 VALUES LESS THAN (10), \
            PARTITION p1 VALUES LESS THAN (20), \
            PARTITION pmax VALUES LESS THAN MAXVALUE\
        )",
    );
    let list = find(result.tree().root(), NodeKind::PartitionDefinitionList).unwrap();
    let list = list.cast::<PartitionDefinitionListContext>().unwrap();
    let names: Vec<String> = list
        .definitions()
        .filter_map(|definition| definition.name())
        .collect();

    assert_eq!(names, vec!["p0", "p1", "pmax"]);
    assert!(find(result.tree().root(), NodeKind::MaxValue).is_some());
}

#[test]
fn test_hash_partitions_with_count() {
    let result = parse_ok("CREATE TABLE t (a INT) PARTITION BY HASH (a) PARTITIONS 4");
    assert!(find(result.tree().root(), NodeKind::PartitionOptions).is_some());
}

#[rstest]
#[case("ALTER TABLE t ADD COLUMN b INT AFTER a", NodeKind::AddColumnSpec)]
#[case("ALTER TABLE t ADD (b INT, c INT)", NodeKind::AddColumnSpec)]
#[case("ALTER TABLE t ADD INDEX i (a)", NodeKind::AddConstraintSpec)]
#[case("ALTER TABLE t ADD PARTITION (PARTITION p2 VALUES LESS THAN (30))", NodeKind::AddPartitionSpec)]
#[case("ALTER TABLE t DROP COLUMN b", NodeKind::DropColumnSpec)]
#[case("ALTER TABLE t DROP b", NodeKind::DropColumnSpec)]
#[case("ALTER TABLE t DROP INDEX i", NodeKind::DropIndexSpec)]
#[case("ALTER TABLE t DROP PRIMARY KEY", NodeKind::DropPrimaryKeySpec)]
#[case("ALTER TABLE t DROP FOREIGN KEY fk", NodeKind::DropForeignKeySpec)]
#[case("ALTER TABLE t DROP PARTITION p0, p1", NodeKind::DropPartitionSpec)]
#[case("ALTER TABLE t MODIFY COLUMN a BIGINT FIRST", NodeKind::ModifyColumnSpec)]
#[case("ALTER TABLE t CHANGE a b INT", NodeKind::ChangeColumnSpec)]
#[case("ALTER TABLE t ALTER COLUMN a SET DEFAULT 1", NodeKind::AlterColumnSpec)]
#[case("ALTER TABLE t ALTER INDEX i INVISIBLE", NodeKind::AlterIndexVisibilitySpec)]
#[case("ALTER TABLE t RENAME TO u", NodeKind::RenameTableSpec)]
#[case("ALTER TABLE t RENAME COLUMN a TO b", NodeKind::RenameColumnSpec)]
#[case("ALTER TABLE t RENAME INDEX i TO j", NodeKind::RenameIndexSpec)]
#[case("ALTER TABLE t ALGORITHM = INPLACE", NodeKind::AlgorithmSpec)]
#[case("ALTER TABLE t LOCK = NONE", NodeKind::LockSpec)]
#[case("ALTER TABLE t TRUNCATE PARTITION ALL", NodeKind::TruncatePartitionSpec)]
#[case("ALTER TABLE t COALESCE PARTITION 2", NodeKind::CoalescePartitionSpec)]
#[case("ALTER TABLE t EXCHANGE PARTITION p WITH TABLE u", NodeKind::ExchangePartitionSpec)]
#[case("ALTER TABLE t REMOVE PARTITIONING", NodeKind::RemovePartitioningSpec)]
#[case("ALTER TABLE t CONVERT TO CHARACTER SET utf8mb4", NodeKind::ConvertCharsetSpec)]
#[case("ALTER TABLE t ENGINE = InnoDB", NodeKind::TableOptionList)]
fn test_alter_table_specs(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    let specs = find(result.tree().root(), NodeKind::AlterTableSpecList).unwrap();
    assert_eq!(specs.first_child_node().unwrap().kind(), expected);
}

#[test]
fn test_alter_table_spec_list_order() {
    let result = parse_ok("ALTER TABLE t ADD COLUMN c INT, DROP COLUMN b, ALGORITHM = INSTANT");
    let specs = find(result.tree().root(), NodeKind::AlterTableSpecList).unwrap();
    let kinds: Vec<NodeKind> = specs.child_nodes().map(|node| node.kind()).collect();

    assert_eq!(
        kinds,
        vec![
            NodeKind::AddColumnSpec,
            NodeKind::DropColumnSpec,
            NodeKind::AlgorithmSpec,
        ]
    );
}

#[test]
fn test_alter_table_repartition() {
    let result = parse_ok("ALTER TABLE t PARTITION BY HASH (a) PARTITIONS 8");
    let statement = first_statement(&result);
    assert!(statement.child_of_kind(NodeKind::PartitionBySpec).is_some());
}

#[test]
fn test_grant_form_follows_first_of_on_and_to() {
    let result = parse_ok("GRANT SELECT (a, b), UPDATE ON TABLE d.t TO 'u'@'%' WITH GRANT OPTION");
    let statement = first_statement(&result);

    assert_eq!(statement.kind(), NodeKind::GrantStmt);
    let privileges = statement.child_of_kind(NodeKind::PrivilegeList).unwrap();
    assert_eq!(privileges.children_of_kind(NodeKind::Privilege).count(), 2);
    assert!(statement.child_of_kind(NodeKind::GrantLevel).is_some());
}

#[test]
fn test_user_identity_forms() {
    let result = parse_ok("DROP USER 'a'@'localhost', b@'%', c@localhost, d");
    let hosts: Vec<(Option<String>, Option<String>)> = result
        .tree()
        .root()
        .child_nodes()
        .flat_map(|statement| {
            let list = find(statement, NodeKind::UserList).unwrap();
            list.child_contexts::<UserIdentityContext>()
                .map(|identity| (identity.user(), identity.host()))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(
        hosts,
        vec![
            (Some("a".to_string()), Some("localhost".to_string())),
            (Some("b".to_string()), Some("%".to_string())),
            (Some("c".to_string()), Some("localhost".to_string())),
            (Some("d".to_string()), None),
        ]
    );
}

#[test]
fn test_current_user_identity() {
    let result = parse_ok("SHOW GRANTS FOR CURRENT_USER()");
    let identity = find(result.tree().root(), NodeKind::UserIdentity).unwrap();
    let identity = UserIdentityContext::wrap(identity);

    assert_eq!(identity.user(), None);
    assert_eq!(identity.host(), None);
}

#[rstest]
#[case("SET NAMES utf8mb4 COLLATE utf8mb4_bin", NodeKind::CharsetAssignment)]
#[case("SET CHARACTER SET DEFAULT", NodeKind::CharsetAssignment)]
#[case("SET names = 'x'", NodeKind::VariableAssignment)]
#[case("SET @@session.autocommit = ON", NodeKind::VariableAssignment)]
#[case("SET GLOBAL tidb_slow_log_threshold = 300", NodeKind::VariableAssignment)]
#[case("SET global = 1", NodeKind::VariableAssignment)]
#[case("SET @x := 5", NodeKind::VariableAssignment)]
fn test_set_assignments(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    let statement = first_statement(&result);

    assert_eq!(statement.kind(), NodeKind::SetStmt);
    assert_eq!(statement.first_child_node().unwrap().kind(), expected);
}

#[rstest]
#[case("SET transaction = 1", NodeKind::SetStmt)]
#[case("SET role = 1", NodeKind::SetStmt)]
#[case("SET PASSWORD FOR 'u' = 'x'", NodeKind::SetPasswordStmt)]
#[case("SET ROLE NONE", NodeKind::SetRoleStmt)]
#[case("SET SESSION TRANSACTION ISOLATION LEVEL SERIALIZABLE", NodeKind::SetTransactionStmt)]
fn test_set_dispatch(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    assert_eq!(first_statement(&result).kind(), expected);
}

#[rstest]
#[case("EXPLAIN t", NodeKind::DescribeStmt)]
#[case("DESC t a", NodeKind::DescribeStmt)]
#[case("EXPLAIN `select`", NodeKind::DescribeStmt)]
#[case("EXPLAIN FORMAT = 'brief' SELECT 1", NodeKind::ExplainStmt)]
#[case("EXPLAIN ANALYZE DELETE FROM t", NodeKind::ExplainStmt)]
#[case("EXPLAIN FOR CONNECTION 7", NodeKind::ExplainStmt)]
#[case("DESCRIBE begin", NodeKind::ExplainStmt)]
fn test_explain_or_describe(#[case] sql: &str, #[case] expected: NodeKind) {
    let result = parse_ok(sql);
    assert_eq!(first_statement(&result).kind(), expected);
}

#[test]
fn test_insert_column_list_versus_query() {
    let with_columns = parse_ok("INSERT INTO t (a) SELECT 1");
    let with_query = parse_ok("INSERT INTO t (SELECT 1)");

    assert!(find(with_columns.tree().root(), NodeKind::ColumnNameList).is_some());
    assert!(find(with_query.tree().root(), NodeKind::ColumnNameList).is_none());
    assert!(find(with_query.tree().root(), NodeKind::SelectStmt).is_some());
}

#[test]
fn test_insert_on_duplicate_key_update() {
    let result = parse_ok("INSERT INTO t VALUES (1) ON DUPLICATE KEY UPDATE a = VALUES(a)");
    assert!(find(result.tree().root(), NodeKind::OnDuplicateKeyUpdate).is_some());
}

#[rstest]
#[case("DELETE FROM t WHERE a = 1", false)]
#[case("DELETE t1, t2 FROM t1 JOIN t2 ON t1.id = t2.id", true)]
#[case("DELETE FROM t1, t2 USING t1 JOIN t2 ON t1.id = t2.id", true)]
fn test_delete_forms(#[case] sql: &str, #[case] multi_table: bool) {
    let result = parse_ok(sql);
    let statement = first_statement(&result);
    assert_eq!(
        statement.child_of_kind(NodeKind::TableNameList).is_some(),
        multi_table
    );
}

#[test]
fn test_optimizer_hints_attach_to_query() {
    let result = parse_ok("SELECT /*+ USE_INDEX(t, idx) */ a FROM t");
    assert!(find(result.tree().root(), NodeKind::HintClause).is_some());
}

#[test]
fn test_window_functions() {
    let result = parse_ok(
        "SELECT ROW_NUMBER() OVER w, SUM(a) OVER (PARTITION BY b ORDER BY c ROWS BETWEEN 1 PRECEDING AND CURRENT ROW) \
         FROM t WINDOW w AS (ORDER BY a)",
    );
    let root = result.tree().root();

    assert_eq!(count(root, NodeKind::OverClause), 2);
    assert!(find(root, NodeKind::FrameClause).is_some());
    assert!(find(root, NodeKind::WindowClause).is_some());
}

#[test]
fn test_batch_recovery_keeps_good_statements() {
    let result = parse("SELECT 1; SELEC 2; SELECT 3;");

    assert_eq!(result.statements().count(), 2);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].found(), Some("SELEC"));
}

#[test]
fn test_failed_statement_leaves_tokens_unbound() {
    let result = parse("SELECT 1 FROM; SELECT 2");
    let tree = result.tree();

    assert_eq!(result.statements().count(), 1);
    let from = tree
        .tokens()
        .iter()
        .position(|token| token.value == "FROM")
        .unwrap();
    assert_eq!(tree.binding(TokenId::new(from)), Binding::Unbound);
}

#[test]
fn test_error_lists_expected_items() {
    let result = parse("SELECT a FROM WHERE");
    let error = &result.errors()[0];

    assert_eq!(error.found(), Some("WHERE"));
    assert!(!error.expected().is_empty());
}

#[test]
fn test_unexpected_end_of_input() {
    let result = parse("SELECT a FROM");
    assert!(matches!(
        result.errors()[0].kind(),
        ErrorImpl::UnexpectedEof { .. }
    ));
}

#[test]
fn test_ansi_quotes_string_position_is_ambiguous() {
    let sql = "LOAD DATA INFILE \"rows.csv\" INTO TABLE t";

    assert!(parse_in(sql, SqlMode::default()).is_ok());

    let result = parse_in(sql, SqlMode::ansi());
    assert_eq!(result.errors().len(), 1);
    assert!(matches!(
        result.errors()[0].kind(),
        ErrorImpl::AmbiguousConstruct { .. }
    ));
}

#[test]
fn test_nesting_limit() {
    let config = ParserConfig {
        max_depth: 16,
        ..ParserConfig::default()
    };
    let sql = format!("SELECT {}1{}", "(".repeat(40), ")".repeat(40));
    let result = parse_with(sql.as_bytes(), &config);

    assert_eq!(result.errors().len(), 1);
    assert!(matches!(
        result.errors()[0].kind(),
        ErrorImpl::NestingTooDeep { limit: 16 }
    ));

    let shallow = format!("SELECT {}1{}", "(".repeat(3), ")".repeat(3));
    assert!(parse_with(shallow.as_bytes(), &config).is_ok());
}
