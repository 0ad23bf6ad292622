use super::ast::{NodeRef, RuleContext, TokenRef};
use crate::MK_NODE_KINDS;

MK_NODE_KINDS! {
    // Root
    /// Root of every tree; children are the parsed statements.
    StatementList => StatementListContext, enter_statement_list, exit_statement_list;

    // Query statements
    SelectStmt => SelectStmtContext, enter_select_stmt, exit_select_stmt;
    /// `UNION`, `EXCEPT` or `INTERSECT` of two query bodies.
    SetOprExpr => SetOprExprContext, enter_set_opr_expr, exit_set_opr_expr;
    /// A single `SELECT ... FROM ...` query block.
    QuerySpec => QuerySpecContext, enter_query_spec, exit_query_spec;
    /// A parenthesized query used as a query body.
    ParenQuery => ParenQueryContext, enter_paren_query, exit_paren_query;
    TableStmt => TableStmtContext, enter_table_stmt, exit_table_stmt;
    ValuesStmt => ValuesStmtContext, enter_values_stmt, exit_values_stmt;

    // Data manipulation
    InsertStmt => InsertStmtContext, enter_insert_stmt, exit_insert_stmt;
    ReplaceStmt => ReplaceStmtContext, enter_replace_stmt, exit_replace_stmt;
    UpdateStmt => UpdateStmtContext, enter_update_stmt, exit_update_stmt;
    DeleteStmt => DeleteStmtContext, enter_delete_stmt, exit_delete_stmt;
    LoadDataStmt => LoadDataStmtContext, enter_load_data_stmt, exit_load_data_stmt;
    CallStmt => CallStmtContext, enter_call_stmt, exit_call_stmt;
    DoStmt => DoStmtContext, enter_do_stmt, exit_do_stmt;

    // Data definition
    CreateDatabaseStmt => CreateDatabaseStmtContext, enter_create_database_stmt, exit_create_database_stmt;
    AlterDatabaseStmt => AlterDatabaseStmtContext, enter_alter_database_stmt, exit_alter_database_stmt;
    DropDatabaseStmt => DropDatabaseStmtContext, enter_drop_database_stmt, exit_drop_database_stmt;
    CreateTableStmt => CreateTableStmtContext, enter_create_table_stmt, exit_create_table_stmt;
    AlterTableStmt => AlterTableStmtContext, enter_alter_table_stmt, exit_alter_table_stmt;
    DropTableStmt => DropTableStmtContext, enter_drop_table_stmt, exit_drop_table_stmt;
    TruncateTableStmt => TruncateTableStmtContext, enter_truncate_table_stmt, exit_truncate_table_stmt;
    RenameTableStmt => RenameTableStmtContext, enter_rename_table_stmt, exit_rename_table_stmt;
    CreateIndexStmt => CreateIndexStmtContext, enter_create_index_stmt, exit_create_index_stmt;
    DropIndexStmt => DropIndexStmtContext, enter_drop_index_stmt, exit_drop_index_stmt;
    CreateViewStmt => CreateViewStmtContext, enter_create_view_stmt, exit_create_view_stmt;
    DropViewStmt => DropViewStmtContext, enter_drop_view_stmt, exit_drop_view_stmt;
    CreateSequenceStmt => CreateSequenceStmtContext, enter_create_sequence_stmt, exit_create_sequence_stmt;
    DropSequenceStmt => DropSequenceStmtContext, enter_drop_sequence_stmt, exit_drop_sequence_stmt;
    FlashbackTableStmt => FlashbackTableStmtContext, enter_flashback_table_stmt, exit_flashback_table_stmt;
    FlashbackClusterStmt => FlashbackClusterStmtContext, enter_flashback_cluster_stmt, exit_flashback_cluster_stmt;
    RecoverTableStmt => RecoverTableStmtContext, enter_recover_table_stmt, exit_recover_table_stmt;

    // Transactions
    BeginStmt => BeginStmtContext, enter_begin_stmt, exit_begin_stmt;
    CommitStmt => CommitStmtContext, enter_commit_stmt, exit_commit_stmt;
    RollbackStmt => RollbackStmtContext, enter_rollback_stmt, exit_rollback_stmt;
    SavepointStmt => SavepointStmtContext, enter_savepoint_stmt, exit_savepoint_stmt;
    ReleaseSavepointStmt => ReleaseSavepointStmtContext, enter_release_savepoint_stmt, exit_release_savepoint_stmt;
    SetTransactionStmt => SetTransactionStmtContext, enter_set_transaction_stmt, exit_set_transaction_stmt;

    // Access control
    CreateUserStmt => CreateUserStmtContext, enter_create_user_stmt, exit_create_user_stmt;
    AlterUserStmt => AlterUserStmtContext, enter_alter_user_stmt, exit_alter_user_stmt;
    DropUserStmt => DropUserStmtContext, enter_drop_user_stmt, exit_drop_user_stmt;
    CreateRoleStmt => CreateRoleStmtContext, enter_create_role_stmt, exit_create_role_stmt;
    DropRoleStmt => DropRoleStmtContext, enter_drop_role_stmt, exit_drop_role_stmt;
    GrantStmt => GrantStmtContext, enter_grant_stmt, exit_grant_stmt;
    GrantRoleStmt => GrantRoleStmtContext, enter_grant_role_stmt, exit_grant_role_stmt;
    RevokeStmt => RevokeStmtContext, enter_revoke_stmt, exit_revoke_stmt;
    RevokeRoleStmt => RevokeRoleStmtContext, enter_revoke_role_stmt, exit_revoke_role_stmt;
    SetPasswordStmt => SetPasswordStmtContext, enter_set_password_stmt, exit_set_password_stmt;
    SetRoleStmt => SetRoleStmtContext, enter_set_role_stmt, exit_set_role_stmt;
    SetDefaultRoleStmt => SetDefaultRoleStmtContext, enter_set_default_role_stmt, exit_set_default_role_stmt;

    // Administration
    UseStmt => UseStmtContext, enter_use_stmt, exit_use_stmt;
    SetStmt => SetStmtContext, enter_set_stmt, exit_set_stmt;
    ShowStmt => ShowStmtContext, enter_show_stmt, exit_show_stmt;
    ExplainStmt => ExplainStmtContext, enter_explain_stmt, exit_explain_stmt;
    DescribeStmt => DescribeStmtContext, enter_describe_stmt, exit_describe_stmt;
    AnalyzeTableStmt => AnalyzeTableStmtContext, enter_analyze_table_stmt, exit_analyze_table_stmt;
    KillStmt => KillStmtContext, enter_kill_stmt, exit_kill_stmt;
    FlushStmt => FlushStmtContext, enter_flush_stmt, exit_flush_stmt;
    PrepareStmt => PrepareStmtContext, enter_prepare_stmt, exit_prepare_stmt;
    ExecuteStmt => ExecuteStmtContext, enter_execute_stmt, exit_execute_stmt;
    DeallocateStmt => DeallocateStmtContext, enter_deallocate_stmt, exit_deallocate_stmt;
    LockTablesStmt => LockTablesStmtContext, enter_lock_tables_stmt, exit_lock_tables_stmt;
    UnlockTablesStmt => UnlockTablesStmtContext, enter_unlock_tables_stmt, exit_unlock_tables_stmt;
    AdminStmt => AdminStmtContext, enter_admin_stmt, exit_admin_stmt;
    SplitRegionStmt => SplitRegionStmtContext, enter_split_region_stmt, exit_split_region_stmt;
    BackupStmt => BackupStmtContext, enter_backup_stmt, exit_backup_stmt;
    RestoreStmt => RestoreStmtContext, enter_restore_stmt, exit_restore_stmt;

    // Query clauses
    WithClause => WithClauseContext, enter_with_clause, exit_with_clause;
    CommonTableExpr => CommonTableExprContext, enter_common_table_expr, exit_common_table_expr;
    HintClause => HintClauseContext, enter_hint_clause, exit_hint_clause;
    FieldList => FieldListContext, enter_field_list, exit_field_list;
    SelectField => SelectFieldContext, enter_select_field, exit_select_field;
    WildcardField => WildcardFieldContext, enter_wildcard_field, exit_wildcard_field;
    Alias => AliasContext, enter_alias, exit_alias;
    IntoClause => IntoClauseContext, enter_into_clause, exit_into_clause;
    FromClause => FromClauseContext, enter_from_clause, exit_from_clause;
    TableRefList => TableRefListContext, enter_table_ref_list, exit_table_ref_list;
    JoinClause => JoinClauseContext, enter_join_clause, exit_join_clause;
    OnCondition => OnConditionContext, enter_on_condition, exit_on_condition;
    UsingClause => UsingClauseContext, enter_using_clause, exit_using_clause;
    /// A table name, derived table or JSON_TABLE with its alias and hints.
    TableFactor => TableFactorContext, enter_table_factor, exit_table_factor;
    DerivedTable => DerivedTableContext, enter_derived_table, exit_derived_table;
    ParenTableRefs => ParenTableRefsContext, enter_paren_table_refs, exit_paren_table_refs;
    DualTable => DualTableContext, enter_dual_table, exit_dual_table;
    TableName => TableNameContext, enter_table_name, exit_table_name;
    PartitionSelection => PartitionSelectionContext, enter_partition_selection, exit_partition_selection;
    AsOfClause => AsOfClauseContext, enter_as_of_clause, exit_as_of_clause;
    IndexHint => IndexHintContext, enter_index_hint, exit_index_hint;
    WhereClause => WhereClauseContext, enter_where_clause, exit_where_clause;
    GroupByClause => GroupByClauseContext, enter_group_by_clause, exit_group_by_clause;
    HavingClause => HavingClauseContext, enter_having_clause, exit_having_clause;
    WindowClause => WindowClauseContext, enter_window_clause, exit_window_clause;
    WindowDefinition => WindowDefinitionContext, enter_window_definition, exit_window_definition;
    WindowSpec => WindowSpecContext, enter_window_spec, exit_window_spec;
    PartitionByClause => PartitionByClauseContext, enter_partition_by_clause, exit_partition_by_clause;
    OrderByClause => OrderByClauseContext, enter_order_by_clause, exit_order_by_clause;
    ByItem => ByItemContext, enter_by_item, exit_by_item;
    FrameClause => FrameClauseContext, enter_frame_clause, exit_frame_clause;
    FrameBound => FrameBoundContext, enter_frame_bound, exit_frame_bound;
    LimitClause => LimitClauseContext, enter_limit_clause, exit_limit_clause;
    LockClause => LockClauseContext, enter_lock_clause, exit_lock_clause;

    // Expressions
    BinaryExpr => BinaryExprContext, enter_binary_expr, exit_binary_expr;
    UnaryExpr => UnaryExprContext, enter_unary_expr, exit_unary_expr;
    IsExpr => IsExprContext, enter_is_expr, exit_is_expr;
    BetweenExpr => BetweenExprContext, enter_between_expr, exit_between_expr;
    InExpr => InExprContext, enter_in_expr, exit_in_expr;
    LikeExpr => LikeExprContext, enter_like_expr, exit_like_expr;
    RegexpExpr => RegexpExprContext, enter_regexp_expr, exit_regexp_expr;
    MemberOfExpr => MemberOfExprContext, enter_member_of_expr, exit_member_of_expr;
    /// `expr op ANY|SOME|ALL (subquery)`.
    CompareSubqueryExpr => CompareSubqueryExprContext, enter_compare_subquery_expr, exit_compare_subquery_expr;
    ExistsExpr => ExistsExprContext, enter_exists_expr, exit_exists_expr;
    SubqueryExpr => SubqueryExprContext, enter_subquery_expr, exit_subquery_expr;
    ParenExpr => ParenExprContext, enter_paren_expr, exit_paren_expr;
    RowExpr => RowExprContext, enter_row_expr, exit_row_expr;
    /// `col`, `tbl.col` or `db.tbl.col`.
    ColumnRef => ColumnRefContext, enter_column_ref, exit_column_ref;
    FunctionName => FunctionNameContext, enter_function_name, exit_function_name;
    FunctionCall => FunctionCallContext, enter_function_call, exit_function_call;
    AggregateFuncCall => AggregateFuncCallContext, enter_aggregate_func_call, exit_aggregate_func_call;
    WindowFuncCall => WindowFuncCallContext, enter_window_func_call, exit_window_func_call;
    OverClause => OverClauseContext, enter_over_clause, exit_over_clause;
    TrimFunc => TrimFuncContext, enter_trim_func, exit_trim_func;
    SubstringFunc => SubstringFuncContext, enter_substring_func, exit_substring_func;
    ExtractFunc => ExtractFuncContext, enter_extract_func, exit_extract_func;
    PositionFunc => PositionFuncContext, enter_position_func, exit_position_func;
    DateArithFunc => DateArithFuncContext, enter_date_arith_func, exit_date_arith_func;
    CastExpr => CastExprContext, enter_cast_expr, exit_cast_expr;
    ConvertExpr => ConvertExprContext, enter_convert_expr, exit_convert_expr;
    MatchAgainstExpr => MatchAgainstExprContext, enter_match_against_expr, exit_match_against_expr;
    CaseExpr => CaseExprContext, enter_case_expr, exit_case_expr;
    WhenClause => WhenClauseContext, enter_when_clause, exit_when_clause;
    ElseClause => ElseClauseContext, enter_else_clause, exit_else_clause;
    IntervalExpr => IntervalExprContext, enter_interval_expr, exit_interval_expr;
    CollateExpr => CollateExprContext, enter_collate_expr, exit_collate_expr;
    DefaultExpr => DefaultExprContext, enter_default_expr, exit_default_expr;
    VariableExpr => VariableExprContext, enter_variable_expr, exit_variable_expr;
    SystemVariableExpr => SystemVariableExprContext, enter_system_variable_expr, exit_system_variable_expr;
    ParamMarker => ParamMarkerContext, enter_param_marker, exit_param_marker;
    AssignmentExpr => AssignmentExprContext, enter_assignment_expr, exit_assignment_expr;
    JsonExtractExpr => JsonExtractExprContext, enter_json_extract_expr, exit_json_extract_expr;
    /// Path literal of `->`, `->>` or JSON_TABLE.
    JsonPath => JsonPathContext, enter_json_path, exit_json_path;

    // Literals
    NumericLiteral => NumericLiteralContext, enter_numeric_literal, exit_numeric_literal;
    /// One or more adjacent string tokens, optionally behind an introducer.
    StringLiteral => StringLiteralContext, enter_string_literal, exit_string_literal;
    HexLiteral => HexLiteralContext, enter_hex_literal, exit_hex_literal;
    BitLiteral => BitLiteralContext, enter_bit_literal, exit_bit_literal;
    NullLiteral => NullLiteralContext, enter_null_literal, exit_null_literal;
    BoolLiteral => BoolLiteralContext, enter_bool_literal, exit_bool_literal;
    TemporalLiteral => TemporalLiteralContext, enter_temporal_literal, exit_temporal_literal;

    // Lists and names
    ExprList => ExprListContext, enter_expr_list, exit_expr_list;
    Identifier => IdentifierContext, enter_identifier, exit_identifier;
    IdentifierList => IdentifierListContext, enter_identifier_list, exit_identifier_list;
    ColumnNameList => ColumnNameListContext, enter_column_name_list, exit_column_name_list;
    TableNameList => TableNameListContext, enter_table_name_list, exit_table_name_list;

    // JSON_TABLE
    JsonTable => JsonTableContext, enter_json_table, exit_json_table;
    JsonTableColumnList => JsonTableColumnListContext, enter_json_table_column_list, exit_json_table_column_list;
    JsonTableOrdinalityColumn => JsonTableOrdinalityColumnContext, enter_json_table_ordinality_column, exit_json_table_ordinality_column;
    JsonTablePathColumn => JsonTablePathColumnContext, enter_json_table_path_column, exit_json_table_path_column;
    JsonTableNestedColumns => JsonTableNestedColumnsContext, enter_json_table_nested_columns, exit_json_table_nested_columns;
    JsonTableOnResponse => JsonTableOnResponseContext, enter_json_table_on_response, exit_json_table_on_response;

    // Table definitions
    DatabaseOption => DatabaseOptionContext, enter_database_option, exit_database_option;
    TableElementList => TableElementListContext, enter_table_element_list, exit_table_element_list;
    ColumnDef => ColumnDefContext, enter_column_def, exit_column_def;
    DataType => DataTypeContext, enter_data_type, exit_data_type;
    TypeLength => TypeLengthContext, enter_type_length, exit_type_length;
    EnumValueList => EnumValueListContext, enter_enum_value_list, exit_enum_value_list;
    CharsetClause => CharsetClauseContext, enter_charset_clause, exit_charset_clause;
    CollateClause => CollateClauseContext, enter_collate_clause, exit_collate_clause;
    ColumnOption => ColumnOptionContext, enter_column_option, exit_column_option;
    ReferenceDef => ReferenceDefContext, enter_reference_def, exit_reference_def;
    ReferentialAction => ReferentialActionContext, enter_referential_action, exit_referential_action;
    TableConstraint => TableConstraintContext, enter_table_constraint, exit_table_constraint;
    IndexPartList => IndexPartListContext, enter_index_part_list, exit_index_part_list;
    IndexPart => IndexPartContext, enter_index_part, exit_index_part;
    IndexOption => IndexOptionContext, enter_index_option, exit_index_option;
    TableOptionList => TableOptionListContext, enter_table_option_list, exit_table_option_list;
    TableOption => TableOptionContext, enter_table_option, exit_table_option;
    CreateLikeClause => CreateLikeClauseContext, enter_create_like_clause, exit_create_like_clause;

    // Partitioning
    PartitionOptions => PartitionOptionsContext, enter_partition_options, exit_partition_options;
    SubpartitionOptions => SubpartitionOptionsContext, enter_subpartition_options, exit_subpartition_options;
    PartitionDefinitionList => PartitionDefinitionListContext, enter_partition_definition_list, exit_partition_definition_list;
    PartitionDefinition => PartitionDefinitionContext, enter_partition_definition, exit_partition_definition;
    PartitionValues => PartitionValuesContext, enter_partition_values, exit_partition_values;
    /// `MAXVALUE` bound of a range partition.
    MaxValue => MaxValueContext, enter_max_value, exit_max_value;
    PartitionOption => PartitionOptionContext, enter_partition_option, exit_partition_option;
    SubpartitionDefinition => SubpartitionDefinitionContext, enter_subpartition_definition, exit_subpartition_definition;

    // ALTER TABLE
    AlterTableSpecList => AlterTableSpecListContext, enter_alter_table_spec_list, exit_alter_table_spec_list;
    AddColumnSpec => AddColumnSpecContext, enter_add_column_spec, exit_add_column_spec;
    AddConstraintSpec => AddConstraintSpecContext, enter_add_constraint_spec, exit_add_constraint_spec;
    AddPartitionSpec => AddPartitionSpecContext, enter_add_partition_spec, exit_add_partition_spec;
    DropColumnSpec => DropColumnSpecContext, enter_drop_column_spec, exit_drop_column_spec;
    DropIndexSpec => DropIndexSpecContext, enter_drop_index_spec, exit_drop_index_spec;
    DropPrimaryKeySpec => DropPrimaryKeySpecContext, enter_drop_primary_key_spec, exit_drop_primary_key_spec;
    DropForeignKeySpec => DropForeignKeySpecContext, enter_drop_foreign_key_spec, exit_drop_foreign_key_spec;
    DropCheckSpec => DropCheckSpecContext, enter_drop_check_spec, exit_drop_check_spec;
    DropPartitionSpec => DropPartitionSpecContext, enter_drop_partition_spec, exit_drop_partition_spec;
    ModifyColumnSpec => ModifyColumnSpecContext, enter_modify_column_spec, exit_modify_column_spec;
    ChangeColumnSpec => ChangeColumnSpecContext, enter_change_column_spec, exit_change_column_spec;
    AlterColumnSpec => AlterColumnSpecContext, enter_alter_column_spec, exit_alter_column_spec;
    AlterIndexVisibilitySpec => AlterIndexVisibilitySpecContext, enter_alter_index_visibility_spec, exit_alter_index_visibility_spec;
    RenameTableSpec => RenameTableSpecContext, enter_rename_table_spec, exit_rename_table_spec;
    RenameColumnSpec => RenameColumnSpecContext, enter_rename_column_spec, exit_rename_column_spec;
    RenameIndexSpec => RenameIndexSpecContext, enter_rename_index_spec, exit_rename_index_spec;
    AlgorithmSpec => AlgorithmSpecContext, enter_algorithm_spec, exit_algorithm_spec;
    LockSpec => LockSpecContext, enter_lock_spec, exit_lock_spec;
    TruncatePartitionSpec => TruncatePartitionSpecContext, enter_truncate_partition_spec, exit_truncate_partition_spec;
    CoalescePartitionSpec => CoalescePartitionSpecContext, enter_coalesce_partition_spec, exit_coalesce_partition_spec;
    ReorganizePartitionSpec => ReorganizePartitionSpecContext, enter_reorganize_partition_spec, exit_reorganize_partition_spec;
    ExchangePartitionSpec => ExchangePartitionSpecContext, enter_exchange_partition_spec, exit_exchange_partition_spec;
    RemovePartitioningSpec => RemovePartitioningSpecContext, enter_remove_partitioning_spec, exit_remove_partitioning_spec;
    ConvertCharsetSpec => ConvertCharsetSpecContext, enter_convert_charset_spec, exit_convert_charset_spec;
    PartitionBySpec => PartitionBySpecContext, enter_partition_by_spec, exit_partition_by_spec;
    ColumnPosition => ColumnPositionContext, enter_column_position, exit_column_position;

    // Other DDL
    RenameTablePair => RenameTablePairContext, enter_rename_table_pair, exit_rename_table_pair;
    DefinerClause => DefinerClauseContext, enter_definer_clause, exit_definer_clause;
    ViewCheckOption => ViewCheckOptionContext, enter_view_check_option, exit_view_check_option;
    SequenceOption => SequenceOptionContext, enter_sequence_option, exit_sequence_option;

    // Transaction parts
    TransactionCharacteristic => TransactionCharacteristicContext, enter_transaction_characteristic, exit_transaction_characteristic;

    // Accounts and privileges
    UserIdentity => UserIdentityContext, enter_user_identity, exit_user_identity;
    UserSpec => UserSpecContext, enter_user_spec, exit_user_spec;
    UserSpecList => UserSpecListContext, enter_user_spec_list, exit_user_spec_list;
    UserList => UserListContext, enter_user_list, exit_user_list;
    AuthOption => AuthOptionContext, enter_auth_option, exit_auth_option;
    RequireClause => RequireClauseContext, enter_require_clause, exit_require_clause;
    ResourceOption => ResourceOptionContext, enter_resource_option, exit_resource_option;
    PasswordOption => PasswordOptionContext, enter_password_option, exit_password_option;
    PrivilegeList => PrivilegeListContext, enter_privilege_list, exit_privilege_list;
    Privilege => PrivilegeContext, enter_privilege, exit_privilege;
    GrantLevel => GrantLevelContext, enter_grant_level, exit_grant_level;

    // Administration parts
    VariableAssignment => VariableAssignmentContext, enter_variable_assignment, exit_variable_assignment;
    CharsetAssignment => CharsetAssignmentContext, enter_charset_assignment, exit_charset_assignment;
    ShowFilter => ShowFilterContext, enter_show_filter, exit_show_filter;
    AnalyzeOption => AnalyzeOptionContext, enter_analyze_option, exit_analyze_option;
    LockTableItem => LockTableItemContext, enter_lock_table_item, exit_lock_table_item;
    BackupOption => BackupOptionContext, enter_backup_option, exit_backup_option;

    // Data manipulation parts
    FieldsClause => FieldsClauseContext, enter_fields_clause, exit_fields_clause;
    LinesClause => LinesClauseContext, enter_lines_clause, exit_lines_clause;
    ValuesList => ValuesListContext, enter_values_list, exit_values_list;
    RowValue => RowValueContext, enter_row_value, exit_row_value;
    AssignmentList => AssignmentListContext, enter_assignment_list, exit_assignment_list;
    Assignment => AssignmentContext, enter_assignment, exit_assignment;
    OnDuplicateKeyUpdate => OnDuplicateKeyUpdateContext, enter_on_duplicate_key_update, exit_on_duplicate_key_update;
}
