use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use crate::MK_KEYWORDS;

/// How a keyword interacts with identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    /// Never an identifier unless quoted.
    Reserved,
    /// An identifier wherever the grammar does not need the keyword.
    Unreserved,
    /// Built-in function name. Reserved under IGNORE_SPACE, otherwise only
    /// a function call when `(` follows without whitespace.
    Function,
}

MK_KEYWORDS! {
    Account => "ACCOUNT": Unreserved,
    Action => "ACTION": Unreserved,
    Add => "ADD": Reserved,
    Adddate => "ADDDATE": Function,
    Admin => "ADMIN": Unreserved,
    After => "AFTER": Unreserved,
    Against => "AGAINST": Unreserved,
    Algorithm => "ALGORITHM": Unreserved,
    All => "ALL": Reserved,
    Alter => "ALTER": Reserved,
    Always => "ALWAYS": Unreserved,
    Analyze => "ANALYZE": Reserved,
    And => "AND": Reserved,
    Any => "ANY": Unreserved,
    Array => "ARRAY": Unreserved,
    As => "AS": Reserved,
    Asc => "ASC": Reserved,
    Ascii => "ASCII": Unreserved,
    AutoIdCache => "AUTO_ID_CACHE": Unreserved,
    AutoIncrement => "AUTO_INCREMENT": Unreserved,
    AutoRandom => "AUTO_RANDOM": Unreserved,
    Avg => "AVG": Unreserved,
    Backup => "BACKUP": Unreserved,
    Begin => "BEGIN": Unreserved,
    Between => "BETWEEN": Reserved,
    Bigint => "BIGINT": Reserved,
    Binary => "BINARY": Reserved,
    Bit => "BIT": Unreserved,
    BitAnd => "BIT_AND": Function,
    BitOr => "BIT_OR": Function,
    BitXor => "BIT_XOR": Function,
    Blob => "BLOB": Reserved,
    Bool => "BOOL": Unreserved,
    Boolean => "BOOLEAN": Unreserved,
    Both => "BOTH": Reserved,
    Btree => "BTREE": Unreserved,
    Buckets => "BUCKETS": Unreserved,
    By => "BY": Reserved,
    Cache => "CACHE": Unreserved,
    Call => "CALL": Reserved,
    Cancel => "CANCEL": Unreserved,
    Cascade => "CASCADE": Reserved,
    Cascaded => "CASCADED": Unreserved,
    Case => "CASE": Reserved,
    Cast => "CAST": Function,
    Chain => "CHAIN": Unreserved,
    Change => "CHANGE": Reserved,
    Char => "CHAR": Reserved,
    Character => "CHARACTER": Reserved,
    Charset => "CHARSET": Unreserved,
    Check => "CHECK": Reserved,
    Checksum => "CHECKSUM": Unreserved,
    Cipher => "CIPHER": Unreserved,
    Cleanup => "CLEANUP": Unreserved,
    Cluster => "CLUSTER": Unreserved,
    Clustered => "CLUSTERED": Unreserved,
    Coalesce => "COALESCE": Unreserved,
    Collate => "COLLATE": Reserved,
    Collation => "COLLATION": Unreserved,
    Column => "COLUMN": Reserved,
    Columns => "COLUMNS": Unreserved,
    Comment => "COMMENT": Unreserved,
    Commit => "COMMIT": Unreserved,
    Committed => "COMMITTED": Unreserved,
    Compact => "COMPACT": Unreserved,
    Compressed => "COMPRESSED": Unreserved,
    Compression => "COMPRESSION": Unreserved,
    Concurrent => "CONCURRENT": Unreserved,
    Connection => "CONNECTION": Unreserved,
    Consistent => "CONSISTENT": Unreserved,
    Constraint => "CONSTRAINT": Reserved,
    Convert => "CONVERT": Reserved,
    Count => "COUNT": Function,
    Create => "CREATE": Reserved,
    Cross => "CROSS": Reserved,
    CumeDist => "CUME_DIST": Reserved,
    Curdate => "CURDATE": Function,
    Current => "CURRENT": Unreserved,
    CurrentDate => "CURRENT_DATE": Reserved,
    CurrentTime => "CURRENT_TIME": Reserved,
    CurrentTimestamp => "CURRENT_TIMESTAMP": Reserved,
    CurrentUser => "CURRENT_USER": Reserved,
    Curtime => "CURTIME": Function,
    Cycle => "CYCLE": Unreserved,
    Data => "DATA": Unreserved,
    Database => "DATABASE": Reserved,
    Databases => "DATABASES": Reserved,
    Date => "DATE": Unreserved,
    Datetime => "DATETIME": Unreserved,
    DateAdd => "DATE_ADD": Function,
    DateSub => "DATE_SUB": Function,
    Day => "DAY": Unreserved,
    DayHour => "DAY_HOUR": Reserved,
    DayMicrosecond => "DAY_MICROSECOND": Reserved,
    DayMinute => "DAY_MINUTE": Reserved,
    DaySecond => "DAY_SECOND": Reserved,
    Ddl => "DDL": Unreserved,
    Deallocate => "DEALLOCATE": Unreserved,
    Decimal => "DECIMAL": Reserved,
    Default => "DEFAULT": Reserved,
    Definer => "DEFINER": Unreserved,
    Delayed => "DELAYED": Reserved,
    Delete => "DELETE": Reserved,
    DenseRank => "DENSE_RANK": Reserved,
    Desc => "DESC": Reserved,
    Describe => "DESCRIBE": Reserved,
    Directory => "DIRECTORY": Unreserved,
    Distinct => "DISTINCT": Reserved,
    Distinctrow => "DISTINCTROW": Reserved,
    Div => "DIV": Reserved,
    Do => "DO": Unreserved,
    Double => "DOUBLE": Reserved,
    Drop => "DROP": Reserved,
    Dual => "DUAL": Reserved,
    Dumpfile => "DUMPFILE": Unreserved,
    Duplicate => "DUPLICATE": Unreserved,
    Dynamic => "DYNAMIC": Unreserved,
    Else => "ELSE": Reserved,
    Empty => "EMPTY": Reserved,
    Enclosed => "ENCLOSED": Reserved,
    Encryption => "ENCRYPTION": Unreserved,
    End => "END": Unreserved,
    Enforced => "ENFORCED": Unreserved,
    Engine => "ENGINE": Unreserved,
    Engines => "ENGINES": Unreserved,
    Enum => "ENUM": Unreserved,
    Error => "ERROR": Unreserved,
    Errors => "ERRORS": Unreserved,
    Escape => "ESCAPE": Unreserved,
    Escaped => "ESCAPED": Reserved,
    Except => "EXCEPT": Reserved,
    Exchange => "EXCHANGE": Unreserved,
    Execute => "EXECUTE": Unreserved,
    Exists => "EXISTS": Reserved,
    Expansion => "EXPANSION": Unreserved,
    Expire => "EXPIRE": Unreserved,
    Explain => "EXPLAIN": Reserved,
    Extended => "EXTENDED": Unreserved,
    Extract => "EXTRACT": Function,
    FailedLoginAttempts => "FAILED_LOGIN_ATTEMPTS": Unreserved,
    False => "FALSE": Reserved,
    Fields => "FIELDS": Unreserved,
    First => "FIRST": Unreserved,
    FirstValue => "FIRST_VALUE": Reserved,
    Fixed => "FIXED": Unreserved,
    Flashback => "FLASHBACK": Unreserved,
    Float => "FLOAT": Reserved,
    Flush => "FLUSH": Unreserved,
    Following => "FOLLOWING": Unreserved,
    For => "FOR": Reserved,
    Force => "FORCE": Reserved,
    Foreign => "FOREIGN": Reserved,
    Format => "FORMAT": Unreserved,
    From => "FROM": Reserved,
    Full => "FULL": Unreserved,
    Fulltext => "FULLTEXT": Reserved,
    Function => "FUNCTION": Unreserved,
    Generated => "GENERATED": Reserved,
    Global => "GLOBAL": Unreserved,
    Grant => "GRANT": Reserved,
    Grants => "GRANTS": Unreserved,
    Group => "GROUP": Reserved,
    Groups => "GROUPS": Reserved,
    GroupConcat => "GROUP_CONCAT": Function,
    Hash => "HASH": Unreserved,
    Having => "HAVING": Reserved,
    HighPriority => "HIGH_PRIORITY": Reserved,
    History => "HISTORY": Unreserved,
    Hour => "HOUR": Unreserved,
    HourMicrosecond => "HOUR_MICROSECOND": Reserved,
    HourMinute => "HOUR_MINUTE": Reserved,
    HourSecond => "HOUR_SECOND": Reserved,
    Identified => "IDENTIFIED": Unreserved,
    If => "IF": Reserved,
    Ignore => "IGNORE": Reserved,
    In => "IN": Reserved,
    Increment => "INCREMENT": Unreserved,
    Index => "INDEX": Reserved,
    Indexes => "INDEXES": Unreserved,
    Infile => "INFILE": Reserved,
    Inner => "INNER": Reserved,
    Insert => "INSERT": Reserved,
    Int => "INT": Reserved,
    Integer => "INTEGER": Reserved,
    Intersect => "INTERSECT": Reserved,
    Interval => "INTERVAL": Reserved,
    Into => "INTO": Reserved,
    Invisible => "INVISIBLE": Unreserved,
    Invoker => "INVOKER": Unreserved,
    Is => "IS": Reserved,
    Isolation => "ISOLATION": Unreserved,
    Issuer => "ISSUER": Unreserved,
    Job => "JOB": Unreserved,
    Jobs => "JOBS": Unreserved,
    Join => "JOIN": Reserved,
    Json => "JSON": Unreserved,
    JsonArrayagg => "JSON_ARRAYAGG": Unreserved,
    JsonObjectagg => "JSON_OBJECTAGG": Unreserved,
    JsonTable => "JSON_TABLE": Reserved,
    Key => "KEY": Reserved,
    Keys => "KEYS": Reserved,
    KeyBlockSize => "KEY_BLOCK_SIZE": Unreserved,
    Kill => "KILL": Reserved,
    Lag => "LAG": Reserved,
    Language => "LANGUAGE": Unreserved,
    Last => "LAST": Unreserved,
    LastValue => "LAST_VALUE": Reserved,
    Lateral => "LATERAL": Reserved,
    Lead => "LEAD": Reserved,
    Leading => "LEADING": Reserved,
    Left => "LEFT": Reserved,
    Less => "LESS": Unreserved,
    Level => "LEVEL": Unreserved,
    Like => "LIKE": Reserved,
    Limit => "LIMIT": Reserved,
    Linear => "LINEAR": Reserved,
    Lines => "LINES": Reserved,
    List => "LIST": Unreserved,
    Load => "LOAD": Reserved,
    Local => "LOCAL": Unreserved,
    Localtime => "LOCALTIME": Reserved,
    Localtimestamp => "LOCALTIMESTAMP": Reserved,
    Lock => "LOCK": Reserved,
    Locked => "LOCKED": Unreserved,
    Logs => "LOGS": Unreserved,
    Longblob => "LONGBLOB": Reserved,
    Longtext => "LONGTEXT": Reserved,
    LowPriority => "LOW_PRIORITY": Reserved,
    Match => "MATCH": Reserved,
    Max => "MAX": Function,
    Maxvalue => "MAXVALUE": Reserved,
    MaxConnectionsPerHour => "MAX_CONNECTIONS_PER_HOUR": Unreserved,
    MaxQueriesPerHour => "MAX_QUERIES_PER_HOUR": Unreserved,
    MaxRows => "MAX_ROWS": Unreserved,
    MaxUpdatesPerHour => "MAX_UPDATES_PER_HOUR": Unreserved,
    MaxUserConnections => "MAX_USER_CONNECTIONS": Unreserved,
    Mediumblob => "MEDIUMBLOB": Reserved,
    Mediumint => "MEDIUMINT": Reserved,
    Mediumtext => "MEDIUMTEXT": Reserved,
    Member => "MEMBER": Unreserved,
    Merge => "MERGE": Unreserved,
    Microsecond => "MICROSECOND": Unreserved,
    Mid => "MID": Function,
    Min => "MIN": Function,
    Minute => "MINUTE": Unreserved,
    MinuteMicrosecond => "MINUTE_MICROSECOND": Reserved,
    MinuteSecond => "MINUTE_SECOND": Reserved,
    Minvalue => "MINVALUE": Unreserved,
    MinRows => "MIN_ROWS": Unreserved,
    Mod => "MOD": Reserved,
    Mode => "MODE": Unreserved,
    Modify => "MODIFY": Unreserved,
    Month => "MONTH": Unreserved,
    Names => "NAMES": Unreserved,
    National => "NATIONAL": Unreserved,
    Natural => "NATURAL": Reserved,
    Nested => "NESTED": Unreserved,
    Never => "NEVER": Unreserved,
    NextRowId => "NEXT_ROW_ID": Unreserved,
    No => "NO": Unreserved,
    Nocache => "NOCACHE": Unreserved,
    Nocycle => "NOCYCLE": Unreserved,
    Nomaxvalue => "NOMAXVALUE": Unreserved,
    Nominvalue => "NOMINVALUE": Unreserved,
    Nonclustered => "NONCLUSTERED": Unreserved,
    None => "NONE": Unreserved,
    Not => "NOT": Reserved,
    Now => "NOW": Function,
    Nowait => "NOWAIT": Unreserved,
    NoWriteToBinlog => "NO_WRITE_TO_BINLOG": Reserved,
    NthValue => "NTH_VALUE": Reserved,
    Ntile => "NTILE": Reserved,
    Null => "NULL": Reserved,
    Nulls => "NULLS": Unreserved,
    Numeric => "NUMERIC": Reserved,
    Of => "OF": Reserved,
    Offset => "OFFSET": Unreserved,
    On => "ON": Reserved,
    Only => "ONLY": Unreserved,
    Optimistic => "OPTIMISTIC": Unreserved,
    Option => "OPTION": Reserved,
    Optionally => "OPTIONALLY": Reserved,
    Or => "OR": Reserved,
    Order => "ORDER": Reserved,
    Ordinality => "ORDINALITY": Unreserved,
    Outer => "OUTER": Reserved,
    Outfile => "OUTFILE": Reserved,
    Over => "OVER": Reserved,
    Parser => "PARSER": Unreserved,
    Partial => "PARTIAL": Unreserved,
    Partition => "PARTITION": Reserved,
    Partitioning => "PARTITIONING": Unreserved,
    Partitions => "PARTITIONS": Unreserved,
    Password => "PASSWORD": Unreserved,
    PasswordLockTime => "PASSWORD_LOCK_TIME": Unreserved,
    Path => "PATH": Unreserved,
    Pause => "PAUSE": Unreserved,
    PercentRank => "PERCENT_RANK": Reserved,
    Persist => "PERSIST": Unreserved,
    PersistOnly => "PERSIST_ONLY": Unreserved,
    Pessimistic => "PESSIMISTIC": Unreserved,
    Plugins => "PLUGINS": Unreserved,
    Position => "POSITION": Function,
    Preceding => "PRECEDING": Unreserved,
    Precision => "PRECISION": Reserved,
    Prepare => "PREPARE": Unreserved,
    PreSplitRegions => "PRE_SPLIT_REGIONS": Unreserved,
    Primary => "PRIMARY": Reserved,
    Privileges => "PRIVILEGES": Unreserved,
    Procedure => "PROCEDURE": Reserved,
    Processlist => "PROCESSLIST": Unreserved,
    Quarter => "QUARTER": Unreserved,
    Queries => "QUERIES": Unreserved,
    Query => "QUERY": Unreserved,
    Quick => "QUICK": Unreserved,
    Range => "RANGE": Reserved,
    Rank => "RANK": Reserved,
    Read => "READ": Reserved,
    Real => "REAL": Reserved,
    Recover => "RECOVER": Unreserved,
    Recursive => "RECURSIVE": Reserved,
    Redundant => "REDUNDANT": Unreserved,
    References => "REFERENCES": Reserved,
    Regexp => "REGEXP": Reserved,
    Regions => "REGIONS": Unreserved,
    Release => "RELEASE": Reserved,
    Remove => "REMOVE": Unreserved,
    Rename => "RENAME": Reserved,
    Reorganize => "REORGANIZE": Unreserved,
    Repeatable => "REPEATABLE": Unreserved,
    Replace => "REPLACE": Reserved,
    Require => "REQUIRE": Reserved,
    Respect => "RESPECT": Unreserved,
    Restore => "RESTORE": Unreserved,
    Restrict => "RESTRICT": Reserved,
    Resume => "RESUME": Unreserved,
    Reuse => "REUSE": Unreserved,
    Revoke => "REVOKE": Reserved,
    Right => "RIGHT": Reserved,
    Rlike => "RLIKE": Reserved,
    Role => "ROLE": Unreserved,
    Rollback => "ROLLBACK": Unreserved,
    Rollup => "ROLLUP": Unreserved,
    Row => "ROW": Reserved,
    Rows => "ROWS": Reserved,
    RowFormat => "ROW_FORMAT": Unreserved,
    RowNumber => "ROW_NUMBER": Reserved,
    Samples => "SAMPLES": Unreserved,
    Savepoint => "SAVEPOINT": Unreserved,
    Schema => "SCHEMA": Reserved,
    Schemas => "SCHEMAS": Reserved,
    Second => "SECOND": Unreserved,
    SecondMicrosecond => "SECOND_MICROSECOND": Reserved,
    Security => "SECURITY": Unreserved,
    Select => "SELECT": Reserved,
    Separator => "SEPARATOR": Reserved,
    Sequence => "SEQUENCE": Unreserved,
    Serial => "SERIAL": Unreserved,
    Serializable => "SERIALIZABLE": Unreserved,
    Session => "SESSION": Unreserved,
    SessionUser => "SESSION_USER": Function,
    Set => "SET": Reserved,
    ShardRowIdBits => "SHARD_ROW_ID_BITS": Unreserved,
    Share => "SHARE": Unreserved,
    Show => "SHOW": Reserved,
    Signed => "SIGNED": Unreserved,
    Simple => "SIMPLE": Unreserved,
    Skip => "SKIP": Unreserved,
    Smallint => "SMALLINT": Reserved,
    Snapshot => "SNAPSHOT": Unreserved,
    Some => "SOME": Unreserved,
    Spatial => "SPATIAL": Reserved,
    Split => "SPLIT": Unreserved,
    Sql => "SQL": Reserved,
    SqlBigResult => "SQL_BIG_RESULT": Reserved,
    SqlBufferResult => "SQL_BUFFER_RESULT": Unreserved,
    SqlCache => "SQL_CACHE": Unreserved,
    SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS": Reserved,
    SqlNoCache => "SQL_NO_CACHE": Unreserved,
    SqlSmallResult => "SQL_SMALL_RESULT": Reserved,
    Ssl => "SSL": Reserved,
    Start => "START": Unreserved,
    Starting => "STARTING": Reserved,
    Status => "STATUS": Unreserved,
    Std => "STD": Function,
    Stddev => "STDDEV": Function,
    StddevPop => "STDDEV_POP": Function,
    StddevSamp => "STDDEV_SAMP": Function,
    Storage => "STORAGE": Unreserved,
    Stored => "STORED": Reserved,
    StraightJoin => "STRAIGHT_JOIN": Reserved,
    Subdate => "SUBDATE": Function,
    Subject => "SUBJECT": Unreserved,
    Subpartition => "SUBPARTITION": Unreserved,
    Subpartitions => "SUBPARTITIONS": Unreserved,
    Substr => "SUBSTR": Function,
    Substring => "SUBSTRING": Function,
    Sum => "SUM": Function,
    Sysdate => "SYSDATE": Function,
    SystemUser => "SYSTEM_USER": Function,
    Table => "TABLE": Reserved,
    Tables => "TABLES": Unreserved,
    Tablespace => "TABLESPACE": Unreserved,
    Temporary => "TEMPORARY": Unreserved,
    Temptable => "TEMPTABLE": Unreserved,
    Terminated => "TERMINATED": Reserved,
    Text => "TEXT": Unreserved,
    Than => "THAN": Unreserved,
    Then => "THEN": Reserved,
    Tidb => "TIDB": Unreserved,
    Time => "TIME": Unreserved,
    Timestamp => "TIMESTAMP": Unreserved,
    Tinyblob => "TINYBLOB": Reserved,
    Tinyint => "TINYINT": Reserved,
    Tinytext => "TINYTEXT": Reserved,
    To => "TO": Reserved,
    Topn => "TOPN": Unreserved,
    Trailing => "TRAILING": Reserved,
    Transaction => "TRANSACTION": Unreserved,
    Triggers => "TRIGGERS": Unreserved,
    Trim => "TRIM": Function,
    True => "TRUE": Reserved,
    Truncate => "TRUNCATE": Unreserved,
    Ttl => "TTL": Unreserved,
    Unbounded => "UNBOUNDED": Unreserved,
    Uncommitted => "UNCOMMITTED": Unreserved,
    Undefined => "UNDEFINED": Unreserved,
    Union => "UNION": Reserved,
    Unique => "UNIQUE": Reserved,
    Unknown => "UNKNOWN": Unreserved,
    Unlock => "UNLOCK": Reserved,
    Unsigned => "UNSIGNED": Reserved,
    Update => "UPDATE": Reserved,
    Usage => "USAGE": Reserved,
    Use => "USE": Reserved,
    User => "USER": Unreserved,
    Using => "USING": Reserved,
    UtcDate => "UTC_DATE": Reserved,
    UtcTime => "UTC_TIME": Reserved,
    UtcTimestamp => "UTC_TIMESTAMP": Reserved,
    Validation => "VALIDATION": Unreserved,
    Value => "VALUE": Unreserved,
    Values => "VALUES": Reserved,
    Varbinary => "VARBINARY": Reserved,
    Varchar => "VARCHAR": Reserved,
    Variables => "VARIABLES": Unreserved,
    Variance => "VARIANCE": Function,
    Varying => "VARYING": Reserved,
    VarPop => "VAR_POP": Function,
    VarSamp => "VAR_SAMP": Function,
    View => "VIEW": Unreserved,
    Virtual => "VIRTUAL": Reserved,
    Visible => "VISIBLE": Unreserved,
    Warnings => "WARNINGS": Unreserved,
    Week => "WEEK": Unreserved,
    When => "WHEN": Reserved,
    Where => "WHERE": Reserved,
    Window => "WINDOW": Reserved,
    With => "WITH": Reserved,
    Without => "WITHOUT": Unreserved,
    Work => "WORK": Unreserved,
    Write => "WRITE": Reserved,
    X509 => "X509": Unreserved,
    Xor => "XOR": Reserved,
    Year => "YEAR": Unreserved,
    YearMonth => "YEAR_MONTH": Reserved,
    Zerofill => "ZEROFILL": Reserved,
}

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        for keyword in Keyword::ALL {
            map.insert(keyword.as_str(), *keyword);
        }
        map
    };
}

impl Keyword {
    /// Case-insensitive lookup of a word.
    pub fn lookup(word: &str) -> Option<Keyword> {
        if word.len() > 32 {
            return None;
        }
        KEYWORD_LOOKUP.get(word.to_ascii_uppercase().as_str()).copied()
    }

    pub fn is_reserved(self) -> bool {
        self.class() == KeywordClass::Reserved
    }

    pub fn is_function(self) -> bool {
        self.class() == KeywordClass::Function
    }

    /// Temporal units accepted after `INTERVAL`, in `EXTRACT` and in
    /// date arithmetic functions.
    pub fn is_interval_unit(self) -> bool {
        matches!(
            self,
            Keyword::Microsecond
                | Keyword::Second
                | Keyword::Minute
                | Keyword::Hour
                | Keyword::Day
                | Keyword::Week
                | Keyword::Month
                | Keyword::Quarter
                | Keyword::Year
                | Keyword::SecondMicrosecond
                | Keyword::MinuteMicrosecond
                | Keyword::MinuteSecond
                | Keyword::HourMicrosecond
                | Keyword::HourSecond
                | Keyword::HourMinute
                | Keyword::DayMicrosecond
                | Keyword::DaySecond
                | Keyword::DayMinute
                | Keyword::DayHour
                | Keyword::YearMonth
        )
    }

    /// Keywords after which a `/*+ ... */` comment is an optimizer hint.
    pub fn takes_hint(self) -> bool {
        matches!(
            self,
            Keyword::Select | Keyword::Insert | Keyword::Update | Keyword::Delete | Keyword::Replace
        )
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
