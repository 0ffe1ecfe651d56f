//! Canonical schema model: realms, schemas, tables, columns, indexes and constraints.
//!
//! Ownership is strictly top-down: a [`Realm`] owns its schemas, a [`Schema`]
//! owns its tables, a [`Table`] owns its columns, indexes and constraints.
//! Upward and sideways links (table to schema, column to the indexes that use
//! it) are plain names filled in by the linker in [`crate::inspect::link`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session-level attributes captured when the connection was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAttrs {
    /// Linguistic sort (`NLS_SORT`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    /// Database character set (`NLS_CHARACTERSET`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctype: Option<String>,
}

/// All schemas visible in one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Realm {
    /// Schemas in discovery order.
    pub schemas: Vec<Schema>,

    /// Realm attributes.
    #[serde(default)]
    pub attrs: RealmAttrs,
}

impl Realm {
    /// Look up a schema by name.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Look up a table by schema and table name.
    pub fn table(&self, schema: &str, table: &str) -> Option<&Table> {
        self.schema(schema).and_then(|s| s.table(table))
    }
}

/// A named collection of tables (an Oracle user).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name.
    pub name: String,

    /// Tables in discovery order.
    pub tables: Vec<Table>,

    /// Attributes of the realm the schema belongs to. Set once by the linker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<RealmAttrs>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Non-owning reference from a table to its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    pub name: String,
}

impl SchemaRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Table metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Owning schema. Assigned by the linker, or synthesized for standalone
    /// table inspection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    /// Column definitions in column_id order.
    pub columns: Vec<Column>,

    /// Primary key index, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Index>,

    /// Non-primary-key indexes.
    #[serde(default)]
    pub indexes: Vec<Index>,

    /// Foreign key constraints.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// Check constraints.
    #[serde(default)]
    pub checks: Vec<Check>,

    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name of the owning schema, if linked.
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.name.as_str())
    }

    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        match self.schema_name() {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column by name for mutation.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Look up an index (primary key included) by name.
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.all_indexes().find(|i| i.name == name)
    }

    /// Iterate over the primary key followed by the other indexes.
    pub fn all_indexes(&self) -> impl Iterator<Item = &Index> {
        self.primary_key.iter().chain(self.indexes.iter())
    }

    /// Look up a foreign key by constraint name.
    pub fn foreign_key(&self, symbol: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.symbol == symbol)
    }

    /// Look up a check constraint by name.
    pub fn check(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        self.primary_key.is_some()
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Canonical type.
    #[serde(rename = "type")]
    pub data_type: ColumnType,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultExpr>,

    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Character set (`CHAR_CS` / `NCHAR_CS`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Column collation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    /// Identity column settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,

    /// Names of the indexes using this column. Filled in by the linker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<String>,

    /// Names of the foreign keys using this column. Filled in by the linker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<String>,
}

impl Column {
    /// Create a nullable column without attributes.
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default: None,
            comment: None,
            charset: None,
            collation: None,
            identity: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }
}

/// Canonical column type.
///
/// Every variant keeps the native type name (`t`) as reported by the catalog
/// or written by the user, next to the facets needed to spell it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnType {
    /// Integer type (`int`).
    Integer { t: String },

    /// Character type (`char`, `nchar`, `varchar2`, `nvarchar2`).
    String { t: String, size: i64 },

    /// Exact numeric type (`number`).
    Decimal { t: String, precision: i64, scale: i64 },

    /// Approximate numeric type (`float`, `binary_double`, ...).
    Float { t: String, precision: i64 },

    /// Date and timestamp types.
    Time { t: String },

    /// Native JSON type.
    Json { t: String },

    /// Raw binary type.
    Binary { t: String, size: i64 },

    /// Type read from the catalog that has no canonical representation
    /// (intervals, LOBs, rowid, ...).
    Unsupported { t: String },

    /// Type name not known to the dialect, assumed to be user-defined.
    UserDefined { t: String },
}

impl ColumnType {
    /// The native type name carried by the variant.
    pub fn native_name(&self) -> &str {
        match self {
            ColumnType::Integer { t }
            | ColumnType::String { t, .. }
            | ColumnType::Decimal { t, .. }
            | ColumnType::Float { t, .. }
            | ColumnType::Time { t }
            | ColumnType::Json { t }
            | ColumnType::Binary { t, .. }
            | ColumnType::Unsupported { t }
            | ColumnType::UserDefined { t } => t,
        }
    }

    /// Whether the type holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer { .. } | ColumnType::Decimal { .. } | ColumnType::Float { .. }
        )
    }

    /// Whether the type can be spelled back as DDL.
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            ColumnType::Unsupported { .. } | ColumnType::UserDefined { .. }
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer { t } => write!(f, "Integer({})", t),
            ColumnType::String { t, size } => write!(f, "String({}, size={})", t, size),
            ColumnType::Decimal {
                t,
                precision,
                scale,
            } => write!(f, "Decimal({}, precision={}, scale={})", t, precision, scale),
            ColumnType::Float { t, precision } => {
                write!(f, "Float({}, precision={})", t, precision)
            }
            ColumnType::Time { t } => write!(f, "Time({})", t),
            ColumnType::Json { t } => write!(f, "Json({})", t),
            ColumnType::Binary { t, size } => write!(f, "Binary({}, size={})", t, size),
            ColumnType::Unsupported { t } => write!(f, "Unsupported({})", t),
            ColumnType::UserDefined { t } => write!(f, "UserDefined({})", t),
        }
    }
}

/// Column default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultExpr {
    /// A constant value, in SQL literal form (strings keep their quotes).
    Literal(String),

    /// An opaque expression preserved as text.
    Raw(String),
}

impl DefaultExpr {
    /// The stored text of the default.
    pub fn as_str(&self) -> &str {
        match self {
            DefaultExpr::Literal(v) | DefaultExpr::Raw(v) => v,
        }
    }

    /// Whether the default is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, DefaultExpr::Literal(_))
    }
}

/// Identity column settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// `ALWAYS` or `BY DEFAULT`.
    pub generation: String,

    /// Backing sequence options.
    pub sequence: Sequence,
}

/// Sequence options supported on identity columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub start: i64,
    pub increment: i64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            start: 1,
            increment: 1,
        }
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,

    /// Whether the index is unique.
    pub unique: bool,

    /// Key parts, `seq_no` 1..=n.
    pub parts: Vec<IndexPart>,

    /// Access method (`NORMAL`, `BITMAP`, `FUNCTION-BASED NORMAL`, ...).
    pub index_type: String,

    /// Type of the constraint backed by the index (`P`, `U`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<String>,

    /// Partial index predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,

    /// Index comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Index {
    /// Create an index without parts.
    pub fn new(name: impl Into<String>, unique: bool, index_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique,
            parts: Vec::new(),
            index_type: index_type.into(),
            constraint_type: None,
            predicate: None,
            comment: None,
        }
    }

    /// Names of the columns referenced by the index, in key order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| p.column_name())
    }

    /// Append a part with the next sequence number.
    pub fn push_part(&mut self, target: IndexTarget, props: IndexColumnProperty) {
        self.parts.push(IndexPart {
            seq_no: self.parts.len() + 1,
            target,
            props,
        });
    }
}

/// One key part of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPart {
    /// Position in the index, starting at 1.
    pub seq_no: usize,

    /// Column or expression the part is built on.
    pub target: IndexTarget,

    /// Ordering properties.
    #[serde(default)]
    pub props: IndexColumnProperty,
}

impl IndexPart {
    /// Name of the referenced column, if the part is a column.
    pub fn column_name(&self) -> Option<&str> {
        match &self.target {
            IndexTarget::Column(name) => Some(name),
            IndexTarget::Expr(_) => None,
        }
    }
}

/// What an index part is built on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTarget {
    /// A table column, by name.
    Column(String),

    /// A function-based expression.
    Expr(String),
}

/// Ordering properties of an index part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumnProperty {
    pub asc: bool,
    pub desc: bool,
    pub nulls_first: bool,
    pub nulls_last: bool,
}

impl IndexColumnProperty {
    /// Properties of an ascending or descending part, with the dialect's
    /// default NULL placement (NULLS LAST ascending, NULLS FIRST descending).
    pub fn ordered(desc: bool) -> Self {
        Self {
            asc: !desc,
            desc,
            nulls_first: desc,
            nulls_last: !desc,
        }
    }
}

/// Referential action for ON UPDATE / ON DELETE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceOption {
    #[default]
    #[serde(rename = "NO ACTION")]
    NoAction,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

impl ReferenceOption {
    /// Parse a rule as spelled in the dictionary (`NO ACTION`, `SET NULL`, ...).
    pub fn from_rule(rule: &str) -> Option<Self> {
        let normalized = rule.trim().replace('_', " ").to_ascii_uppercase();
        match normalized.as_str() {
            "NO ACTION" => Some(ReferenceOption::NoAction),
            "RESTRICT" => Some(ReferenceOption::Restrict),
            "CASCADE" => Some(ReferenceOption::Cascade),
            "SET NULL" => Some(ReferenceOption::SetNull),
            "SET DEFAULT" => Some(ReferenceOption::SetDefault),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceOption::NoAction => "NO ACTION",
            ReferenceOption::Restrict => "RESTRICT",
            ReferenceOption::Cascade => "CASCADE",
            ReferenceOption::SetNull => "SET NULL",
            ReferenceOption::SetDefault => "SET DEFAULT",
        }
    }
}

impl fmt::Display for ReferenceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Foreign key metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub symbol: String,

    /// Source table name.
    pub table: String,

    /// Source column names, in constraint order.
    pub columns: Vec<String>,

    /// Referenced schema name.
    pub ref_schema: String,

    /// Referenced table name.
    pub ref_table: String,

    /// Referenced column names, in constraint order.
    pub ref_columns: Vec<String>,

    /// ON UPDATE action.
    #[serde(default)]
    pub on_update: ReferenceOption,

    /// ON DELETE action.
    #[serde(default)]
    pub on_delete: ReferenceOption,
}

/// Check constraint metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Constraint name.
    pub name: String,

    /// Search condition text.
    pub expr: String,

    /// Columns used by the condition. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,

    /// NO INHERIT flag.
    #[serde(default)]
    pub no_inherit: bool,
}
