//! Conversion between native type spellings and the canonical [`ColumnType`].
//!
//! A dialect implements both directions:
//! - [`ToCanonical`]: catalog descriptor or user-written type string → canonical type
//! - [`FromCanonical`]: canonical type → native DDL spelling
//!
//! ```text
//! ALL_TAB_COLUMNS row  →  ColumnDesc  →  ColumnType  →  "varchar2(255)"
//! ```

use crate::core::schema::ColumnType;
use crate::error::Result;

/// Raw type information of one column, as read from the catalog or produced
/// by tokenizing a type expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDesc {
    /// Native type name, possibly with parenthesized facets
    /// (`VARCHAR2`, `TIMESTAMP(6) WITH TIME ZONE`).
    pub typ: String,
    /// Character or byte length.
    pub size: i64,
    /// Numeric precision.
    pub precision: i64,
    /// Numeric scale.
    pub scale: i64,
    /// Owner of the type when it is an object type.
    pub udt_owner: Option<String>,
}

impl ColumnDesc {
    /// Create a descriptor without facets.
    pub fn new(typ: impl Into<String>) -> Self {
        Self {
            typ: typ.into(),
            ..Default::default()
        }
    }
}

/// Maps native type information to canonical types.
pub trait ToCanonical: Send + Sync {
    /// Dialect name (e.g. "oracle").
    fn dialect_name(&self) -> &str;

    /// Map a catalog descriptor to a canonical type.
    ///
    /// Never fails: types without a canonical form become
    /// [`ColumnType::Unsupported`].
    fn to_canonical(&self, desc: &ColumnDesc) -> ColumnType;

    /// Parse a user-written type expression such as `number(10,2)`.
    fn parse(&self, expr: &str) -> Result<ColumnType>;
}

/// Maps canonical types back to native spellings.
pub trait FromCanonical: Send + Sync {
    /// Dialect name (e.g. "oracle").
    fn dialect_name(&self) -> &str;

    /// Spell a canonical type as native DDL.
    fn format(&self, column_type: &ColumnType) -> Result<String>;
}
