//! Typed descriptors for the rows of the dictionary queries.

use crate::core::value::{CatalogRow, RowError};

/// Row of [`TABLE_QUERY`](super::queries::TABLE_QUERY).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub owner: String,
    pub name: String,
    pub comment: Option<String>,
}

impl TableRow {
    pub fn from_row(row: &CatalogRow) -> Result<Self, RowError> {
        Ok(Self {
            owner: row.string(0)?,
            name: row.string(1)?,
            comment: row.opt_string(2)?,
        })
    }
}

/// Row of [`COLUMNS_QUERY`](super::queries::COLUMNS_QUERY).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub size: i64,
    pub precision: i64,
    pub scale: i64,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub udt_owner: Option<String>,
    pub identity: bool,
    pub identity_start: Option<i64>,
    pub identity_increment: Option<i64>,
    pub generation: Option<String>,
    pub comment: Option<String>,
}

impl ColumnRow {
    pub fn from_row(row: &CatalogRow) -> Result<Self, RowError> {
        Ok(Self {
            name: row.string(0)?,
            data_type: row.string(1)?,
            nullable: row.flag(2)?,
            // DATA_DEFAULT keeps whatever whitespace followed the expression
            // in the DDL.
            default: row
                .opt_string(3)?
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            size: row.opt_i64(4)?.unwrap_or(0),
            precision: row.opt_i64(5)?.unwrap_or(0),
            scale: row.opt_i64(6)?.unwrap_or(0),
            charset: row.opt_string(7)?,
            collation: row.opt_string(8)?,
            udt_owner: row.opt_string(9)?,
            identity: row.flag(10)?,
            identity_start: row.opt_i64(11)?,
            identity_increment: row.opt_i64(12)?,
            generation: row.opt_string(13)?,
            comment: row.opt_string(14)?,
        })
    }
}

/// Row of [`INDEXES_QUERY`](super::queries::INDEXES_QUERY), one per index part.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub name: String,
    pub index_type: String,
    pub column: Option<String>,
    pub primary: bool,
    pub unique: bool,
    pub constraint_type: Option<String>,
    pub predicate: Option<String>,
    pub expression: Option<String>,
    pub asc: bool,
    pub desc: bool,
    pub nulls_first: bool,
    pub nulls_last: bool,
    pub comment: Option<String>,
}

impl IndexRow {
    pub fn from_row(row: &CatalogRow) -> Result<Self, RowError> {
        Ok(Self {
            name: row.string(0)?,
            index_type: row.opt_string(1)?.unwrap_or_default(),
            column: row.opt_string(2)?,
            primary: row.flag(3)?,
            unique: row.flag(4)?,
            constraint_type: row.opt_string(5)?,
            predicate: row.opt_string(6)?,
            expression: row
                .opt_string(7)?
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            asc: row.flag(8)?,
            desc: row.flag(9)?,
            nulls_first: row.flag(10)?,
            nulls_last: row.flag(11)?,
            comment: row.opt_string(12)?,
        })
    }
}

/// Row of [`FKS_QUERY`](super::queries::FKS_QUERY), one per column pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRow {
    pub symbol: String,
    pub table: String,
    pub column: String,
    pub schema: String,
    pub ref_table: String,
    pub ref_column: String,
    pub ref_schema: String,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
}

impl ForeignKeyRow {
    pub fn from_row(row: &CatalogRow) -> Result<Self, RowError> {
        Ok(Self {
            symbol: row.string(0)?,
            table: row.string(1)?,
            column: row.string(2)?,
            schema: row.string(3)?,
            ref_table: row.string(4)?,
            ref_column: row.string(5)?,
            ref_schema: row.string(6)?,
            update_rule: row.opt_string(7)?,
            delete_rule: row.opt_string(8)?,
        })
    }
}

/// Row of [`CHECKS_QUERY`](super::queries::CHECKS_QUERY), one per column.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRow {
    pub name: String,
    pub expr: String,
    pub column: Option<String>,
    pub no_inherit: bool,
}

impl CheckRow {
    pub fn from_row(row: &CatalogRow) -> Result<Self, RowError> {
        Ok(Self {
            name: row.string(0)?,
            expr: row.string(1)?,
            column: row.opt_string(2)?,
            no_inherit: row.flag(3)?,
        })
    }
}
