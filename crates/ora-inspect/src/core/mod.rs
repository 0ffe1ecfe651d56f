//! Core abstractions for catalog inspection.
//!
//! - [`schema`]: realm, schema, table, column, index and constraint model
//! - [`value`]: catalog values and rows returned by a query executor
//! - [`traits`]: the executor seam and the inspector interface

pub mod schema;
pub mod traits;
pub mod value;

pub use schema::{
    Check, Column, ColumnType, DefaultExpr, ForeignKey, Identity, Index, IndexColumnProperty,
    IndexPart, IndexTarget, Realm, RealmAttrs, ReferenceOption, Schema, SchemaRef, Sequence,
    Table,
};
pub use traits::{
    InspectOptions, InspectRealmOptions, InspectTableOptions, QueryExecutor, SchemaInspector,
};
pub use value::{CatalogRow, CatalogValue, RowError};
