//! # ora-inspect
//!
//! Oracle catalog introspection and type normalization.
//!
//! This library reads Oracle's data dictionary into a canonical schema model
//! with support for:
//!
//! - **Realm, schema and table inspection** through any [`QueryExecutor`]
//! - **Type normalization** between native spellings and [`ColumnType`]
//! - **Default classification** of column defaults into literals and raw expressions
//! - **Reference linking** of columns, indexes, foreign keys and schemas
//! - **Schema documents** in YAML or JSON that round-trip through the model
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ora_inspect::{Inspector, QueryExecutor, SchemaInspector, Session};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn dump(executor: Arc<dyn QueryExecutor>) -> ora_inspect::Result<()> {
//!     let cancel = CancellationToken::new();
//!     let session = Session::open(executor, &cancel).await?;
//!     let inspector = Inspector::new(&session);
//!     let realm = inspector.inspect_realm(&cancel, None).await?;
//!     println!("{}", ora_inspect::Document::from_realm(&realm).to_yaml()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod dialect;
pub mod document;
pub mod error;
pub mod inspect;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use config::InspectConfig;
pub use core::{
    Check, Column, ColumnType, DefaultExpr, ForeignKey, Index, InspectOptions,
    InspectRealmOptions, InspectTableOptions, QueryExecutor, Realm, Schema, SchemaInspector,
    Table,
};
pub use dialect::{classify_default, format_type, parse_type, TYPE_NAMES};
pub use document::Document;
pub use error::{InspectError, Result};
pub use inspect::Inspector;
pub use session::{OracleVersion, Session};
