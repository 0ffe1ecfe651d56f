//! Core traits for catalog inspection.
//!
//! - [`QueryExecutor`]: runs parameterized catalog queries and returns rows
//! - [`SchemaInspector`]: builds realms, schemas and tables from the catalog
//!
//! The executor is the only seam towards a live database. Connection handling,
//! pooling and retries belong to its implementations.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{ExecutorError, Result};

use super::schema::{Realm, Schema, Table};
use super::value::{CatalogRow, CatalogValue};

/// Executes parameterized queries against the database.
///
/// Positional parameters are bound as `:1`, `:2`, ... in the order of `args`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a query and collect its rows.
    async fn query(
        &self,
        sql: &str,
        args: &[CatalogValue],
    ) -> std::result::Result<Vec<CatalogRow>, ExecutorError>;
}

/// Options for realm inspection.
#[derive(Debug, Clone, Default)]
pub struct InspectRealmOptions {
    /// Schemas to inspect. Empty means every accessible schema.
    pub schemas: Vec<String>,
    /// Tables to inspect in each schema. Empty means every table.
    pub tables: Vec<String>,
}

/// Options for schema inspection.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    /// Tables to inspect. Empty means every table.
    pub tables: Vec<String>,
}

/// Options for standalone table inspection.
#[derive(Debug, Clone, Default)]
pub struct InspectTableOptions {
    /// Owning schema. Defaults to the session's current schema.
    pub schema: Option<String>,
}

/// Builds the canonical schema model from a catalog.
///
/// Every call owns a fresh object graph. A fired cancellation token abandons
/// the in-flight query and fails the whole call.
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Inspect every accessible schema, or the filtered subset.
    async fn inspect_realm(
        &self,
        cancel: &CancellationToken,
        opts: Option<&InspectRealmOptions>,
    ) -> Result<Realm>;

    /// Inspect one schema. An empty name selects the session's current schema.
    async fn inspect_schema(
        &self,
        cancel: &CancellationToken,
        name: &str,
        opts: Option<&InspectOptions>,
    ) -> Result<Schema>;

    /// Inspect a single table outside of any realm.
    async fn inspect_table(
        &self,
        cancel: &CancellationToken,
        name: &str,
        opts: Option<&InspectTableOptions>,
    ) -> Result<Table>;
}
