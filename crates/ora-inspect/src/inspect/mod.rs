//! Oracle catalog inspection.
//!
//! The [`Inspector`] issues the dictionary queries of [`queries`] one after
//! another, decodes the rows ([`decode`]), assembles tables ([`assemble`]) and
//! finally resolves cross references ([`link`]).
//!
//! ```text
//! schemas → tables → per table: identity, columns, indexes, foreign keys, checks → link
//! ```

pub mod assemble;
pub mod decode;
pub mod link;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::InspectConfig;
use crate::core::schema::{Realm, RealmAttrs, Schema, SchemaRef, Table};
use crate::core::traits::{
    InspectOptions, InspectRealmOptions, InspectTableOptions, QueryExecutor, SchemaInspector,
};
use crate::core::value::{CatalogRow, CatalogValue, RowError};
use crate::error::{InspectError, Result};
use crate::session::Session;

use decode::{CheckRow, ColumnRow, ForeignKeyRow, IndexRow, TableRow};

/// Run one query, racing it against the cancellation token and an optional
/// deadline.
///
/// Executor failures are wrapped with `op` and `entity`. A fired token or an
/// expired deadline abandons the query and yields [`InspectError::Cancelled`].
pub(crate) async fn run_query(
    executor: &dyn QueryExecutor,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    op: &str,
    entity: &str,
    sql: &str,
    args: &[CatalogValue],
) -> Result<Vec<CatalogRow>> {
    let cancelled = || InspectError::Cancelled(format!("{} {}", op, entity));
    if cancel.is_cancelled() {
        return Err(cancelled());
    }

    let exec = async {
        let fut = executor.query(sql, args);
        let res = match timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(res) => res,
                Err(_) => {
                    return Err(InspectError::Cancelled(format!(
                        "{} {} (deadline of {}s exceeded)",
                        op,
                        entity,
                        limit.as_secs()
                    )))
                }
            },
            None => fut.await,
        };
        res.map_err(|e| InspectError::query(op, entity, e))
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(cancelled()),
        res = exec => res,
    }
}

fn decode_rows<T>(
    rows: &[CatalogRow],
    op: &str,
    entity: &str,
    decode: impl Fn(&CatalogRow) -> std::result::Result<T, RowError>,
) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| decode(row).map_err(|e| InspectError::decode(op, entity, e)))
        .collect()
}

/// Catalog reader for one Oracle session.
pub struct Inspector {
    executor: Arc<dyn QueryExecutor>,
    attrs: RealmAttrs,
    exclude_schemas: Vec<String>,
    query_timeout: Option<Duration>,
}

impl Inspector {
    /// Create an inspector with the default settings.
    pub fn new(session: &Session) -> Self {
        Self::with_config(session, &InspectConfig::default())
    }

    /// Create an inspector using the schema exclusions and query deadline of
    /// `config`.
    pub fn with_config(session: &Session, config: &InspectConfig) -> Self {
        Self {
            executor: session.executor(),
            attrs: session.attrs().clone(),
            exclude_schemas: config.exclude_schemas.clone(),
            query_timeout: config.query_timeout(),
        }
    }

    async fn query(
        &self,
        cancel: &CancellationToken,
        op: &str,
        entity: &str,
        sql: &str,
        args: &[CatalogValue],
    ) -> Result<Vec<CatalogRow>> {
        run_query(
            self.executor.as_ref(),
            cancel,
            self.query_timeout,
            op,
            entity,
            sql,
            args,
        )
        .await
    }

    async fn current_schema(&self, cancel: &CancellationToken) -> Result<String> {
        let rows = self
            .query(
                cancel,
                "resolving",
                "current schema",
                queries::CURRENT_SCHEMA_QUERY,
                &[],
            )
            .await?;
        if rows.len() != 1 {
            return Err(InspectError::MalformedMetadata(format!(
                "unexpected number of rows for current schema: {} (expected 1)",
                rows.len()
            )));
        }
        rows[0]
            .string(0)
            .map_err(|e| InspectError::decode("resolving", "current schema", e))
    }

    async fn schema_names(&self, cancel: &CancellationToken, names: &[String]) -> Result<Vec<String>> {
        let (sql, args) = queries::schemas_query(names, &self.exclude_schemas);
        let rows = self.query(cancel, "querying", "schemas", &sql, &args).await?;
        decode_rows(&rows, "querying", "schemas", |row| row.string(0))
    }

    async fn table_names(
        &self,
        cancel: &CancellationToken,
        schema: &str,
        names: &[String],
    ) -> Result<Vec<String>> {
        let (sql, args) = queries::tables_query(schema, names);
        let entity = format!("schema {}", schema);
        let rows = self.query(cancel, "querying tables of", &entity, &sql, &args).await?;
        decode_rows(&rows, "querying tables of", &entity, |row| row.string(0))
    }

    /// Fully populate the tables of one schema, in name order.
    async fn load_schema(
        &self,
        cancel: &CancellationToken,
        name: &str,
        tables: &[String],
    ) -> Result<Schema> {
        let mut schema = Schema::new(name);
        for table in self.table_names(cancel, name, tables).await? {
            let (_, table) = self.load_table(cancel, Some(name), &table).await?;
            schema.tables.push(table);
        }
        debug!("Loaded {} tables for schema {}", schema.tables.len(), name);
        Ok(schema)
    }

    /// Resolve a table and populate its columns and constraints.
    ///
    /// Returns the owning schema next to the table. The table's schema
    /// reference is left for the linker.
    async fn load_table(
        &self,
        cancel: &CancellationToken,
        schema: Option<&str>,
        name: &str,
    ) -> Result<(String, Table)> {
        let entity = match schema {
            Some(schema) => format!("{}.{}", schema, name),
            None => name.to_string(),
        };
        let rows = match schema {
            Some(schema) => {
                self.query(
                    cancel,
                    "resolving table",
                    &entity,
                    queries::TABLE_SCHEMA_QUERY,
                    &[name.into(), schema.into()],
                )
                .await?
            }
            None => {
                self.query(
                    cancel,
                    "resolving table",
                    &entity,
                    queries::TABLE_QUERY,
                    &[name.into()],
                )
                .await?
            }
        };
        let mut found = decode_rows(&rows, "resolving table", &entity, TableRow::from_row)?;
        let identity = match found.len() {
            0 => return Err(InspectError::table_not_found(entity)),
            1 => found.remove(0),
            n => {
                return Err(InspectError::MalformedMetadata(format!(
                    "table {} resolved to {} rows",
                    entity, n
                )))
            }
        };

        let owner = identity.owner;
        let entity = format!("{}.{}", owner, identity.name);
        let mut table = Table::new(identity.name);
        table.comment = identity.comment;

        self.load_columns(cancel, &owner, &entity, &mut table).await?;
        self.load_indexes(cancel, &owner, &entity, &mut table).await?;
        self.load_foreign_keys(cancel, &owner, &entity, &mut table).await?;
        self.load_checks(cancel, &owner, &entity, &mut table).await?;

        Ok((owner, table))
    }

    fn table_args(owner: &str, table: &Table) -> [CatalogValue; 2] {
        [owner.into(), table.name.as_str().into()]
    }

    async fn load_columns(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        entity: &str,
        table: &mut Table,
    ) -> Result<()> {
        let op = "querying columns of";
        let rows = self
            .query(cancel, op, entity, queries::COLUMNS_QUERY, &Self::table_args(owner, table))
            .await?;
        let rows = decode_rows(&rows, op, entity, ColumnRow::from_row)?;
        assemble::add_columns(table, rows);
        debug!("Loaded {} columns for {}", table.columns.len(), entity);
        Ok(())
    }

    async fn load_indexes(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        entity: &str,
        table: &mut Table,
    ) -> Result<()> {
        let op = "querying indexes of";
        let rows = self
            .query(cancel, op, entity, queries::INDEXES_QUERY, &Self::table_args(owner, table))
            .await?;
        let rows = decode_rows(&rows, op, entity, IndexRow::from_row)?;
        assemble::add_indexes(table, rows)?;
        debug!(
            "Loaded {} indexes for {} (primary key: {})",
            table.indexes.len(),
            entity,
            table.has_pk()
        );
        Ok(())
    }

    async fn load_foreign_keys(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        entity: &str,
        table: &mut Table,
    ) -> Result<()> {
        let op = "querying foreign keys of";
        let rows = self
            .query(cancel, op, entity, queries::FKS_QUERY, &Self::table_args(owner, table))
            .await?;
        let rows = decode_rows(&rows, op, entity, ForeignKeyRow::from_row)?;
        assemble::add_foreign_keys(table, owner, rows)?;
        debug!("Loaded {} foreign keys for {}", table.foreign_keys.len(), entity);
        Ok(())
    }

    async fn load_checks(
        &self,
        cancel: &CancellationToken,
        owner: &str,
        entity: &str,
        table: &mut Table,
    ) -> Result<()> {
        let op = "querying checks of";
        let rows = self
            .query(cancel, op, entity, queries::CHECKS_QUERY, &Self::table_args(owner, table))
            .await?;
        let rows = decode_rows(&rows, op, entity, CheckRow::from_row)?;
        assemble::add_checks(table, rows)?;
        debug!("Loaded {} check constraints for {}", table.checks.len(), entity);
        Ok(())
    }
}

#[async_trait]
impl SchemaInspector for Inspector {
    async fn inspect_realm(
        &self,
        cancel: &CancellationToken,
        opts: Option<&InspectRealmOptions>,
    ) -> Result<Realm> {
        let opts = opts.cloned().unwrap_or_default();
        let mut realm = Realm {
            schemas: Vec::new(),
            attrs: self.attrs.clone(),
        };
        for name in self.schema_names(cancel, &opts.schemas).await? {
            let schema = self.load_schema(cancel, &name, &opts.tables).await?;
            realm.schemas.push(schema);
        }
        link::link_realm(&mut realm)?;

        info!(
            "Inspected realm: {} schemas, {} tables",
            realm.schemas.len(),
            realm.schemas.iter().map(|s| s.tables.len()).sum::<usize>()
        );
        Ok(realm)
    }

    async fn inspect_schema(
        &self,
        cancel: &CancellationToken,
        name: &str,
        opts: Option<&InspectOptions>,
    ) -> Result<Schema> {
        let name = if name.is_empty() {
            self.current_schema(cancel).await?
        } else {
            name.to_string()
        };

        let found = self.schema_names(cancel, std::slice::from_ref(&name)).await?;
        if !found.contains(&name) {
            return Err(InspectError::schema_not_found(name));
        }

        let tables = opts.map(|o| o.tables.as_slice()).unwrap_or_default();
        let mut schema = self.load_schema(cancel, &name, tables).await?;
        link::link_schemas(std::slice::from_mut(&mut schema))?;

        info!("Inspected schema {}: {} tables", schema.name, schema.tables.len());
        Ok(schema)
    }

    async fn inspect_table(
        &self,
        cancel: &CancellationToken,
        name: &str,
        opts: Option<&InspectTableOptions>,
    ) -> Result<Table> {
        let schema = opts.and_then(|o| o.schema.as_deref());
        let (owner, mut table) = self.load_table(cancel, schema, name).await?;
        table.schema = Some(SchemaRef::new(owner));
        link::link_table(&mut table)?;

        info!(
            "Inspected table {}: {} columns, {} indexes",
            table.full_name(),
            table.columns.len(),
            table.all_indexes().count()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::IndexTarget;
    use crate::testing::{row, MockExecutor};

    fn flag(v: bool) -> CatalogValue {
        CatalogValue::from(if v { "Y" } else { "N" })
    }

    fn params() -> Vec<CatalogRow> {
        vec![
            row(["collate", "BINARY"]),
            row(["ctype", "AL32UTF8"]),
            row(["version", "19.0.0.0.0"]),
        ]
    }

    fn column(name: &str, typ: &str, size: i64, precision: Option<i64>) -> CatalogRow {
        CatalogRow::new(vec![
            name.into(),
            typ.into(),
            "N".into(),
            CatalogValue::Null,
            size.into(),
            precision.into(),
            CatalogValue::Int(0),
            CatalogValue::Null,
            CatalogValue::Null,
            CatalogValue::Null,
            "NO".into(),
            CatalogValue::Null,
            CatalogValue::Null,
            CatalogValue::Null,
            CatalogValue::Null,
        ])
    }

    fn index(name: &str, column: &str, primary: bool) -> CatalogRow {
        CatalogRow::new(vec![
            name.into(),
            "NORMAL".into(),
            column.into(),
            flag(primary),
            flag(primary),
            if primary { "P".into() } else { CatalogValue::Null },
            CatalogValue::Null,
            CatalogValue::Null,
            flag(true),
            flag(false),
            flag(false),
            flag(true),
            CatalogValue::Null,
        ])
    }

    fn args(values: &[&str]) -> Vec<CatalogValue> {
        values.iter().map(|v| CatalogValue::from(*v)).collect()
    }

    fn excluded() -> Vec<String> {
        vec!["SYS".to_string()]
    }

    /// Catalog with schema HR holding DEPT and EMP, EMP referencing DEPT.
    fn hr_catalog() -> MockExecutor {
        let (schemas_sql, _) = queries::schemas_query(&[], &excluded());
        let (tables_sql, _) = queries::tables_query("HR", &[]);
        MockExecutor::new()
            .on(queries::PARAMS_QUERY, params())
            .on(&schemas_sql, vec![row(["HR"])])
            .on(&tables_sql, vec![row(["DEPT"]), row(["EMP"])])
            .on_args(
                queries::TABLE_SCHEMA_QUERY,
                args(&["EMP", "HR"]),
                vec![row([Some("HR"), Some("EMP"), Some("Employees")])],
            )
            .on_args(
                queries::TABLE_SCHEMA_QUERY,
                args(&["DEPT", "HR"]),
                vec![row([Some("HR"), Some("DEPT"), None])],
            )
            .on_args(
                queries::TABLE_QUERY,
                args(&["EMP"]),
                vec![row([Some("HR"), Some("EMP"), None])],
            )
            .on_args(
                queries::COLUMNS_QUERY,
                args(&["HR", "EMP"]),
                vec![
                    column("ID", "NUMBER", 22, Some(10)),
                    column("NAME", "VARCHAR2", 100, None),
                    column("DEPT_ID", "NUMBER", 22, Some(10)),
                ],
            )
            .on_args(
                queries::COLUMNS_QUERY,
                args(&["HR", "DEPT"]),
                vec![column("ID", "NUMBER", 22, Some(10))],
            )
            .on_args(
                queries::INDEXES_QUERY,
                args(&["HR", "EMP"]),
                vec![
                    index("EMP_PK", "ID", true),
                    index("EMP_NAME_IDX", "NAME", false),
                    index("EMP_NAME_IDX", "DEPT_ID", false),
                ],
            )
            .on_args(
                queries::INDEXES_QUERY,
                args(&["HR", "DEPT"]),
                vec![index("DEPT_PK", "ID", true)],
            )
            .on_args(
                queries::FKS_QUERY,
                args(&["HR", "EMP"]),
                vec![row([
                    "EMP_DEPT_FK",
                    "EMP",
                    "DEPT_ID",
                    "HR",
                    "DEPT",
                    "ID",
                    "HR",
                    "NO ACTION",
                    "SET NULL",
                ])],
            )
            .on(queries::FKS_QUERY, Vec::new())
            .on_args(
                queries::CHECKS_QUERY,
                args(&["HR", "EMP"]),
                vec![row(["CK_EMP_ID", "ID > 0", "ID", "N"])],
            )
            .on(queries::CHECKS_QUERY, Vec::new())
    }

    async fn open_inspector(mock: Arc<MockExecutor>, config: &InspectConfig) -> Inspector {
        let session = Session::open(mock, &CancellationToken::new())
            .await
            .unwrap();
        Inspector::with_config(&session, config)
    }

    #[tokio::test]
    async fn test_inspect_realm() {
        let mock = Arc::new(hr_catalog());
        let inspector = open_inspector(mock, &InspectConfig::default()).await;
        let realm = inspector
            .inspect_realm(&CancellationToken::new(), None)
            .await
            .unwrap();

        assert_eq!(realm.attrs.collation.as_deref(), Some("BINARY"));
        assert_eq!(realm.schemas.len(), 1);
        let hr = &realm.schemas[0];
        assert_eq!(hr.realm, Some(realm.attrs.clone()));
        let names: Vec<&str> = hr.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["DEPT", "EMP"]);

        let emp = hr.table("EMP").unwrap();
        assert_eq!(emp.schema_name(), Some("HR"));
        assert_eq!(emp.comment.as_deref(), Some("Employees"));
        assert_eq!(emp.primary_key.as_ref().unwrap().name, "EMP_PK");
        assert_eq!(emp.indexes.len(), 1);
        assert_eq!(emp.indexes[0].parts.len(), 2);
        assert_eq!(
            emp.indexes[0].parts[1].target,
            IndexTarget::Column("DEPT_ID".to_string())
        );
        assert_eq!(emp.column("ID").unwrap().indexes, vec!["EMP_PK"]);
        let dept_id = emp.column("DEPT_ID").unwrap();
        assert_eq!(dept_id.indexes, vec!["EMP_NAME_IDX"]);
        assert_eq!(dept_id.foreign_keys, vec!["EMP_DEPT_FK"]);
        assert_eq!(emp.foreign_keys[0].ref_table, "DEPT");
        assert_eq!(emp.checks[0].columns, vec!["ID"]);
    }

    #[tokio::test]
    async fn test_inspect_schema_current_with_filter() {
        let (schemas_sql, _) = queries::schemas_query(&["HR".to_string()], &excluded());
        let (tables_sql, _) = queries::tables_query("HR", &["EMP".to_string()]);
        let mock = hr_catalog()
            .on(queries::CURRENT_SCHEMA_QUERY, vec![row(["HR"])])
            .on(&schemas_sql, vec![row(["HR"])])
            .on(&tables_sql, vec![row(["EMP"])]);
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;

        let opts = InspectOptions {
            tables: vec!["EMP".to_string()],
        };
        let schema = inspector
            .inspect_schema(&CancellationToken::new(), "", Some(&opts))
            .await
            .unwrap();
        assert_eq!(schema.name, "HR");
        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.realm, None);
        assert_eq!(schema.tables[0].schema_name(), Some("HR"));
    }

    #[tokio::test]
    async fn test_inspect_schema_not_found() {
        let (schemas_sql, _) = queries::schemas_query(&["NOPE".to_string()], &excluded());
        let mock = hr_catalog().on(&schemas_sql, Vec::new());
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;

        let err = inspector
            .inspect_schema(&CancellationToken::new(), "NOPE", None)
            .await
            .unwrap_err();
        assert!(err.is_not_exist());
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_inspect_table_standalone() {
        let inspector = open_inspector(Arc::new(hr_catalog()), &InspectConfig::default()).await;
        let table = inspector
            .inspect_table(&CancellationToken::new(), "EMP", None)
            .await
            .unwrap();
        assert_eq!(table.full_name(), "HR.EMP");
        assert_eq!(table.columns.len(), 3);
        assert_eq!(
            table.column("DEPT_ID").unwrap().foreign_keys,
            vec!["EMP_DEPT_FK"]
        );
    }

    #[tokio::test]
    async fn test_inspect_table_not_found_vs_query_failure() {
        let mock = hr_catalog().on(queries::TABLE_QUERY, Vec::new());
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "GHOST", None)
            .await
            .unwrap_err();
        assert!(err.is_not_exist());

        let mock = hr_catalog().fail(queries::TABLE_QUERY, "ORA-03113: end-of-file");
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "GHOST", None)
            .await
            .unwrap_err();
        assert!(!err.is_not_exist());
        assert!(matches!(err, InspectError::Query { .. }));
    }

    #[tokio::test]
    async fn test_query_failure_names_operation_and_entity() {
        let mock = MockExecutor::new()
            .on(queries::PARAMS_QUERY, params())
            .on(
                queries::TABLE_QUERY,
                vec![row([Some("HR"), Some("EMP"), None])],
            )
            .on(queries::COLUMNS_QUERY, vec![column("ID", "NUMBER", 22, Some(10))])
            .fail(queries::INDEXES_QUERY, "ORA-00942: table or view does not exist");
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "EMP", None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Query failed while querying indexes of HR.EMP: ORA-00942: table or view does not exist"
        );
        assert_eq!(err.exit_code(), 6);
    }

    #[tokio::test]
    async fn test_index_on_unknown_column_aborts() {
        let mock = MockExecutor::new()
            .on(queries::PARAMS_QUERY, params())
            .on(
                queries::TABLE_QUERY,
                vec![row([Some("HR"), Some("EMP"), None])],
            )
            .on(queries::COLUMNS_QUERY, vec![column("ID", "NUMBER", 22, Some(10))])
            .on(queries::INDEXES_QUERY, vec![index("EMP_X_IDX", "X", false)]);
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "EMP", None)
            .await
            .unwrap_err();
        assert!(matches!(err, InspectError::ReferenceIntegrity(_)));
    }

    #[tokio::test]
    async fn test_malformed_row_is_decode_error() {
        let mock = MockExecutor::new()
            .on(queries::PARAMS_QUERY, params())
            .on(
                queries::TABLE_QUERY,
                vec![row([Some("HR"), Some("EMP"), None])],
            )
            .on(queries::COLUMNS_QUERY, vec![row(["ID", "NUMBER"])]);
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "EMP", None)
            .await
            .unwrap_err();
        assert!(matches!(err, InspectError::Decode { .. }));
        assert!(err.to_string().contains("querying columns of HR.EMP"));
    }

    #[tokio::test]
    async fn test_cancelled_token_issues_no_query() {
        let mock = Arc::new(hr_catalog());
        let inspector = open_inspector(mock.clone(), &InspectConfig::default()).await;
        let calls_before = mock.calls().len();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = inspector.inspect_realm(&cancel, None).await.unwrap_err();
        assert!(matches!(err, InspectError::Cancelled(_)));
        assert_eq!(mock.calls().len(), calls_before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_abandons_in_flight_query() {
        let mock = hr_catalog().hang(queries::TABLE_QUERY);
        let inspector = open_inspector(Arc::new(mock), &InspectConfig::default()).await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = inspector
            .inspect_table(&cancel, "GHOST", None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Inspection cancelled while resolving table GHOST"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_deadline() {
        let mock = hr_catalog().hang(queries::TABLE_QUERY);
        let config = InspectConfig {
            query_timeout_secs: Some(5),
            ..Default::default()
        };
        let inspector = open_inspector(Arc::new(mock), &config).await;
        let err = inspector
            .inspect_table(&CancellationToken::new(), "GHOST", None)
            .await
            .unwrap_err();
        assert!(matches!(err, InspectError::Cancelled(_)));
        assert!(err.to_string().contains("deadline of 5s exceeded"));
    }
}
