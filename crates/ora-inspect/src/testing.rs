//! In-memory query executor for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::traits::QueryExecutor;
use crate::core::value::{CatalogRow, CatalogValue};
use crate::error::ExecutorError;

enum Response {
    Rows(Vec<CatalogRow>),
    Fail(String),
    Hang,
}

struct Expectation {
    sql: String,
    args: Option<Vec<CatalogValue>>,
    response: Response,
}

/// Replays canned responses keyed by query text and, optionally, arguments.
///
/// An expectation with arguments wins over one registered for any
/// arguments. Unregistered queries fail.
#[derive(Default)]
pub struct MockExecutor {
    expectations: Vec<Expectation>,
    calls: Mutex<Vec<(String, Vec<CatalogValue>)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn expect(mut self, sql: &str, args: Option<Vec<CatalogValue>>, response: Response) -> Self {
        self.expectations.push(Expectation {
            sql: sql.to_string(),
            args,
            response,
        });
        self
    }

    /// Answer `sql` with `rows` for any arguments.
    pub fn on(self, sql: &str, rows: Vec<CatalogRow>) -> Self {
        self.expect(sql, None, Response::Rows(rows))
    }

    /// Answer `sql` with `rows` when bound to exactly `args`.
    pub fn on_args(self, sql: &str, args: Vec<CatalogValue>, rows: Vec<CatalogRow>) -> Self {
        self.expect(sql, Some(args), Response::Rows(rows))
    }

    /// Fail `sql` with `message` for any arguments.
    pub fn fail(self, sql: &str, message: &str) -> Self {
        self.expect(sql, None, Response::Fail(message.to_string()))
    }

    /// Never answer `sql`.
    pub fn hang(self, sql: &str) -> Self {
        self.expect(sql, None, Response::Hang)
    }

    /// Queries executed so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<CatalogValue>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn find(&self, sql: &str, args: &[CatalogValue]) -> Option<&Response> {
        let exact = self
            .expectations
            .iter()
            .find(|e| e.sql == sql && e.args.as_deref() == Some(args));
        exact
            .or_else(|| {
                self.expectations
                    .iter()
                    .find(|e| e.sql == sql && e.args.is_none())
            })
            .map(|e| &e.response)
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn query(
        &self,
        sql: &str,
        args: &[CatalogValue],
    ) -> Result<Vec<CatalogRow>, ExecutorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sql.to_string(), args.to_vec()));
        }
        match self.find(sql, args) {
            Some(Response::Rows(rows)) => Ok(rows.clone()),
            Some(Response::Fail(message)) => Err(message.clone().into()),
            Some(Response::Hang) => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
            None => Err(format!("unexpected query: {}", sql.trim()).into()),
        }
    }
}

/// Build a row from anything convertible to catalog values.
pub fn row<V: Into<CatalogValue>>(values: impl IntoIterator<Item = V>) -> CatalogRow {
    values.into_iter().collect()
}
