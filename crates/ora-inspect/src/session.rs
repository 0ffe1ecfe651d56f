//! Connection-time probe of an Oracle session.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::core::schema::RealmAttrs;
use crate::core::traits::QueryExecutor;
use crate::error::{InspectError, Result};
use crate::inspect::{queries, run_query};

/// Oldest supported major version.
pub const MIN_MAJOR_VERSION: u32 = 12;

/// Server version as reported by `PRODUCT_COMPONENT_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OracleVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FromStr for OracleVersion {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || InspectError::MalformedMetadata(format!("malformed version: {:?}", s));
        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| malformed()),
                None if required => Err(malformed()),
                None => Ok(0),
            }
        };
        Ok(Self {
            major: next(true)?,
            minor: next(true)?,
            patch: next(false)?,
        })
    }
}

impl fmt::Display for OracleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// An opened session: the executor plus what was learned about the server.
#[derive(Clone)]
pub struct Session {
    executor: Arc<dyn QueryExecutor>,
    attrs: RealmAttrs,
    version: OracleVersion,
}

impl Session {
    /// Probe the server behind `executor`.
    ///
    /// Reads the sort order, the database character set and the version.
    /// The probe must return exactly three rows and a parseable version of
    /// a supported release.
    pub async fn open(executor: Arc<dyn QueryExecutor>, cancel: &CancellationToken) -> Result<Self> {
        let rows = run_query(
            executor.as_ref(),
            cancel,
            None,
            "probing",
            "session parameters",
            queries::PARAMS_QUERY,
            &[],
        )
        .await?;

        if rows.len() != 3 {
            return Err(InspectError::MalformedMetadata(format!(
                "unexpected number of rows from session parameters: {} (expected 3)",
                rows.len()
            )));
        }
        let value = |i: usize| {
            rows[i]
                .opt_string(1)
                .map_err(|e| InspectError::decode("probing", "session parameters", e))
        };
        let attrs = RealmAttrs {
            collation: value(0)?,
            ctype: value(1)?,
        };
        let version: OracleVersion = value(2)?
            .ok_or_else(|| InspectError::MalformedMetadata("missing server version".to_string()))?
            .parse()?;

        if version.major < MIN_MAJOR_VERSION {
            return Err(InspectError::MalformedMetadata(format!(
                "unsupported Oracle version {}: {} or newer is required",
                version, MIN_MAJOR_VERSION
            )));
        }

        info!(
            "Opened Oracle {} session (collation {}, charset {})",
            version,
            attrs.collation.as_deref().unwrap_or("-"),
            attrs.ctype.as_deref().unwrap_or("-")
        );

        Ok(Self {
            executor,
            attrs,
            version,
        })
    }

    /// Executor the session was opened on.
    pub fn executor(&self) -> Arc<dyn QueryExecutor> {
        Arc::clone(&self.executor)
    }

    /// Sort order and character set of the session.
    pub fn attrs(&self) -> &RealmAttrs {
        &self.attrs
    }

    pub fn version(&self) -> OracleVersion {
        self.version
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("attrs", &self.attrs)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
