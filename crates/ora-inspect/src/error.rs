//! Error types for catalog inspection and type conversion.

use thiserror::Error;

use crate::core::value::RowError;

/// Boxed error reported by a [`QueryExecutor`](crate::core::QueryExecutor).
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for inspection operations.
#[derive(Error, Debug)]
pub enum InspectError {
    /// Table or schema is absent from the catalog.
    ///
    /// Callers usually branch on this (e.g. plan a CREATE instead of an ALTER).
    #[error("{kind} {name:?} was not found")]
    NotExist { kind: &'static str, name: String },

    /// Catalog returned data of an unexpected shape (version string, row count).
    #[error("Malformed catalog metadata: {0}")]
    MalformedMetadata(String),

    /// Type cannot be formatted or parsed.
    #[error("Unrecognized type: {0}")]
    UnrecognizedType(String),

    /// An index, check or foreign key names a column the table does not have.
    #[error("Reference integrity error: {0}")]
    ReferenceIntegrity(String),

    /// The caller cancelled the inspection or a query deadline expired.
    #[error("Inspection cancelled while {0}")]
    Cancelled(String),

    /// The query executor failed.
    #[error("Query failed while {op} {entity}: {source}")]
    Query {
        op: String,
        entity: String,
        #[source]
        source: ExecutorError,
    },

    /// A catalog row could not be decoded.
    #[error("Decoding failed while {op} {entity}: {source}")]
    Decode {
        op: String,
        entity: String,
        #[source]
        source: RowError,
    },

    /// Configuration or document error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InspectError {
    /// Create a NotExist error for a table.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        InspectError::NotExist {
            kind: "table",
            name: name.into(),
        }
    }

    /// Create a NotExist error for a schema.
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        InspectError::NotExist {
            kind: "schema",
            name: name.into(),
        }
    }

    /// Wrap an executor failure with the operation and entity it happened on.
    pub fn query(op: impl Into<String>, entity: impl Into<String>, source: ExecutorError) -> Self {
        InspectError::Query {
            op: op.into(),
            entity: entity.into(),
            source,
        }
    }

    /// Wrap a row decoding failure with the operation and entity it happened on.
    pub fn decode(op: impl Into<String>, entity: impl Into<String>, source: RowError) -> Self {
        InspectError::Decode {
            op: op.into(),
            entity: entity.into(),
            source,
        }
    }

    /// Create a ReferenceIntegrity error.
    pub fn reference(message: impl Into<String>) -> Self {
        InspectError::ReferenceIntegrity(message.into())
    }

    /// Whether this error reports a missing table or schema.
    pub fn is_not_exist(&self) -> bool {
        matches!(self, InspectError::NotExist { .. })
    }

    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> u8 {
        match self {
            InspectError::Config(_) | InspectError::Yaml(_) | InspectError::Json(_) => 1,
            InspectError::NotExist { .. } => 2,
            InspectError::UnrecognizedType(_) => 3,
            InspectError::ReferenceIntegrity(_) => 4,
            InspectError::MalformedMetadata(_) => 5,
            InspectError::Query { .. } | InspectError::Decode { .. } => 6,
            InspectError::Io(_) => 7,
            InspectError::Cancelled(_) => 8,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;
