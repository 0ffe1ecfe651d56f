//! Catalog values and rows as returned by a query executor.
//!
//! Drivers disagree on how they surface dictionary columns: flags may come back
//! as `'Y'`/`'N'`, `'YES'`/`'NO'` or real booleans, and `NUMBER` columns as
//! integers or text. The typed getters on [`CatalogRow`] absorb these
//! differences so the decoders only deal with Rust types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single value in a catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
}

impl CatalogValue {
    /// Whether the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }

    fn kind(&self) -> &'static str {
        match self {
            CatalogValue::Null => "null",
            CatalogValue::Bool(_) => "bool",
            CatalogValue::Int(_) => "int",
            CatalogValue::Text(_) => "text",
        }
    }
}

impl From<&str> for CatalogValue {
    fn from(v: &str) -> Self {
        CatalogValue::Text(v.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(v: String) -> Self {
        CatalogValue::Text(v)
    }
}

impl From<i64> for CatalogValue {
    fn from(v: i64) -> Self {
        CatalogValue::Int(v)
    }
}

impl From<bool> for CatalogValue {
    fn from(v: bool) -> Self {
        CatalogValue::Bool(v)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CatalogValue::Null, Into::into)
    }
}

/// Error raised when a row value cannot be read as the requested type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row has fewer columns than the decoder expects.
    #[error("column {index} out of range (row has {len} columns)")]
    OutOfRange { index: usize, len: usize },

    /// A required column is NULL.
    #[error("column {index} is unexpectedly NULL")]
    Null { index: usize },

    /// The value cannot be converted to the requested type.
    #[error("column {index}: expected {expected}, found {found} {value:?}")]
    Mismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
        value: String,
    },
}

/// One row of a catalog query result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRow {
    values: Vec<CatalogValue>,
}

impl CatalogRow {
    /// Create a row from its values.
    pub fn new(values: Vec<CatalogValue>) -> Self {
        Self { values }
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw access to a value.
    pub fn get(&self, index: usize) -> Option<&CatalogValue> {
        self.values.get(index)
    }

    fn value(&self, index: usize) -> Result<&CatalogValue, RowError> {
        self.values.get(index).ok_or(RowError::OutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Read a nullable text column. Empty strings are treated as NULL, as the
    /// dictionary does not distinguish them.
    pub fn opt_string(&self, index: usize) -> Result<Option<String>, RowError> {
        match self.value(index)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(s) if s.is_empty() => Ok(None),
            CatalogValue::Text(s) => Ok(Some(s.clone())),
            CatalogValue::Int(v) => Ok(Some(v.to_string())),
            CatalogValue::Bool(v) => Ok(Some(v.to_string())),
        }
    }

    /// Read a required text column.
    pub fn string(&self, index: usize) -> Result<String, RowError> {
        self.opt_string(index)?.ok_or(RowError::Null { index })
    }

    /// Read a nullable integer column.
    pub fn opt_i64(&self, index: usize) -> Result<Option<i64>, RowError> {
        match self.value(index)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Int(v) => Ok(Some(*v)),
            CatalogValue::Text(s) if s.trim().is_empty() => Ok(None),
            CatalogValue::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| mismatch(index, "integer", CatalogValue::Text(s.clone()))),
            other => Err(mismatch(index, "integer", other.clone())),
        }
    }

    /// Read a nullable flag column.
    ///
    /// Accepts booleans, `0`/`1`, and the `Y`/`N`, `YES`/`NO`, `TRUE`/`FALSE`
    /// spellings used across the dictionary views.
    pub fn opt_bool(&self, index: usize) -> Result<Option<bool>, RowError> {
        match self.value(index)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Bool(v) => Ok(Some(*v)),
            CatalogValue::Int(0) => Ok(Some(false)),
            CatalogValue::Int(1) => Ok(Some(true)),
            CatalogValue::Text(s) => match s.trim().to_ascii_uppercase().as_str() {
                "" => Ok(None),
                "Y" | "YES" | "TRUE" | "1" => Ok(Some(true)),
                "N" | "NO" | "FALSE" | "0" => Ok(Some(false)),
                _ => Err(mismatch(index, "flag", CatalogValue::Text(s.clone()))),
            },
            other => Err(mismatch(index, "flag", other.clone())),
        }
    }

    /// Read a flag column, treating NULL as false.
    pub fn flag(&self, index: usize) -> Result<bool, RowError> {
        Ok(self.opt_bool(index)?.unwrap_or(false))
    }
}

impl<V: Into<CatalogValue>> FromIterator<V> for CatalogRow {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

fn mismatch(index: usize, expected: &'static str, value: CatalogValue) -> RowError {
    RowError::Mismatch {
        index,
        expected,
        found: value.kind(),
        value: format!("{:?}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_spellings() {
        let row = CatalogRow::new(vec![
            "Y".into(),
            "NO".into(),
            CatalogValue::Int(1),
            CatalogValue::Bool(false),
            CatalogValue::Null,
        ]);
        assert_eq!(row.opt_bool(0), Ok(Some(true)));
        assert_eq!(row.opt_bool(1), Ok(Some(false)));
        assert_eq!(row.opt_bool(2), Ok(Some(true)));
        assert_eq!(row.opt_bool(3), Ok(Some(false)));
        assert_eq!(row.opt_bool(4), Ok(None));
        assert_eq!(row.flag(4), Ok(false));
    }

    #[test]
    fn test_flag_rejects_garbage() {
        let row = CatalogRow::new(vec!["MAYBE".into()]);
        assert!(matches!(
            row.opt_bool(0),
            Err(RowError::Mismatch { expected: "flag", .. })
        ));
    }

    #[test]
    fn test_integers_from_text() {
        let row = CatalogRow::new(vec![" 38 ".into(), CatalogValue::Null, "abc".into()]);
        assert_eq!(row.opt_i64(0), Ok(Some(38)));
        assert_eq!(row.opt_i64(1), Ok(None));
        assert!(row.opt_i64(2).is_err());
    }

    #[test]
    fn test_strings() {
        let row = CatalogRow::new(vec!["EMP".into(), "".into(), CatalogValue::Null]);
        assert_eq!(row.string(0), Ok("EMP".to_string()));
        assert_eq!(row.opt_string(1), Ok(None));
        assert_eq!(row.string(2), Err(RowError::Null { index: 2 }));
        assert_eq!(
            row.string(3),
            Err(RowError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_row_from_iter() {
        let row: CatalogRow = vec![Some("A"), None].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert!(row.get(1).is_some_and(CatalogValue::is_null));
    }
}
