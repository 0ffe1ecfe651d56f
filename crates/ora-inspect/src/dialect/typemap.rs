//! Oracle type mapping.
//!
//! Both directions share the same fixed bucket boundaries, so that
//! `format_type(parse_type(x))` gives back `x` for the canonical spellings.

use crate::core::schema::ColumnType;
use crate::error::{InspectError, Result};

use super::canonical::{ColumnDesc, FromCanonical, ToCanonical};

pub const TYPE_VARCHAR2: &str = "varchar2";
pub const TYPE_NVARCHAR2: &str = "nvarchar2";
pub const TYPE_CHAR: &str = "char";
pub const TYPE_NCHAR: &str = "nchar";
pub const TYPE_CLOB: &str = "clob";
pub const TYPE_NCLOB: &str = "nclob";
pub const TYPE_LONG: &str = "long";
pub const TYPE_ROWID: &str = "rowid";
pub const TYPE_UROWID: &str = "urowid";
pub const TYPE_RAW: &str = "raw";
pub const TYPE_LONG_RAW: &str = "long raw";
pub const TYPE_BLOB: &str = "blob";
pub const TYPE_BFILE: &str = "bfile";
pub const TYPE_INT: &str = "int";
pub const TYPE_INTEGER: &str = "integer";
pub const TYPE_SMALLINT: &str = "smallint";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_FLOAT: &str = "float";
pub const TYPE_DOUBLE: &str = "double precision";
pub const TYPE_BINARY_FLOAT: &str = "binary_float";
pub const TYPE_BINARY_DOUBLE: &str = "binary_double";
pub const TYPE_DATE: &str = "date";
pub const TYPE_TIMESTAMP: &str = "timestamp";
pub const TYPE_TIMESTAMP_TZ: &str = "timestamp with time zone";
pub const TYPE_TIMESTAMP_LTZ: &str = "timestamp with local time zone";
pub const TYPE_INTERVAL_DS: &str = "interval day to second";
pub const TYPE_INTERVAL_YM: &str = "interval year to month";
pub const TYPE_JSON: &str = "json";

/// Native type names known to the dialect.
pub const TYPE_NAMES: &[&str] = &[
    TYPE_VARCHAR2,
    TYPE_NVARCHAR2,
    TYPE_CHAR,
    TYPE_NCHAR,
    TYPE_CLOB,
    TYPE_NCLOB,
    TYPE_LONG,
    TYPE_ROWID,
    TYPE_UROWID,
    TYPE_RAW,
    TYPE_LONG_RAW,
    TYPE_BLOB,
    TYPE_BFILE,
    TYPE_INT,
    TYPE_INTEGER,
    TYPE_SMALLINT,
    TYPE_NUMBER,
    TYPE_FLOAT,
    TYPE_DOUBLE,
    TYPE_BINARY_FLOAT,
    TYPE_BINARY_DOUBLE,
    TYPE_DATE,
    TYPE_TIMESTAMP,
    TYPE_TIMESTAMP_TZ,
    TYPE_TIMESTAMP_LTZ,
    TYPE_INTERVAL_DS,
    TYPE_INTERVAL_YM,
    TYPE_JSON,
];

/// Sizes below this format as a one byte/character fixed type.
pub const MIN_SIZED: i64 = 2;

/// Sizes above this format as a large object.
pub const MAX_SIZED: i64 = 4000;

/// Precision assumed for `double precision` without an explicit one.
pub const DEFAULT_DOUBLE_PRECISION: i64 = 53;

/// Precision assumed for `int` without an explicit one.
pub const DEFAULT_INT_PRECISION: i64 = 32;

/// Precision assumed for `float` without an explicit one.
pub const DEFAULT_FLOAT_PRECISION: i64 = 24;

/// Oracle type normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleTypes;

impl OracleTypes {
    pub fn new() -> Self {
        Self
    }
}

impl ToCanonical for OracleTypes {
    fn dialect_name(&self) -> &str {
        "oracle"
    }

    fn to_canonical(&self, desc: &ColumnDesc) -> ColumnType {
        let t = normalize_spaces(&desc.typ.to_lowercase());

        let column_type = match base_name(&desc.typ).as_str() {
            TYPE_INT | TYPE_INTEGER | TYPE_SMALLINT => ColumnType::Integer { t },

            TYPE_RAW => ColumnType::Binary {
                t: TYPE_RAW.to_string(),
                size: desc.size,
            },

            base @ (TYPE_CHAR | TYPE_NCHAR | TYPE_VARCHAR2 | TYPE_NVARCHAR2) => {
                ColumnType::String {
                    t: base.to_string(),
                    size: desc.size,
                }
            }

            TYPE_DATE | TYPE_TIMESTAMP | TYPE_TIMESTAMP_TZ | TYPE_TIMESTAMP_LTZ => {
                ColumnType::Time { t }
            }

            TYPE_FLOAT | TYPE_DOUBLE | "double" | "real" | TYPE_BINARY_FLOAT
            | TYPE_BINARY_DOUBLE => ColumnType::Float {
                t,
                precision: desc.precision,
            },

            TYPE_JSON => ColumnType::Json { t },

            TYPE_NUMBER => ColumnType::Decimal {
                t: TYPE_NUMBER.to_string(),
                precision: desc.precision,
                scale: desc.scale,
            },

            // Intervals, LOBs and rowids have no canonical form.
            _ => ColumnType::Unsupported { t },
        };

        match column_type {
            ColumnType::Unsupported { .. } if desc.udt_owner.is_some() => {
                ColumnType::UserDefined {
                    t: desc.typ.trim().to_string(),
                }
            }
            other => other,
        }
    }

    fn parse(&self, expr: &str) -> Result<ColumnType> {
        let parts: Vec<&str> = expr
            .split(|c: char| matches!(c, '(' | ')' | ',') || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let Some(head) = parts.first() else {
            return Err(InspectError::UnrecognizedType(
                "empty type expression".to_string(),
            ));
        };

        let mut desc = ColumnDesc::new(expr.trim());
        match head.to_lowercase().as_str() {
            head @ (TYPE_VARCHAR2 | TYPE_NVARCHAR2 | TYPE_RAW) => {
                let size = parts.get(1).ok_or_else(|| {
                    InspectError::UnrecognizedType(format!("{} requires a size: {:?}", head, expr))
                })?;
                desc.typ = head.to_string();
                desc.size = parse_facet(size, expr)?;
            }
            head @ (TYPE_CHAR | TYPE_NCHAR) => {
                desc.typ = head.to_string();
                desc.size = match parts.get(1) {
                    Some(size) => parse_facet(size, expr)?,
                    None => 1,
                };
            }
            TYPE_NUMBER => {
                desc.typ = TYPE_NUMBER.to_string();
                if let Some(precision) = parts.get(1) {
                    desc.precision = parse_facet(precision, expr)?;
                }
                if let Some(scale) = parts.get(2) {
                    desc.scale = parse_facet(scale, expr)?;
                }
            }
            "double" => desc.precision = DEFAULT_DOUBLE_PRECISION,
            TYPE_INT | TYPE_INTEGER => desc.precision = DEFAULT_INT_PRECISION,
            TYPE_FLOAT => {
                desc.precision = match parts.get(1) {
                    Some(precision) => parse_facet(precision, expr)?,
                    None => DEFAULT_FLOAT_PRECISION,
                };
            }
            _ => {}
        }

        Ok(match self.to_canonical(&desc) {
            ColumnType::Unsupported { .. } => ColumnType::UserDefined {
                t: expr.trim().to_string(),
            },
            other => other,
        })
    }
}

impl FromCanonical for OracleTypes {
    fn dialect_name(&self) -> &str {
        "oracle"
    }

    fn format(&self, column_type: &ColumnType) -> Result<String> {
        match column_type {
            ColumnType::Binary { size, .. } => Ok(if *size < MIN_SIZED {
                format!("{}(1)", TYPE_RAW)
            } else if *size > MAX_SIZED {
                TYPE_BLOB.to_string()
            } else {
                format!("{}({})", TYPE_RAW, size)
            }),

            ColumnType::Integer { t } => Ok(match base_name(t).as_str() {
                name @ (TYPE_INTEGER | TYPE_SMALLINT) => name.to_string(),
                _ => TYPE_INT.to_string(),
            }),

            ColumnType::String { t, size } => {
                let base = base_name(t);
                let national = base.starts_with('n');
                Ok(if *size < MIN_SIZED {
                    let fixed = if national { TYPE_NCHAR } else { TYPE_CHAR };
                    format!("{}(1)", fixed)
                } else if *size > MAX_SIZED {
                    let lob = if national { TYPE_NCLOB } else { TYPE_CLOB };
                    lob.to_string()
                } else {
                    let name = match base.as_str() {
                        TYPE_CHAR | TYPE_NCHAR | TYPE_NVARCHAR2 => base.as_str(),
                        _ => TYPE_VARCHAR2,
                    };
                    format!("{}({})", name, size)
                })
            }

            ColumnType::Decimal {
                precision, scale, ..
            } => format_decimal(*precision, *scale),

            ColumnType::Time { t } | ColumnType::Float { t, .. } | ColumnType::Json { t } => {
                let name = normalize_spaces(&t.to_lowercase());
                if name.is_empty() {
                    return Err(InspectError::UnrecognizedType(format!(
                        "missing type name for {}",
                        column_type
                    )));
                }
                Ok(name)
            }

            ColumnType::Unsupported { t } | ColumnType::UserDefined { t } => Err(
                InspectError::UnrecognizedType(format!("unsupported type {:?}", t)),
            ),
        }
    }
}

fn format_decimal(precision: i64, scale: i64) -> Result<String> {
    if scale < 0 {
        return Err(InspectError::UnrecognizedType(format!(
            "decimal type must have scale >= 0: {}",
            scale
        )));
    }
    if precision == 0 && scale > 0 {
        return Err(InspectError::UnrecognizedType(format!(
            "decimal type with scale {} must have a precision of at least 1",
            scale
        )));
    }
    Ok(match (precision, scale) {
        (0, 0) => TYPE_NUMBER.to_string(),
        (p, 0) => format!("{}({})", TYPE_NUMBER, p),
        (p, s) => format!("{}({},{})", TYPE_NUMBER, p, s),
    })
}

fn parse_facet(token: &str, expr: &str) -> Result<i64> {
    token.parse().map_err(|_| {
        InspectError::UnrecognizedType(format!("invalid size {:?} in type {:?}", token, expr))
    })
}

/// Lower-cased type name with parenthesized facets removed and whitespace
/// collapsed: `TIMESTAMP(6) WITH TIME ZONE` → `timestamp with time zone`.
pub fn base_name(typ: &str) -> String {
    let mut out = String::with_capacity(typ.len());
    let mut depth = 0usize;
    for c in typ.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    normalize_spaces(&out.to_lowercase())
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a catalog descriptor to a canonical type with the Oracle rules.
pub fn to_canonical(desc: &ColumnDesc) -> ColumnType {
    OracleTypes.to_canonical(desc)
}

/// Spell a canonical type as Oracle DDL.
pub fn format_type(column_type: &ColumnType) -> Result<String> {
    OracleTypes.format(column_type)
}

/// Parse an Oracle type expression.
pub fn parse_type(expr: &str) -> Result<ColumnType> {
    OracleTypes.parse(expr)
}
