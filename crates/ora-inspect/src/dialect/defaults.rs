//! Column default classification.

use crate::core::schema::{ColumnType, DefaultExpr};

/// Classify the stored text of a column default.
///
/// Boolean literals, numeric literals and single-quoted strings are literals.
/// A cast of a quoted value to the column's own type (`'2021-01-01'::date`) is
/// unwrapped into a literal when the inner value suits the column type.
/// Everything else is kept verbatim as a raw expression.
pub fn classify_default(column_type: &ColumnType, raw: &str) -> DefaultExpr {
    if is_literal_bool(raw) || is_literal_number(raw) || is_quoted(raw, '\'') {
        return DefaultExpr::Literal(raw.to_string());
    }
    match unwrap_cast(column_type, raw) {
        Some(literal) => DefaultExpr::Literal(literal),
        None => DefaultExpr::Raw(raw.to_string()),
    }
}

fn unwrap_cast(column_type: &ColumnType, raw: &str) -> Option<String> {
    let (quoted, cast) = raw.rsplit_once("::")?;
    if !cast.trim().eq_ignore_ascii_case(column_type.native_name().trim())
        || !is_quoted(quoted, '\'')
    {
        return None;
    }
    let inner = &quoted[1..quoted.len() - 1];
    match column_type {
        ColumnType::Integer { .. } | ColumnType::Decimal { .. } | ColumnType::Float { .. } => {
            is_literal_number(inner).then(|| inner.to_string())
        }
        ColumnType::String { .. }
        | ColumnType::Time { .. }
        | ColumnType::Binary { .. }
        | ColumnType::Json { .. } => Some(quoted.to_string()),
        ColumnType::Unsupported { .. } | ColumnType::UserDefined { .. } => None,
    }
}

/// Whether `s` is `true` or `false`, in any case.
pub fn is_literal_bool(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
}

/// Whether `s` is a decimal, scientific or hexadecimal number.
pub fn is_literal_number(s: &str) -> bool {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}

/// Whether `s` is wrapped in `q` with every inner `q` escaped, either doubled
/// or preceded by a backslash.
pub fn is_quoted(s: &str, q: char) -> bool {
    let Some(inner) = s.strip_prefix(q).and_then(|s| s.strip_suffix(q)) else {
        return false;
    };
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if chars.next().is_none() {
                return false;
            }
        } else if c == q && chars.next() != Some(q) {
            return false;
        }
    }
    true
}

/// Rewrite a double-quoted string value as a single-quoted SQL literal.
///
/// Returns `None` when `s` is not double-quoted.
pub fn single_quoted(s: &str) -> Option<String> {
    if !is_quoted(s, '"') {
        return None;
    }
    let inner = s[1..s.len() - 1].replace("\"\"", "\"").replace('\'', "''");
    Some(format!("'{}'", inner))
}
