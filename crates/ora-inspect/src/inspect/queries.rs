//! Oracle data dictionary queries.
//!
//! Queries bind positional parameters (`:1`, `:2`, ...). Result column order
//! is part of the contract with [`super::decode`].

use crate::core::value::CatalogValue;

/// Session parameters and server version, one `(name, value)` row each,
/// ordered by name: collate, ctype, version.
pub const PARAMS_QUERY: &str = r#"
SELECT name, value FROM (
    SELECT 'collate' AS name, value FROM nls_session_parameters WHERE parameter = 'NLS_SORT'
    UNION ALL
    SELECT 'ctype' AS name, value FROM nls_database_parameters WHERE parameter = 'NLS_CHARACTERSET'
    UNION ALL
    SELECT 'version' AS name, version AS value FROM product_component_version
    WHERE product LIKE 'Oracle Database%'
)
ORDER BY name
"#;

/// Schema the session is attached to.
pub const CURRENT_SCHEMA_QUERY: &str =
    "SELECT SYS_CONTEXT('USERENV', 'CURRENT_SCHEMA') FROM DUAL";

/// Table identity in the session's current schema. Binds the table name.
pub const TABLE_QUERY: &str = r#"
SELECT t.owner, t.table_name, c.comments
FROM all_tables t
LEFT JOIN all_tab_comments c
    ON c.owner = t.owner AND c.table_name = t.table_name AND c.table_type = 'TABLE'
WHERE t.table_name = :1
    AND t.owner = SYS_CONTEXT('USERENV', 'CURRENT_SCHEMA')
"#;

/// Table identity in an explicit schema. Binds the table name and the owner.
pub const TABLE_SCHEMA_QUERY: &str = r#"
SELECT t.owner, t.table_name, c.comments
FROM all_tables t
LEFT JOIN all_tab_comments c
    ON c.owner = t.owner AND c.table_name = t.table_name AND c.table_type = 'TABLE'
WHERE t.table_name = :1
    AND t.owner = :2
"#;

/// Columns of one table. Binds the owner and the table name.
pub const COLUMNS_QUERY: &str = r#"
SELECT
    c.column_name,
    c.data_type,
    c.nullable,
    c.data_default,
    DECODE(c.char_length, 0, c.data_length, c.char_length) AS data_size,
    c.data_precision,
    c.data_scale,
    c.character_set_name,
    c.collation,
    c.data_type_owner,
    c.identity_column,
    TO_NUMBER(REGEXP_SUBSTR(i.identity_options, 'START WITH: (-?[0-9]+)', 1, 1, NULL, 1)) AS identity_start,
    TO_NUMBER(REGEXP_SUBSTR(i.identity_options, 'INCREMENT BY: (-?[0-9]+)', 1, 1, NULL, 1)) AS identity_increment,
    i.generation_type,
    cc.comments
FROM all_tab_cols c
LEFT JOIN all_tab_identity_cols i
    ON i.owner = c.owner AND i.table_name = c.table_name AND i.column_name = c.column_name
LEFT JOIN all_col_comments cc
    ON cc.owner = c.owner AND cc.table_name = c.table_name AND cc.column_name = c.column_name
WHERE c.owner = :1
    AND c.table_name = :2
    AND c.hidden_column = 'NO'
ORDER BY c.column_id
"#;

/// Index parts of one table, LOB indexes excluded. Binds the owner and the
/// table name.
pub const INDEXES_QUERY: &str = r#"
SELECT
    i.index_name,
    i.index_type,
    ic.column_name,
    CASE WHEN c.constraint_type = 'P' THEN 'Y' ELSE 'N' END AS is_primary,
    CASE WHEN i.uniqueness = 'UNIQUE' THEN 'Y' ELSE 'N' END AS is_unique,
    c.constraint_type,
    NULL AS predicate,
    ie.column_expression,
    CASE WHEN ic.descend = 'ASC' THEN 'Y' ELSE 'N' END AS is_asc,
    CASE WHEN ic.descend = 'DESC' THEN 'Y' ELSE 'N' END AS is_desc,
    CASE WHEN ic.descend = 'DESC' THEN 'Y' ELSE 'N' END AS nulls_first,
    CASE WHEN ic.descend = 'ASC' THEN 'Y' ELSE 'N' END AS nulls_last,
    NULL AS index_comment
FROM all_indexes i
JOIN all_ind_columns ic
    ON ic.index_owner = i.owner AND ic.index_name = i.index_name
LEFT JOIN all_ind_expressions ie
    ON ie.index_owner = ic.index_owner
    AND ie.index_name = ic.index_name
    AND ie.column_position = ic.column_position
LEFT JOIN all_constraints c
    ON c.owner = i.table_owner
    AND c.table_name = i.table_name
    AND c.index_name = i.index_name
    AND c.constraint_type IN ('P', 'U')
WHERE i.table_owner = :1
    AND i.table_name = :2
    AND i.index_type <> 'LOB'
ORDER BY i.index_name, ic.column_position
"#;

/// Foreign key columns of one table. Oracle has no ON UPDATE actions.
/// Binds the owner and the table name.
pub const FKS_QUERY: &str = r#"
SELECT
    c.constraint_name,
    c.table_name,
    cc.column_name,
    c.owner,
    rc.table_name AS referenced_table,
    rcc.column_name AS referenced_column,
    rc.owner AS referenced_owner,
    'NO ACTION' AS update_rule,
    c.delete_rule
FROM all_constraints c
JOIN all_cons_columns cc
    ON cc.owner = c.owner AND cc.constraint_name = c.constraint_name
JOIN all_constraints rc
    ON rc.owner = c.r_owner AND rc.constraint_name = c.r_constraint_name
JOIN all_cons_columns rcc
    ON rcc.owner = rc.owner
    AND rcc.constraint_name = rc.constraint_name
    AND rcc.position = cc.position
WHERE c.constraint_type = 'R'
    AND c.owner = :1
    AND c.table_name = :2
ORDER BY c.constraint_name, cc.position
"#;

/// Check constraints of one table, NOT NULL constraints excluded.
/// Binds the owner and the table name.
pub const CHECKS_QUERY: &str = r#"
SELECT
    c.constraint_name,
    c.search_condition_vc,
    cc.column_name,
    'N' AS no_inherit
FROM all_constraints c
LEFT JOIN all_cons_columns cc
    ON cc.owner = c.owner AND cc.constraint_name = c.constraint_name
WHERE c.constraint_type = 'C'
    AND c.owner = :1
    AND c.table_name = :2
    AND c.search_condition_vc NOT LIKE '"%" IS NOT NULL'
ORDER BY c.constraint_name, cc.column_name
"#;

/// Accessible schemas, sorted by name.
///
/// With a non-empty `names` filter only those schemas are returned, otherwise
/// every schema except `exclude`.
pub fn schemas_query(names: &[String], exclude: &[String]) -> (String, Vec<CatalogValue>) {
    let mut sql = String::from("SELECT username FROM all_users WHERE INSTR(username, '$') = 0");
    let args = if !names.is_empty() {
        sql.push_str(&format!(" AND username IN {}", placeholders(1, names.len())));
        bind_all(names)
    } else if !exclude.is_empty() {
        sql.push_str(&format!(
            " AND username NOT IN {}",
            placeholders(1, exclude.len())
        ));
        bind_all(exclude)
    } else {
        Vec::new()
    };
    sql.push_str(" ORDER BY username");
    (sql, args)
}

/// Tables of one schema, sorted by name, optionally restricted to `names`.
pub fn tables_query(schema: &str, names: &[String]) -> (String, Vec<CatalogValue>) {
    let mut sql = String::from(
        "SELECT table_name FROM all_tables WHERE owner = :1 AND dropped = 'NO' AND nested = 'NO' AND secondary = 'N'",
    );
    let mut args = vec![CatalogValue::from(schema)];
    if !names.is_empty() {
        sql.push_str(&format!(
            " AND table_name IN {}",
            placeholders(2, names.len())
        ));
        args.extend(bind_all(names));
    }
    sql.push_str(" ORDER BY table_name");
    (sql, args)
}

/// `(:start, :start+1, ...)` with `count` placeholders.
fn placeholders(start: usize, count: usize) -> String {
    let list: Vec<String> = (start..start + count).map(|n| format!(":{}", n)).collect();
    format!("({})", list.join(", "))
}

fn bind_all(values: &[String]) -> Vec<CatalogValue> {
    values.iter().map(|v| CatalogValue::from(v.as_str())).collect()
}
