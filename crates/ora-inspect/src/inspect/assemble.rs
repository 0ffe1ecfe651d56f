//! Assembly of decoded dictionary rows into table entities.
//!
//! Rows of one index, foreign key or check arrive as several rows sharing a
//! name. They are grouped in first-seen order so that the result does not
//! depend on anything but the query's own ordering.

use std::collections::HashMap;

use tracing::warn;

use crate::core::schema::{
    Check, Column, ForeignKey, Identity, Index, IndexColumnProperty, IndexTarget, ReferenceOption,
    Sequence, Table,
};
use crate::dialect::{classify_default, to_canonical, ColumnDesc};
use crate::error::{InspectError, Result};

use super::decode::{CheckRow, ColumnRow, ForeignKeyRow, IndexRow};

/// Name-keyed grouping that keeps first-seen order.
struct Grouped<T> {
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Grouped<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn entry(&mut self, name: &str, create: impl FnOnce() -> T) -> &mut T {
        let pos = match self.positions.get(name) {
            Some(&pos) => pos,
            None => {
                self.items.push(create());
                self.positions.insert(name.to_string(), self.items.len() - 1);
                self.items.len() - 1
            }
        };
        &mut self.items[pos]
    }

    fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// Build a column from its catalog row.
pub fn column_from_row(row: ColumnRow) -> Column {
    let data_type = to_canonical(&ColumnDesc {
        typ: row.data_type,
        size: row.size,
        precision: row.precision,
        scale: row.scale,
        udt_owner: row.udt_owner,
    });

    let identity = row.identity.then(|| Identity {
        generation: row.generation.unwrap_or_else(|| "BY DEFAULT".to_string()),
        sequence: Sequence {
            start: row.identity_start.unwrap_or(1),
            increment: row.identity_increment.unwrap_or(1),
        },
    });

    // Identity columns report their backing sequence as the default.
    let default = match identity {
        Some(_) => None,
        None => row.default.map(|d| classify_default(&data_type, &d)),
    };

    Column {
        name: row.name,
        data_type,
        nullable: row.nullable,
        default,
        comment: row.comment,
        charset: row.charset,
        collation: row.collation,
        identity,
        indexes: Vec::new(),
        foreign_keys: Vec::new(),
    }
}

/// Append columns in row order.
pub fn add_columns(table: &mut Table, rows: Vec<ColumnRow>) {
    table.columns.extend(rows.into_iter().map(column_from_row));
}

/// Group index rows into indexes and attach them to the table.
///
/// Each row adds one part, numbered in encounter order. An expression wins
/// over the (system generated) column name of function-based parts, unless
/// it only quotes a column of the table. The
/// primary-key flag routes an index to [`Table::primary_key`]. Nothing is
/// attached unless every part resolves.
pub fn add_indexes(table: &mut Table, rows: Vec<IndexRow>) -> Result<()> {
    let mut grouped: Grouped<(Index, bool)> = Grouped::new();

    for row in rows {
        let target = match (row.expression, row.column) {
            (Some(expr), _) => match quoted_column(table, &expr) {
                Some(column) => IndexTarget::Column(column.to_string()),
                None => IndexTarget::Expr(expr),
            },
            (None, Some(column)) => {
                if table.column(&column).is_none() {
                    return Err(InspectError::reference(format!(
                        "index {:?} references unknown column {:?} of table {}",
                        row.name,
                        column,
                        table.full_name()
                    )));
                }
                IndexTarget::Column(column)
            }
            (None, None) => {
                return Err(InspectError::MalformedMetadata(format!(
                    "index {:?} of table {} has a part without column or expression",
                    row.name,
                    table.full_name()
                )))
            }
        };

        let (index, primary) = grouped.entry(&row.name, || {
            let mut index = Index::new(row.name.clone(), row.unique, row.index_type.clone());
            index.constraint_type = row.constraint_type.clone();
            index.predicate = row.predicate.clone();
            index.comment = row.comment.clone();
            (index, row.primary)
        });
        *primary |= row.primary;
        index.push_part(
            target,
            IndexColumnProperty {
                asc: row.asc,
                desc: row.desc,
                nulls_first: row.nulls_first,
                nulls_last: row.nulls_last,
            },
        );
    }

    let mut primary_key: Option<Index> = None;
    let mut indexes = Vec::new();
    for (index, primary) in grouped.into_vec() {
        if !primary {
            indexes.push(index);
        } else if let Some(existing) = &primary_key {
            return Err(InspectError::MalformedMetadata(format!(
                "table {} has more than one primary key: {:?} and {:?}",
                table.full_name(),
                existing.name, index.name
            )));
        } else {
            primary_key = Some(index);
        }
    }

    if primary_key.is_some() {
        table.primary_key = primary_key;
    }
    table.indexes.extend(indexes);
    Ok(())
}

/// Table column named by a bare quoted identifier. Descending key parts are
/// stored as hidden columns whose expression is just `"NAME"`.
fn quoted_column<'a>(table: &'a Table, expr: &str) -> Option<&'a str> {
    let name = expr.trim().strip_prefix('"')?.strip_suffix('"')?;
    if name.contains('"') {
        return None;
    }
    table.column(name).map(|c| c.name.as_str())
}

/// Group foreign key rows by constraint name and attach them to the table.
///
/// `owner` is the schema the table lives in; references back into the same
/// table are validated against its columns.
pub fn add_foreign_keys(table: &mut Table, owner: &str, rows: Vec<ForeignKeyRow>) -> Result<()> {
    let mut grouped: Grouped<ForeignKey> = Grouped::new();

    for row in rows {
        if table.column(&row.column).is_none() {
            return Err(InspectError::reference(format!(
                "foreign key {:?} references unknown column {:?} of table {}",
                row.symbol,
                row.column,
                table.full_name()
            )));
        }
        let self_ref = row.ref_schema == owner && row.ref_table == table.name;
        if self_ref && table.column(&row.ref_column).is_none() {
            return Err(InspectError::reference(format!(
                "foreign key {:?} references unknown column {:?} of table {}",
                row.symbol,
                row.ref_column,
                table.full_name()
            )));
        }

        let fk = grouped.entry(&row.symbol, || ForeignKey {
            symbol: row.symbol.clone(),
            table: row.table.clone(),
            columns: Vec::new(),
            ref_schema: row.ref_schema.clone(),
            ref_table: row.ref_table.clone(),
            ref_columns: Vec::new(),
            on_update: reference_option(&row.symbol, row.update_rule.as_deref()),
            on_delete: reference_option(&row.symbol, row.delete_rule.as_deref()),
        });
        if !fk.columns.contains(&row.column) {
            fk.columns.push(row.column);
        }
        if !fk.ref_columns.contains(&row.ref_column) {
            fk.ref_columns.push(row.ref_column);
        }
    }

    table.foreign_keys.extend(grouped.into_vec());
    Ok(())
}

fn reference_option(symbol: &str, rule: Option<&str>) -> ReferenceOption {
    match rule {
        None => ReferenceOption::NoAction,
        Some(rule) => ReferenceOption::from_rule(rule).unwrap_or_else(|| {
            warn!(
                "Unknown referential action {:?} on foreign key {}, using NO ACTION",
                rule, symbol
            );
            ReferenceOption::NoAction
        }),
    }
}

/// Group check rows by constraint name and attach them to the table.
pub fn add_checks(table: &mut Table, rows: Vec<CheckRow>) -> Result<()> {
    let mut grouped: Grouped<Check> = Grouped::new();

    for row in rows {
        if let Some(column) = &row.column {
            if table.column(column).is_none() {
                return Err(InspectError::reference(format!(
                    "check {:?} references unknown column {:?} of table {}",
                    row.name,
                    column,
                    table.full_name()
                )));
            }
        }

        let check = grouped.entry(&row.name, || Check {
            name: row.name.clone(),
            expr: row.expr.clone(),
            columns: Vec::new(),
            no_inherit: row.no_inherit,
        });
        if let Some(column) = row.column {
            if !check.columns.contains(&column) {
                check.columns.push(column);
            }
        }
    }

    table.checks.extend(grouped.into_vec());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{ColumnType, DefaultExpr};

    fn table() -> Table {
        let mut table = Table::new("EMP");
        for name in ["ID", "NAME", "MANAGER_ID", "DEPT_ID"] {
            table.columns.push(Column::new(
                name,
                ColumnType::Decimal {
                    t: "number".to_string(),
                    precision: 10,
                    scale: 0,
                },
            ));
        }
        table
    }

    fn index_row(name: &str, column: &str) -> IndexRow {
        IndexRow {
            name: name.to_string(),
            index_type: "NORMAL".to_string(),
            column: Some(column.to_string()),
            primary: false,
            unique: false,
            constraint_type: None,
            predicate: None,
            expression: None,
            asc: true,
            desc: false,
            nulls_first: false,
            nulls_last: true,
            comment: None,
        }
    }

    fn fk_row(symbol: &str, column: &str, ref_table: &str, ref_column: &str) -> ForeignKeyRow {
        ForeignKeyRow {
            symbol: symbol.to_string(),
            table: "EMP".to_string(),
            column: column.to_string(),
            schema: "HR".to_string(),
            ref_table: ref_table.to_string(),
            ref_column: ref_column.to_string(),
            ref_schema: "HR".to_string(),
            update_rule: Some("NO ACTION".to_string()),
            delete_rule: Some("CASCADE".to_string()),
        }
    }

    fn check_row(name: &str, column: Option<&str>) -> CheckRow {
        CheckRow {
            name: name.to_string(),
            expr: "ID > 0".to_string(),
            column: column.map(String::from),
            no_inherit: false,
        }
    }

    fn column_row(data_type: &str, default: Option<&str>) -> ColumnRow {
        ColumnRow {
            name: "C".to_string(),
            data_type: data_type.to_string(),
            nullable: false,
            default: default.map(String::from),
            size: 0,
            precision: 0,
            scale: 0,
            charset: None,
            collation: None,
            udt_owner: None,
            identity: false,
            identity_start: None,
            identity_increment: None,
            generation: None,
            comment: None,
        }
    }

    #[test]
    fn test_index_parts_follow_row_order() {
        let mut table = table();
        add_indexes(
            &mut table,
            vec![index_row("IDX_A", "NAME"), index_row("IDX_A", "ID")],
        )
        .unwrap();

        assert_eq!(table.indexes.len(), 1);
        let idx = &table.indexes[0];
        assert_eq!(idx.parts[0].seq_no, 1);
        assert_eq!(idx.parts[0].column_name(), Some("NAME"));
        assert_eq!(idx.parts[1].seq_no, 2);
        assert_eq!(idx.parts[1].column_name(), Some("ID"));
    }

    #[test]
    fn test_indexes_keep_first_seen_order() {
        let mut table = table();
        add_indexes(
            &mut table,
            vec![
                index_row("IDX_B", "NAME"),
                index_row("IDX_A", "ID"),
                index_row("IDX_B", "DEPT_ID"),
            ],
        )
        .unwrap();
        let names: Vec<&str> = table.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["IDX_B", "IDX_A"]);
        assert_eq!(table.indexes[0].parts.len(), 2);
    }

    #[test]
    fn test_primary_key_is_routed() {
        let mut table = table();
        let mut pk = index_row("EMP_PK", "ID");
        pk.primary = true;
        pk.unique = true;
        pk.constraint_type = Some("P".to_string());
        add_indexes(&mut table, vec![pk, index_row("EMP_NAME_IDX", "NAME")]).unwrap();

        let pk = table.primary_key.as_ref().unwrap();
        assert_eq!(pk.name, "EMP_PK");
        assert!(pk.unique);
        assert_eq!(table.indexes.len(), 1);
    }

    #[test]
    fn test_expression_part_wins_over_column() {
        let mut table = table();
        let mut row = index_row("EMP_UPPER_IDX", "SYS_NC00005$");
        row.expression = Some("UPPER(\"NAME\")".to_string());
        add_indexes(&mut table, vec![row]).unwrap();
        assert_eq!(
            table.indexes[0].parts[0].target,
            IndexTarget::Expr("UPPER(\"NAME\")".to_string())
        );
    }

    #[test]
    fn test_descending_part_resolves_to_column() {
        let mut table = table();
        let mut row = index_row("EMP_NAME_DESC", "SYS_NC00004$");
        row.index_type = "FUNCTION-BASED NORMAL".to_string();
        row.expression = Some("\"NAME\"".to_string());
        row.asc = false;
        row.desc = true;
        add_indexes(&mut table, vec![row]).unwrap();

        let part = &table.indexes[0].parts[0];
        assert_eq!(part.target, IndexTarget::Column("NAME".to_string()));
        assert!(part.props.desc);
        assert_eq!(table.indexes[0].column_names().collect::<Vec<_>>(), vec!["NAME"]);

        crate::inspect::link::link_table(&mut table).unwrap();
        assert_eq!(table.column("NAME").unwrap().indexes, vec!["EMP_NAME_DESC"]);
    }

    #[test]
    fn test_quoted_expression_on_unknown_column_stays_expression() {
        let mut table = table();
        let mut row = index_row("EMP_X", "SYS_NC00009$");
        row.expression = Some("\"OTHER\"".to_string());
        add_indexes(&mut table, vec![row]).unwrap();
        assert_eq!(
            table.indexes[0].parts[0].target,
            IndexTarget::Expr("\"OTHER\"".to_string())
        );
    }

    #[test]
    fn test_second_primary_key_is_malformed() {
        let mut table = table();
        let mut first = index_row("PK1", "ID");
        first.primary = true;
        let mut second = index_row("PK2", "NAME");
        second.primary = true;

        let err = add_indexes(&mut table, vec![first, second]).unwrap_err();
        assert!(matches!(err, InspectError::MalformedMetadata(_)));
        assert!(err.to_string().contains("more than one primary key"));
        assert!(table.primary_key.is_none());
        assert!(table.indexes.is_empty());
    }

    #[test]
    fn test_index_unknown_column_attaches_nothing() {
        let mut table = table();
        let err = add_indexes(
            &mut table,
            vec![index_row("IDX_A", "NAME"), index_row("IDX_A", "MISSING")],
        )
        .unwrap_err();
        assert!(matches!(err, InspectError::ReferenceIntegrity(_)));
        assert!(table.indexes.is_empty());
    }

    #[test]
    fn test_foreign_keys_grouped_and_deduplicated() {
        let mut table = table();
        add_foreign_keys(
            &mut table,
            "HR",
            vec![
                fk_row("EMP_DEPT_FK", "DEPT_ID", "DEPT", "ID"),
                fk_row("EMP_DEPT_FK", "DEPT_ID", "DEPT", "ID"),
                fk_row("EMP_MGR_FK", "MANAGER_ID", "EMP", "ID"),
            ],
        )
        .unwrap();

        assert_eq!(table.foreign_keys.len(), 2);
        let fk = &table.foreign_keys[0];
        assert_eq!(fk.columns, vec!["DEPT_ID"]);
        assert_eq!(fk.ref_columns, vec!["ID"]);
        assert_eq!(fk.on_delete, ReferenceOption::Cascade);
        assert_eq!(fk.on_update, ReferenceOption::NoAction);
    }

    #[test]
    fn test_self_reference_checks_target_column() {
        let mut table = table();
        let err = add_foreign_keys(
            &mut table,
            "HR",
            vec![fk_row("EMP_MGR_FK", "MANAGER_ID", "EMP", "EMP_NO")],
        )
        .unwrap_err();
        assert!(matches!(err, InspectError::ReferenceIntegrity(_)));
    }

    #[test]
    fn test_unknown_delete_rule_falls_back() {
        let mut table = table();
        let mut row = fk_row("EMP_DEPT_FK", "DEPT_ID", "DEPT", "ID");
        row.delete_rule = Some("SOMETIMES".to_string());
        add_foreign_keys(&mut table, "HR", vec![row]).unwrap();
        assert_eq!(table.foreign_keys[0].on_delete, ReferenceOption::NoAction);
    }

    #[test]
    fn test_checks_accumulate_columns() {
        let mut table = table();
        add_checks(
            &mut table,
            vec![
                check_row("CK_IDS", Some("ID")),
                check_row("CK_IDS", Some("DEPT_ID")),
                check_row("CK_CONST", None),
            ],
        )
        .unwrap();
        assert_eq!(table.checks.len(), 2);
        assert_eq!(table.checks[0].columns, vec!["ID", "DEPT_ID"]);
        assert!(table.checks[1].columns.is_empty());
    }

    #[test]
    fn test_check_unknown_column_is_fatal() {
        let mut table = table();
        let err = add_checks(&mut table, vec![check_row("CK_X", Some("NOPE"))]).unwrap_err();
        assert!(matches!(err, InspectError::ReferenceIntegrity(_)));
        assert!(table.checks.is_empty());
    }

    #[test]
    fn test_column_from_row() {
        let col = column_from_row(column_row("DATE", Some("SYSDATE")));
        assert_eq!(
            col.data_type,
            ColumnType::Time {
                t: "date".to_string()
            }
        );
        assert_eq!(col.default, Some(DefaultExpr::Raw("SYSDATE".to_string())));
        assert!(!col.nullable);

        let mut row = column_row("NUMBER", Some("\"HR\".\"ISEQ$$_73\".nextval"));
        row.identity = true;
        row.generation = Some("ALWAYS".to_string());
        row.identity_start = Some(100);
        let col = column_from_row(row);
        let identity = col.identity.unwrap();
        assert_eq!(identity.generation, "ALWAYS");
        assert_eq!(identity.sequence.start, 100);
        assert_eq!(identity.sequence.increment, 1);
        assert_eq!(col.default, None);
    }
}
