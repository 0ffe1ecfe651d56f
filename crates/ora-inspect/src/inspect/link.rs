//! Resolution of name-based references once all entities are assembled.

use crate::core::schema::{Realm, Schema, SchemaRef, Table};
use crate::error::{InspectError, Result};

/// Rebuild the index and foreign key back-references of every column.
pub fn link_table(table: &mut Table) -> Result<()> {
    let mut refs: Vec<(String, String, bool)> = Vec::new();
    for index in table.all_indexes() {
        for column in index.column_names() {
            refs.push((column.to_string(), index.name.clone(), true));
        }
    }
    for fk in &table.foreign_keys {
        for column in &fk.columns {
            refs.push((column.clone(), fk.symbol.clone(), false));
        }
    }

    for column in &mut table.columns {
        column.indexes.clear();
        column.foreign_keys.clear();
    }

    let table_name = table.full_name();
    for (column_name, owner, is_index) in refs {
        let column = table.column_mut(&column_name).ok_or_else(|| {
            InspectError::reference(format!(
                "{} {:?} references unknown column {:?} of table {}",
                if is_index { "index" } else { "foreign key" },
                owner,
                column_name,
                table_name
            ))
        })?;
        let list = if is_index {
            &mut column.indexes
        } else {
            &mut column.foreign_keys
        };
        if !list.contains(&owner) {
            list.push(owner);
        }
    }
    Ok(())
}

/// Attach every table to its schema and link its columns.
pub fn link_schema(schema: &mut Schema) -> Result<()> {
    for table in &mut schema.tables {
        table.schema = Some(SchemaRef::new(schema.name.clone()));
        link_table(table)?;
    }
    Ok(())
}

/// Link a set of schemas inspected together.
///
/// Foreign keys pointing at a table inside the set are checked against that
/// table's columns. Targets outside the set are left unresolved.
pub fn link_schemas(schemas: &mut [Schema]) -> Result<()> {
    for schema in schemas.iter_mut() {
        link_schema(schema)?;
    }

    for schema in schemas.iter() {
        for table in &schema.tables {
            for fk in &table.foreign_keys {
                let Some(target) = schemas
                    .iter()
                    .find(|s| s.name == fk.ref_schema)
                    .and_then(|s| s.table(&fk.ref_table))
                else {
                    continue;
                };
                if let Some(missing) = fk.ref_columns.iter().find(|c| target.column(c).is_none()) {
                    return Err(InspectError::reference(format!(
                        "foreign key {:?} of table {} references unknown column {:?} of table {}",
                        fk.symbol,
                        table.full_name(),
                        missing,
                        target.full_name()
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Link all schemas of a realm and set their realm reference.
pub fn link_realm(realm: &mut Realm) -> Result<()> {
    link_schemas(&mut realm.schemas)?;
    for schema in &mut realm.schemas {
        if schema.realm.is_some() {
            return Err(InspectError::reference(format!(
                "schema {:?} is already attached to a realm",
                schema.name
            )));
        }
        schema.realm = Some(realm.attrs.clone());
    }
    Ok(())
}
