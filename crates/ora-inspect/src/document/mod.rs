//! Serializable schema documents.
//!
//! A [`Document`] is the flat, hand-editable form of a realm: tables name
//! their schema, column types are native spellings and defaults are plain
//! text. Converting back with [`Document::into_realm`] parses the types,
//! classifies the defaults and links the result, so a document goes through
//! the same checks as an inspected catalog. Index constraint kinds, comments,
//! explicit NULL placement and check columns are carried, so an inspected
//! realm compares equal after a round trip.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::schema::{
    Check, Column, ColumnType, ForeignKey, Identity, Index, IndexColumnProperty, IndexTarget,
    Realm, RealmAttrs, ReferenceOption, Schema, Table,
};
use crate::dialect::defaults::single_quoted;
use crate::dialect::{classify_default, format_type, parse_type};
use crate::error::{InspectError, Result};
use crate::inspect::link;

/// Flat representation of a realm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<RealmAttrs>,

    #[serde(default)]
    pub schemas: Vec<SchemaDoc>,

    #[serde(default)]
    pub tables: Vec<TableDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDoc {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDoc {
    pub name: String,
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<IndexDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKeyDoc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDoc {
    pub name: String,
    /// Native type spelling, e.g. `varchar2(255)`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the column accepts NULL. Columns are NOT NULL unless stated.
    #[serde(default)]
    pub null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDoc {
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    pub parts: Vec<IndexPartDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    /// Backing constraint kind (`P`, `U`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Index key part: exactly one of `column` and `expr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPartDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub desc: bool,
    /// NULL placement, only when it differs from the direction's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nulls_first: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDoc {
    pub symbol: String,
    pub columns: Vec<String>,
    /// Referenced schema. Defaults to the schema of the owning table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_schema: Option<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    #[serde(default)]
    pub on_update: ReferenceOption,
    #[serde(default)]
    pub on_delete: ReferenceOption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDoc {
    pub name: String,
    pub expr: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_inherit: bool,
}

/// Native spelling of a column type. Types that cannot be formatted keep the
/// name the catalog reported.
fn type_spelling(column_type: &ColumnType) -> String {
    format_type(column_type).unwrap_or_else(|_| column_type.native_name().to_string())
}

impl Document {
    /// Flatten an inspected realm.
    pub fn from_realm(realm: &Realm) -> Self {
        let mut doc = Document {
            realm: (realm.attrs != RealmAttrs::default()).then(|| realm.attrs.clone()),
            ..Default::default()
        };
        for schema in &realm.schemas {
            doc.push_schema(schema);
        }
        doc
    }

    /// Flatten a single schema.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut doc = Document {
            realm: schema.realm.clone(),
            ..Default::default()
        };
        doc.push_schema(schema);
        doc
    }

    fn push_schema(&mut self, schema: &Schema) {
        self.schemas.push(SchemaDoc {
            name: schema.name.clone(),
        });
        self.tables
            .extend(schema.tables.iter().map(|t| TableDoc::from_table(&schema.name, t)));
    }

    /// Build and link a realm from the document.
    pub fn into_realm(self) -> Result<Realm> {
        let mut realm = Realm {
            schemas: Vec::with_capacity(self.schemas.len()),
            attrs: self.realm.unwrap_or_default(),
        };
        let mut positions: HashMap<String, usize> = HashMap::new();
        for schema in self.schemas {
            if positions.contains_key(&schema.name) {
                return Err(InspectError::Config(format!(
                    "schema '{}' is declared more than once",
                    schema.name
                )));
            }
            positions.insert(schema.name.clone(), realm.schemas.len());
            realm.schemas.push(Schema::new(schema.name));
        }

        for doc in self.tables {
            let pos = *positions.get(&doc.schema).ok_or_else(|| {
                InspectError::Config(format!(
                    "table '{}' references undeclared schema '{}'",
                    doc.name, doc.schema
                ))
            })?;
            let schema = &mut realm.schemas[pos];
            if schema.table(&doc.name).is_some() {
                return Err(InspectError::Config(format!(
                    "table '{}.{}' is declared more than once",
                    doc.schema, doc.name
                )));
            }
            let table = doc.into_table()?;
            schema.tables.push(table);
        }

        link::link_realm(&mut realm)?;
        Ok(realm)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TableDoc {
    fn from_table(schema: &str, table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            schema: schema.to_string(),
            comment: table.comment.clone(),
            columns: table.columns.iter().map(ColumnDoc::from_column).collect(),
            primary_key: table.primary_key.as_ref().map(IndexDoc::from_index),
            indexes: table.indexes.iter().map(IndexDoc::from_index).collect(),
            foreign_keys: table
                .foreign_keys
                .iter()
                .map(|fk| ForeignKeyDoc {
                    symbol: fk.symbol.clone(),
                    columns: fk.columns.clone(),
                    ref_schema: (fk.ref_schema != schema).then(|| fk.ref_schema.clone()),
                    ref_table: fk.ref_table.clone(),
                    ref_columns: fk.ref_columns.clone(),
                    on_update: fk.on_update,
                    on_delete: fk.on_delete,
                })
                .collect(),
            checks: table
                .checks
                .iter()
                .map(|c| CheckDoc {
                    name: c.name.clone(),
                    expr: c.expr.clone(),
                    columns: c.columns.clone(),
                    no_inherit: c.no_inherit,
                })
                .collect(),
        }
    }

    fn into_table(self) -> Result<Table> {
        let mut table = Table::new(self.name);
        table.comment = self.comment;
        table.columns = self
            .columns
            .into_iter()
            .map(ColumnDoc::into_column)
            .collect::<Result<_>>()?;

        if let Some(pk) = self.primary_key {
            let mut pk = pk.into_index(&table.name)?;
            pk.unique = true;
            pk.constraint_type.get_or_insert_with(|| "P".to_string());
            table.primary_key = Some(pk);
        }
        table.indexes = self
            .indexes
            .into_iter()
            .map(|i| i.into_index(&table.name))
            .collect::<Result<_>>()?;

        table.foreign_keys = self
            .foreign_keys
            .into_iter()
            .map(|fk| ForeignKey {
                symbol: fk.symbol,
                table: table.name.clone(),
                columns: fk.columns,
                ref_schema: fk.ref_schema.unwrap_or_else(|| self.schema.clone()),
                ref_table: fk.ref_table,
                ref_columns: fk.ref_columns,
                on_update: fk.on_update,
                on_delete: fk.on_delete,
            })
            .collect();

        for check in &self.checks {
            let unknown = check
                .columns
                .iter()
                .find(|c| table.column(c.as_str()).is_none());
            if let Some(column) = unknown {
                return Err(InspectError::reference(format!(
                    "check {:?} references unknown column {:?} of table {}",
                    check.name, column, table.name
                )));
            }
        }
        table.checks = self
            .checks
            .into_iter()
            .map(|c| Check {
                name: c.name,
                expr: c.expr,
                columns: c.columns,
                no_inherit: c.no_inherit,
            })
            .collect();
        Ok(table)
    }
}

impl ColumnDoc {
    fn from_column(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            type_name: type_spelling(&column.data_type),
            null: column.nullable,
            default: column.default.as_ref().map(|d| d.as_str().to_string()),
            comment: column.comment.clone(),
            charset: column.charset.clone(),
            collation: column.collation.clone(),
            identity: column.identity.clone(),
        }
    }

    fn into_column(self) -> Result<Column> {
        let data_type = parse_type(&self.type_name)?;
        let default = self.default.map(|d| {
            let d = single_quoted(&d).unwrap_or(d);
            classify_default(&data_type, &d)
        });
        Ok(Column {
            name: self.name,
            data_type,
            nullable: self.null,
            default,
            comment: self.comment,
            charset: self.charset,
            collation: self.collation,
            identity: self.identity,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        })
    }
}

impl IndexDoc {
    fn from_index(index: &Index) -> Self {
        Self {
            name: index.name.clone(),
            unique: index.unique,
            index_type: (!index.index_type.is_empty()).then(|| index.index_type.clone()),
            parts: index
                .parts
                .iter()
                .map(|p| {
                    let (column, expr) = match &p.target {
                        IndexTarget::Column(c) => (Some(c.clone()), None),
                        IndexTarget::Expr(e) => (None, Some(e.clone())),
                    };
                    let nulls_first = (p.props != IndexColumnProperty::ordered(p.props.desc))
                        .then_some(p.props.nulls_first);
                    IndexPartDoc {
                        column,
                        expr,
                        desc: p.props.desc,
                        nulls_first,
                    }
                })
                .collect(),
            predicate: index.predicate.clone(),
            constraint_type: index.constraint_type.clone(),
            comment: index.comment.clone(),
        }
    }

    fn into_index(self, table: &str) -> Result<Index> {
        let mut index = Index::new(
            self.name,
            self.unique,
            self.index_type.unwrap_or_else(|| "NORMAL".to_string()),
        );
        index.predicate = self.predicate;
        index.constraint_type = self.constraint_type;
        index.comment = self.comment;
        for part in self.parts {
            let target = match (part.column, part.expr) {
                (Some(column), None) => IndexTarget::Column(column),
                (None, Some(expr)) => IndexTarget::Expr(expr),
                _ => {
                    return Err(InspectError::Config(format!(
                        "index '{}' of table '{}' needs exactly one of column or expr per part",
                        index.name, table
                    )))
                }
            };
            let mut props = IndexColumnProperty::ordered(part.desc);
            if let Some(nulls_first) = part.nulls_first {
                props.nulls_first = nulls_first;
                props.nulls_last = !nulls_first;
            }
            index.push_part(target, props);
        }
        Ok(index)
    }
}
