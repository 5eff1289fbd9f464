//! Table and relation layout the SQL backend resolves paths against.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table '{0}' is not defined in the schema")]
    MissingTable(String),

    #[error("Relation '{relation}' on '{table}' points to undefined table '{target}'")]
    DanglingRelation {
        table: String,
        relation: String,
        target: String,
    },
}

/// Root table plus every table reachable from it.
///
/// ```json
/// {
///   "root": "customers",
///   "tables": {
///     "customers": {
///       "columns": ["id", "name"],
///       "relations": {
///         "orders": { "table": "orders", "local_key": "id", "foreign_key": "customer_id" }
///       }
///     },
///     "orders": { "columns": ["id", "customer_id", "total"] }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub root: String,
    pub tables: HashMap<String, TableDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Known columns. An empty list accepts any column name.
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub relations: HashMap<String, Relation>,
}

/// `parent.local_key = table.foreign_key`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub table: String,
    pub local_key: String,
    pub foreign_key: String,
}

impl Schema {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the root table exists and every relation points to a
    /// defined table.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.tables.contains_key(&self.root) {
            return Err(SchemaError::MissingTable(self.root.clone()));
        }

        for (table_name, table) in &self.tables {
            for (relation_name, relation) in &table.relations {
                if !self.tables.contains_key(&relation.table) {
                    return Err(SchemaError::DanglingRelation {
                        table: table_name.clone(),
                        relation: relation_name.clone(),
                        target: relation.table.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.get(name)
    }
}

impl TableDef {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.is_empty() || self.columns.iter().any(|c| c == name)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }
}
