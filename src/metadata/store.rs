use serde::{Deserialize, Serialize};

use super::field::{Database, Field, Table};
use crate::model::FieldId;

/// Loaded metadata, looked up by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub databases: Vec<Database>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Metadata {
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn table(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn database(&self, id: i64) -> Option<&Database> {
        self.databases.iter().find(|d| d.id == id)
    }

    /// Table the field belongs to
    pub fn field_table(&self, field: &Field) -> Option<&Table> {
        self.table(field.table_id?)
    }

    /// Database the table lives in
    pub fn table_database(&self, table: &Table) -> Option<&Database> {
        self.database(table.db_id)
    }

    /// Add a field, replacing any previously loaded version
    pub fn upsert_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.id == field.id) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}
