use rusqlite::types::Value;

use super::*;
use crate::error::{required, ValidationError};

impl Record for DbMaterialType {
    const TABLE: &'static str = "material_types";
    const ENTITY: &'static str = "material type";
    const COLUMNS: &'static [&'static str] = &["name", "kind", "unit"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbMaterialType {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: row.get(2)?,
            unit: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.kind.clone()),
            Value::from(self.unit.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("kind", &self.kind)?;
        required("unit", &self.unit)
    }
}
