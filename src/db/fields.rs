use rusqlite::types::Value;

use super::*;
use crate::error::{positive_real, required, ValidationError};

impl Record for DbField {
    const TABLE: &'static str = "fields";
    const ENTITY: &'static str = "field";
    const COLUMNS: &'static [&'static str] = &["name", "area", "soil_type"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbField {
            id: row.get(0)?,
            name: row.get(1)?,
            area: row.get(2)?,
            soil_type: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.area),
            Value::from(self.soil_type.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        positive_real("area", self.area)?;
        required("soil type", &self.soil_type)
    }
}
