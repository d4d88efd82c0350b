use rusqlite::types::Value;

use super::*;
use crate::error::{required, ValidationError};

impl Record for DbEmployee {
    const TABLE: &'static str = "employees";
    const ENTITY: &'static str = "employee";
    const COLUMNS: &'static [&'static str] = &["full_name", "phone", "position"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbEmployee {
            id: row.get(0)?,
            full_name: row.get(1)?,
            phone: row.get(2)?,
            position: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.full_name.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.position.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("full name", &self.full_name)?;
        required("phone", &self.phone)?;
        required("position", &self.position)
    }
}
