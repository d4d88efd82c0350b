use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, ValidationError};

impl Record for DbTechnique {
    const TABLE: &'static str = "techniques";
    const ENTITY: &'static str = "technique";
    const COLUMNS: &'static [&'static str] = &["name", "kind", "usage_cost", "condition"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbTechnique {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: row.get(2)?,
            usage_cost: row.get(3)?,
            condition: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.kind.clone()),
            Value::from(self.usage_cost),
            Value::from(self.condition.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("kind", &self.kind)?;
        positive("usage cost", self.usage_cost)?;
        required("condition", &self.condition)
    }
}
