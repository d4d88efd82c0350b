use rusqlite::types::Value;

use super::*;
use crate::error::{positive_real, required, ValidationError};

impl Record for DbCulture {
    const TABLE: &'static str = "cultures";
    const ENTITY: &'static str = "culture";
    const COLUMNS: &'static [&'static str] = &["name", "seasonality", "average_yield"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbCulture {
            id: row.get(0)?,
            name: row.get(1)?,
            seasonality: row.get(2)?,
            average_yield: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.seasonality.clone()),
            Value::from(self.average_yield),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("seasonality", &self.seasonality)?;
        positive_real("average yield", self.average_yield)
    }
}
