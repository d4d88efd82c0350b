use rusqlite::types::Value;

use super::*;
use crate::error::{required, ValidationError};

impl Record for DbSupplier {
    const TABLE: &'static str = "suppliers";
    const ENTITY: &'static str = "supplier";
    const COLUMNS: &'static [&'static str] = &["name", "contact_person", "phone", "product_type"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbSupplier {
            id: row.get(0)?,
            name: row.get(1)?,
            contact_person: row.get(2)?,
            phone: row.get(3)?,
            product_type: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.contact_person.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.product_type.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("contact person", &self.contact_person)?;
        required("phone", &self.phone)?;
        required("product type", &self.product_type)
    }
}
