use rusqlite::types::Value;

use super::*;
use crate::error::{positive, selected, FarmError, ValidationError};

impl Record for DbMaterialUsage {
    const TABLE: &'static str = "material_usages";
    const ENTITY: &'static str = "material usage";
    const COLUMNS: &'static [&'static str] = &["material_type_id", "quantity", "work_id"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbMaterialUsage {
            id: row.get(0)?,
            material_type_id: row.get(1)?,
            quantity: row.get(2)?,
            work_id: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.material_type_id),
            Value::from(self.quantity),
            Value::from(self.work_id),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("material", self.material_type_id)?;
        positive("quantity", self.quantity)?;
        selected("work", self.work_id)
    }
}

impl FarmDb {
    /// List every material usage with the material's name/unit and the
    /// consuming work's display names.
    pub fn list_material_usages_detailed(&self) -> Result<Vec<MaterialUsageDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT mu.id, mu.material_type_id, mu.quantity, mu.work_id,
                    mt.name, mt.unit, wt.name, f.name
             FROM material_usages mu
             JOIN material_types mt ON mu.material_type_id = mt.id
             JOIN works w ON mu.work_id = w.id
             JOIN work_types wt ON w.work_type_id = wt.id
             JOIN fields f ON w.field_id = f.id
             ORDER BY mu.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(MaterialUsageDetail {
                id: row.get(0)?,
                material_type_id: row.get(1)?,
                quantity: row.get(2)?,
                work_id: row.get(3)?,
                material_name: row.get(4)?,
                material_unit: row.get(5)?,
                work_type_name: row.get(6)?,
                field_name: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
