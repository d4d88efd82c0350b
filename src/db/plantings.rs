use rusqlite::types::Value;

use super::*;
use crate::error::{required, selected, FarmError, ValidationError};

impl Record for DbPlanting {
    const TABLE: &'static str = "plantings";
    const ENTITY: &'static str = "planting";
    const COLUMNS: &'static [&'static str] = &["field_id", "culture_id", "sowing_date"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbPlanting {
            id: row.get(0)?,
            field_id: row.get(1)?,
            culture_id: row.get(2)?,
            sowing_date: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.field_id),
            Value::from(self.culture_id),
            Value::from(self.sowing_date.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("field", self.field_id)?;
        selected("culture", self.culture_id)?;
        required("sowing date", &self.sowing_date)
    }
}

impl FarmDb {
    /// List every planting with its field and culture names.
    pub fn list_plantings_detailed(&self) -> Result<Vec<PlantingDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT p.id, p.field_id, p.culture_id, p.sowing_date, f.name, c.name
             FROM plantings p
             JOIN fields f ON p.field_id = f.id
             JOIN cultures c ON p.culture_id = c.id
             ORDER BY p.sowing_date, p.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PlantingDetail {
                id: row.get(0)?,
                field_id: row.get(1)?,
                culture_id: row.get(2)?,
                sowing_date: row.get(3)?,
                field_name: row.get(4)?,
                culture_name: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn test_list_plantings_detailed_joins_names() {
        let db = test_db();
        let field_id = seed_field(&db);
        let culture_id = seed_culture(&db);

        db.insert(&DbPlanting {
            id: 0,
            field_id,
            culture_id,
            sowing_date: "2026-04-10".to_string(),
        })
        .expect("insert planting");

        let plantings = db.list_plantings_detailed().expect("list");
        assert_eq!(plantings.len(), 1);
        assert_eq!(plantings[0].field_name, "North field");
        assert_eq!(plantings[0].culture_name, "Wheat");
        assert_eq!(plantings[0].sowing_date, "2026-04-10");
    }
}
