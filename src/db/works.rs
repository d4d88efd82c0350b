//! Field works and the work-type lookup table.

use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, selected, FarmError, ValidationError};

impl Record for DbWorkType {
    const TABLE: &'static str = "work_types";
    const ENTITY: &'static str = "work type";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbWorkType {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone())]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

impl Record for DbWork {
    const TABLE: &'static str = "works";
    const ENTITY: &'static str = "work";
    const COLUMNS: &'static [&'static str] = &[
        "work_type_id",
        "field_id",
        "technique_id",
        "employee_id",
        "date",
        "duration",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbWork {
            id: row.get(0)?,
            work_type_id: row.get(1)?,
            field_id: row.get(2)?,
            technique_id: row.get(3)?,
            employee_id: row.get(4)?,
            date: row.get(5)?,
            duration: row.get(6)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.work_type_id),
            Value::from(self.field_id),
            Value::from(self.technique_id),
            Value::from(self.employee_id),
            Value::from(self.date.clone()),
            Value::from(self.duration),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("work type", self.work_type_id)?;
        selected("field", self.field_id)?;
        if let Some(technique_id) = self.technique_id {
            selected("technique", technique_id)?;
        }
        if let Some(employee_id) = self.employee_id {
            selected("employee", employee_id)?;
        }
        required("date", &self.date)?;
        positive("duration", self.duration)
    }
}

impl FarmDb {
    /// List the work-type lookup table.
    pub fn list_work_types(&self) -> Result<Vec<DbWorkType>, FarmError> {
        self.list_all()
    }

    /// List every work with its display names and the assigned technique's
    /// hourly cost, so [`WorkDetail::cost`] needs no second lookup.
    pub fn list_works_detailed(&self) -> Result<Vec<WorkDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT w.id, w.work_type_id, w.field_id, w.technique_id, w.employee_id,
                    w.date, w.duration,
                    wt.name, f.name, e.full_name, t.name, t.usage_cost
             FROM works w
             JOIN work_types wt ON w.work_type_id = wt.id
             JOIN fields f ON w.field_id = f.id
             LEFT JOIN employees e ON w.employee_id = e.id
             LEFT JOIN techniques t ON w.technique_id = t.id
             ORDER BY w.date, w.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(WorkDetail {
                id: row.get(0)?,
                work_type_id: row.get(1)?,
                field_id: row.get(2)?,
                technique_id: row.get(3)?,
                employee_id: row.get(4)?,
                date: row.get(5)?,
                duration: row.get(6)?,
                work_type_name: row.get(7)?,
                field_name: row.get(8)?,
                employee_name: row.get(9)?,
                technique_name: row.get(10)?,
                technique_usage_cost: row.get(11)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

// =============================================================================
// Tests
// =============================================================================
