use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, selected, FarmError, ValidationError};

impl Record for DbExpense {
    const TABLE: &'static str = "expenses";
    const ENTITY: &'static str = "expense";
    const COLUMNS: &'static [&'static str] = &["expense_type", "amount", "date", "work_id"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbExpense {
            id: row.get(0)?,
            expense_type: row.get(1)?,
            amount: row.get(2)?,
            date: row.get(3)?,
            work_id: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.expense_type.clone()),
            Value::from(self.amount),
            Value::from(self.date.clone()),
            Value::from(self.work_id),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("expense type", &self.expense_type)?;
        positive("amount", self.amount)?;
        required("date", &self.date)?;
        if let Some(work_id) = self.work_id {
            selected("work", work_id)?;
        }
        Ok(())
    }
}

impl FarmDb {
    /// List every expense with the linked work's display names. Works are
    /// optional, so the join chain is LEFT all the way down.
    pub fn list_expenses_detailed(&self) -> Result<Vec<ExpenseDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT e.id, e.expense_type, e.amount, e.date, e.work_id, wt.name, f.name
             FROM expenses e
             LEFT JOIN works w ON e.work_id = w.id
             LEFT JOIN work_types wt ON w.work_type_id = wt.id
             LEFT JOIN fields f ON w.field_id = f.id
             ORDER BY e.date, e.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ExpenseDetail {
                id: row.get(0)?,
                expense_type: row.get(1)?,
                amount: row.get(2)?,
                date: row.get(3)?,
                work_id: row.get(4)?,
                work_type_name: row.get(5)?,
                field_name: row.get(6)?,
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
    fn test_expense_without_work_lists_with_empty_names() {
        let db = test_db();

        db.insert(&DbExpense {
            id: 0,
            expense_type: "Fuel".to_string(),
            amount: 900,
            date: "2026-05-05".to_string(),
            work_id: None,
        })
        .expect("expense");

        let expenses = db.list_expenses_detailed().expect("list");
        assert_eq!(expenses.len(), 1);
        assert!(expenses[0].work_type_name.is_none());
        assert!(expenses[0].field_name.is_none());
    }

    #[test]
    fn test_expense_linked_to_work_carries_names() {
        let db = test_db();
        let field_id = seed_field(&db);
        let work_type_id = db
            .insert(&DbWorkType {
                id: 0,
                name: "Harvesting".to_string(),
            })
            .expect("work type");
        let work_id = db
            .insert(&DbWork {
                id: 0,
                work_type_id,
                field_id,
                technique_id: None,
                employee_id: None,
                date: "2026-08-01".to_string(),
                duration: 10,
            })
            .expect("work");

        db.insert(&DbExpense {
            id: 0,
            expense_type: "Repairs".to_string(),
            amount: 1500,
            date: "2026-08-02".to_string(),
            work_id: Some(work_id),
        })
        .expect("expense");

        let expenses = db.list_expenses_detailed().expect("list");
        assert_eq!(expenses[0].work_type_name.as_deref(), Some("Harvesting"));
        assert_eq!(expenses[0].field_name.as_deref(), Some("North field"));
    }
}
