//! Generic repository over the per-entity tables.
//!
//! Every record type describes itself once (table name, column list, row
//! mapper, value binder, validation) and the CRUD statements are built
//! from that description. Each operation is a single parameterized
//! statement on the connection.

use rusqlite::params_from_iter;
use rusqlite::types::Value;

use super::FarmDb;
use crate::error::{FarmError, ValidationError};

/// A record type stored in its own table.
///
/// `COLUMNS` lists every column except `id`. `values` must produce one
/// [`Value`] per column in the same order, and `from_row` must read `id`
/// at index 0 followed by the columns in `COLUMNS` order.
pub trait Record: Sized {
    const TABLE: &'static str;
    /// Singular entity name used in error messages.
    const ENTITY: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
    fn values(&self) -> Vec<Value>;
    fn validate(&self) -> Result<(), ValidationError>;
}

fn select_sql<R: Record>() -> String {
    format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
}

impl FarmDb {
    /// Validate and insert a record. Returns the new row id.
    pub fn insert<R: Record>(&self, record: &R) -> Result<i64, FarmError> {
        record.validate()?;
        let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders.join(", ")
        );
        self.conn_ref()
            .execute(&sql, params_from_iter(record.values()))?;
        Ok(self.conn_ref().last_insert_rowid())
    }

    /// Validate and update a record by id. A vanished row is `NotFound`.
    pub fn update<R: Record>(&self, record: &R) -> Result<(), FarmError> {
        record.validate()?;
        let assignments: Vec<String> = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            assignments.join(", "),
            R::COLUMNS.len() + 1
        );
        let mut values = record.values();
        values.push(Value::from(record.id()));
        let affected = self.conn_ref().execute(&sql, params_from_iter(values))?;
        if affected == 0 {
            return Err(FarmError::NotFound {
                entity: R::ENTITY,
                id: record.id(),
            });
        }
        Ok(())
    }

    /// Delete a record by id. A vanished row is `NotFound`.
    pub fn delete<R: Record>(&self, id: i64) -> Result<(), FarmError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let affected = self.conn_ref().execute(&sql, [id])?;
        if affected == 0 {
            return Err(FarmError::NotFound {
                entity: R::ENTITY,
                id,
            });
        }
        Ok(())
    }

    /// Get a record by id.
    pub fn get<R: Record>(&self, id: i64) -> Result<Option<R>, FarmError> {
        let sql = format!("{} WHERE id = ?1", select_sql::<R>());
        let mut stmt = self.conn_ref().prepare(&sql)?;
        let mut rows = stmt.query_map([id], R::from_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// List every record of a type, ordered by id.
    pub fn list_all<R: Record>(&self) -> Result<Vec<R>, FarmError> {
        let sql = format!("{} ORDER BY id", select_sql::<R>());
        let mut stmt = self.conn_ref().prepare(&sql)?;
        let rows = stmt.query_map([], R::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;
    use crate::db::types::{DbCulture, DbField};

    fn sample_field(name: &str) -> DbField {
        DbField {
            id: 0,
            name: name.to_string(),
            area: 12.5,
            soil_type: "Chernozem".to_string(),
        }
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let db = test_db();

        let id = db.insert(&sample_field("North field")).expect("insert");
        assert!(id > 0);

        let field: DbField = db.get(id).expect("get").expect("row exists");
        assert_eq!(field.id, id);
        assert_eq!(field.name, "North field");
        assert_eq!(field.soil_type, "Chernozem");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = test_db();
        let missing: Option<DbField> = db.get(999).expect("get");
        assert!(missing.is_none());
    }

    #[test]
    fn test_list_all_ordered_by_id() {
        let db = test_db();
        db.insert(&sample_field("A")).expect("insert");
        db.insert(&sample_field("B")).expect("insert");
        db.insert(&sample_field("C")).expect("insert");

        let fields: Vec<DbField> = db.list_all().expect("list");
        assert_eq!(fields.len(), 3);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_existing() {
        let db = test_db();
        let id = db.insert(&sample_field("Old name")).expect("insert");

        let mut field: DbField = db.get(id).expect("get").expect("row");
        field.name = "New name".to_string();
        field.area = 20.0;
        db.update(&field).expect("update");

        let updated: DbField = db.get(id).expect("get").expect("row");
        assert_eq!(updated.name, "New name");
        assert_eq!(updated.area, 20.0);
    }

    #[test]
    fn test_update_vanished_row_is_not_found() {
        let db = test_db();
        let mut field = sample_field("Ghost");
        field.id = 42;

        let err = db.update(&field).expect_err("should fail");
        assert!(matches!(
            err,
            FarmError::NotFound {
                entity: "field",
                id: 42
            }
        ));
    }

    #[test]
    fn test_delete_and_delete_again() {
        let db = test_db();
        let id = db.insert(&sample_field("Short-lived")).expect("insert");

        db.delete::<DbField>(id).expect("first delete");
        let err = db.delete::<DbField>(id).expect_err("second delete");
        assert!(matches!(err, FarmError::NotFound { .. }));
    }

    #[test]
    fn test_insert_rejects_invalid_record() {
        let db = test_db();

        let blank_name = DbField {
            id: 0,
            name: "  ".to_string(),
            area: 5.0,
            soil_type: "Loam".to_string(),
        };
        let err = db.insert(&blank_name).expect_err("blank name");
        assert!(matches!(
            err,
            FarmError::Validation(ValidationError::Required { field: "name" })
        ));

        let bad_yield = DbCulture {
            id: 0,
            name: "Wheat".to_string(),
            seasonality: "Winter".to_string(),
            average_yield: 0.0,
        };
        let err = db.insert(&bad_yield).expect_err("zero yield");
        assert!(matches!(
            err,
            FarmError::Validation(ValidationError::NotPositive { .. })
        ));

        // Nothing was written by either attempt
        let fields: Vec<DbField> = db.list_all().expect("list");
        assert!(fields.is_empty());
    }
}
