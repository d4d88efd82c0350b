use rusqlite::types::Value;

use super::*;
use crate::error::{required, FarmError, ValidationError};

impl Record for DbClient {
    const TABLE: &'static str = "clients";
    const ENTITY: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &["company_name", "contact_person", "phone", "email"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbClient {
            id: row.get(0)?,
            company_name: row.get(1)?,
            contact_person: row.get(2)?,
            phone: row.get(3)?,
            email: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.company_name.clone()),
            Value::from(self.contact_person.clone()),
            Value::from(self.phone.clone()),
            Value::from(self.email.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required("company name", &self.company_name)?;
        required("contact person", &self.contact_person)?;
        required("phone", &self.phone)
    }
}

impl FarmDb {
    /// Delete a client and every sale that references it, atomically.
    /// Either both statements land or neither does. Prefer this over the
    /// generic `delete::<DbClient>`, which the sales FK would reject for
    /// any client with sales on record.
    pub fn delete_client(&self, id: i64) -> Result<(), FarmError> {
        self.with_transaction(|db| {
            let removed_sales = db
                .conn_ref()
                .execute("DELETE FROM sales WHERE client_id = ?1", [id])?;
            let affected = db
                .conn_ref()
                .execute("DELETE FROM clients WHERE id = ?1", [id])?;
            if affected == 0 {
                return Err(FarmError::NotFound {
                    entity: "client",
                    id,
                });
            }
            if removed_sales > 0 {
                log::info!("Removed {} sales while deleting client {}", removed_sales, id);
            }
            Ok(())
        })
    }

    /// Number of sales (contracts and spot sales) recorded for a client.
    pub fn client_contract_count(&self, client_id: i64) -> Result<i64, FarmError> {
        Ok(self.conn_ref().query_row(
            "SELECT COUNT(*) FROM sales WHERE client_id = ?1",
            [client_id],
            |row| row.get(0),
        )?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn test_delete_client_cascades_to_sales() {
        let db = test_db();
        let field_id = seed_field(&db);
        let culture_id = seed_culture(&db);
        let harvest_id = seed_harvest(&db, field_id, culture_id, 1000);
        let client_id = seed_client(&db, "Doomed Trading");
        let other_client = seed_client(&db, "Survivor LLC");

        db.insert_sale(&sample_sale(client_id, harvest_id, 100))
            .expect("sale 1");
        db.insert_sale(&sample_sale(client_id, harvest_id, 50))
            .expect("sale 2");
        db.insert_sale(&sample_sale(other_client, harvest_id, 25))
            .expect("other client's sale");
        assert_eq!(db.client_contract_count(client_id).expect("count"), 2);

        db.delete_client(client_id).expect("cascade delete");

        assert_eq!(db.client_contract_count(client_id).expect("count"), 0);
        assert!(db.list_sales_by_client(client_id).expect("list").is_empty());
        let clients: Vec<DbClient> = db.list_all().expect("clients");
        assert!(!clients.iter().any(|c| c.id == client_id));

        // The other client's sale is untouched, and the freed quantity is
        // back on the harvest
        assert_eq!(db.client_contract_count(other_client).expect("count"), 1);
        assert_eq!(db.available_quantity(harvest_id).expect("avail"), 975);
    }

    #[test]
    fn test_delete_missing_client_is_not_found() {
        let db = test_db();
        let err = db.delete_client(123).expect_err("missing client");
        assert!(matches!(
            err,
            FarmError::NotFound {
                entity: "client",
                id: 123
            }
        ));
    }

    #[test]
    fn test_phone_stored_as_text_preserves_formats() {
        let db = test_db();
        let id = db
            .insert(&DbClient {
                id: 0,
                company_name: "Zerno Plus".to_string(),
                contact_person: "Oksana V.".to_string(),
                phone: "0501234567".to_string(),
                email: Some("sales@zernoplus.ua".to_string()),
            })
            .expect("insert");

        let client: DbClient = db.get(id).expect("get").expect("row");
        assert_eq!(client.phone, "0501234567", "leading zero must survive");
    }
}
