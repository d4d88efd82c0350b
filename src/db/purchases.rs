use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, selected, FarmError, ValidationError};

impl Record for DbPurchase {
    const TABLE: &'static str = "purchases";
    const ENTITY: &'static str = "purchase";
    const COLUMNS: &'static [&'static str] = &[
        "material_type_id",
        "supplier_id",
        "date",
        "quantity",
        "unit_price",
        "contract_date",
        "delivery_date",
        "status",
        "notes",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbPurchase {
            id: row.get(0)?,
            material_type_id: row.get(1)?,
            supplier_id: row.get(2)?,
            date: row.get(3)?,
            quantity: row.get(4)?,
            unit_price: row.get(5)?,
            contract_date: row.get(6)?,
            delivery_date: row.get(7)?,
            status: row.get(8)?,
            notes: row.get(9)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.material_type_id),
            Value::from(self.supplier_id),
            Value::from(self.date.clone()),
            Value::from(self.quantity),
            Value::from(self.unit_price),
            Value::from(self.contract_date.clone()),
            Value::from(self.delivery_date.clone()),
            Value::from(self.status.clone()),
            Value::from(self.notes.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("material", self.material_type_id)?;
        selected("supplier", self.supplier_id)?;
        required("date", &self.date)?;
        positive("quantity", self.quantity)?;
        positive("unit price", self.unit_price)?;
        required("status", &self.status)
    }
}

impl FarmDb {
    /// List every purchase with its material and supplier names.
    pub fn list_purchases_detailed(&self) -> Result<Vec<PurchaseDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT p.id, p.material_type_id, p.supplier_id, p.date, p.quantity, p.unit_price,
                    p.contract_date, p.delivery_date, p.status, p.notes, mt.name, s.name
             FROM purchases p
             JOIN material_types mt ON p.material_type_id = mt.id
             JOIN suppliers s ON p.supplier_id = s.id
             ORDER BY p.date, p.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PurchaseDetail {
                id: row.get(0)?,
                material_type_id: row.get(1)?,
                supplier_id: row.get(2)?,
                date: row.get(3)?,
                quantity: row.get(4)?,
                unit_price: row.get(5)?,
                contract_date: row.get(6)?,
                delivery_date: row.get(7)?,
                status: row.get(8)?,
                notes: row.get(9)?,
                material_name: row.get(10)?,
                supplier_name: row.get(11)?,
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
    fn test_list_purchases_detailed() {
        let db = test_db();
        let material_type_id = db
            .insert(&DbMaterialType {
                id: 0,
                name: "NPK 16-16-16".to_string(),
                kind: "Fertilizer".to_string(),
                unit: "t".to_string(),
            })
            .expect("material type");
        let supplier_id = db
            .insert(&DbSupplier {
                id: 0,
                name: "AgroSnab".to_string(),
                contact_person: "Mykola D.".to_string(),
                phone: "0442223344".to_string(),
                product_type: "Fertilizers".to_string(),
            })
            .expect("supplier");

        db.insert(&DbPurchase {
            id: 0,
            material_type_id,
            supplier_id,
            date: "2026-02-10".to_string(),
            quantity: 4,
            unit_price: 100,
            contract_date: Some("2026-02-01".to_string()),
            delivery_date: Some("2026-02-20".to_string()),
            status: "Active".to_string(),
            notes: None,
        })
        .expect("purchase");

        let purchases = db.list_purchases_detailed().expect("list");
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].material_name, "NPK 16-16-16");
        assert_eq!(purchases[0].supplier_name, "AgroSnab");
        assert_eq!(purchases[0].total_cost(), 400);
        assert!(purchases[0].is_contract());
    }
}
