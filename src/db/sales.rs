//! Sales and contracts against harvests.
//!
//! A sale commits part of a harvest's volume to a client. The write path
//! re-checks the harvest's available quantity inside the same transaction
//! as the insert or update, so two writers can never jointly oversell a
//! harvest and a rejected write leaves nothing behind.

use chrono::Utc;
use rusqlite::params;
use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, selected, FarmError, ValidationError};

impl Record for DbSale {
    const TABLE: &'static str = "sales";
    const ENTITY: &'static str = "sale";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "harvest_id",
        "quantity",
        "unit_price",
        "contract_date",
        "delivery_date",
        "status",
        "notes",
        "created_date",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbSale {
            id: row.get(0)?,
            client_id: row.get(1)?,
            harvest_id: row.get(2)?,
            quantity: row.get(3)?,
            unit_price: row.get(4)?,
            contract_date: row.get(5)?,
            delivery_date: row.get(6)?,
            status: row.get(7)?,
            notes: row.get(8)?,
            created_date: row.get(9)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.client_id),
            Value::from(self.harvest_id),
            Value::from(self.quantity),
            Value::from(self.unit_price),
            Value::from(self.contract_date.clone()),
            Value::from(self.delivery_date.clone()),
            Value::from(self.status.clone()),
            Value::from(self.notes.clone()),
            Value::from(self.created_date.clone()),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("client", self.client_id)?;
        selected("harvest", self.harvest_id)?;
        positive("quantity", self.quantity)?;
        positive("unit price", self.unit_price)?;
        required("status", &self.status)
    }
}

/// Row mapper shared by the sale listing joins.
fn map_sale_detail_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SaleDetail> {
    Ok(SaleDetail {
        id: row.get(0)?,
        client_id: row.get(1)?,
        harvest_id: row.get(2)?,
        quantity: row.get(3)?,
        unit_price: row.get(4)?,
        contract_date: row.get(5)?,
        delivery_date: row.get(6)?,
        status: row.get(7)?,
        notes: row.get(8)?,
        created_date: row.get(9)?,
        company_name: row.get(10)?,
        culture_name: row.get(11)?,
        field_name: row.get(12)?,
    })
}

const SALE_DETAIL_SELECT: &str = "SELECT s.id, s.client_id, s.harvest_id, s.quantity, s.unit_price,
        s.contract_date, s.delivery_date, s.status, s.notes, s.created_date,
        c.company_name, cu.name, f.name
 FROM sales s
 JOIN clients c ON s.client_id = c.id
 JOIN harvests h ON s.harvest_id = h.id
 JOIN cultures cu ON h.culture_id = cu.id
 JOIN fields f ON h.field_id = f.id";

impl FarmDb {
    /// Insert a sale. The harvest's available quantity is recomputed inside
    /// the same transaction as the write; a sale asking for more than is
    /// available is rejected outright, never clamped. An empty
    /// `created_date` defaults to today.
    pub fn insert_sale(&self, sale: &DbSale) -> Result<i64, FarmError> {
        sale.validate()?;
        self.with_transaction(|db| {
            let available = db.available_quantity(sale.harvest_id)?;
            if sale.quantity > available {
                return Err(ValidationError::ExceedsAvailable {
                    requested: sale.quantity,
                    available,
                }
                .into());
            }
            let mut record = sale.clone();
            if record.created_date.trim().is_empty() {
                record.created_date = Utc::now().format("%Y-%m-%d").to_string();
            }
            db.insert(&record)
        })
    }

    /// Update a sale under the same availability check as `insert_sale`.
    ///
    /// The quantity this sale already holds is available to itself: when the
    /// sale stays on the same harvest, its current quantity is added back
    /// before validating, so re-saving a sale unchanged always succeeds and
    /// a sale can grow up to the harvest's true remaining capacity. Moving
    /// the sale to a different harvest checks the full requested quantity
    /// against the target.
    pub fn update_sale(&self, sale: &DbSale) -> Result<(), FarmError> {
        sale.validate()?;
        self.with_transaction(|db| {
            let current: DbSale = db.get(sale.id)?.ok_or(FarmError::NotFound {
                entity: "sale",
                id: sale.id,
            })?;

            let mut available = db.available_quantity(sale.harvest_id)?;
            if current.harvest_id == sale.harvest_id {
                available += current.quantity;
            }
            if sale.quantity > available {
                return Err(ValidationError::ExceedsAvailable {
                    requested: sale.quantity,
                    available,
                }
                .into());
            }
            db.update(sale)
        })
    }

    /// List every sale with client, culture, and field names.
    pub fn list_sales_detailed(&self) -> Result<Vec<SaleDetail>, FarmError> {
        let sql = format!("{} ORDER BY s.created_date, s.id", SALE_DETAIL_SELECT);
        let mut stmt = self.conn_ref().prepare(&sql)?;
        let rows = stmt.query_map([], map_sale_detail_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// List one client's sales, newest first.
    pub fn list_sales_by_client(&self, client_id: i64) -> Result<Vec<SaleDetail>, FarmError> {
        let sql = format!(
            "{} WHERE s.client_id = ?1 ORDER BY s.created_date DESC, s.id DESC",
            SALE_DETAIL_SELECT
        );
        let mut stmt = self.conn_ref().prepare(&sql)?;
        let rows = stmt.query_map(params![client_id], map_sale_detail_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

// =============================================================================
// Tests
// =============================================================================
