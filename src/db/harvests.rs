//! Harvest records and sellable-inventory tracking.
//!
//! A harvest's available quantity is its volume minus the sum of every
//! sale recorded against it, computed by one aggregating query at call
//! time, never cached, so it reflects all sales the moment it is read.

use rusqlite::types::Value;

use super::*;
use crate::error::{positive, required, selected, FarmError, ValidationError};

impl Record for DbHarvest {
    const TABLE: &'static str = "harvests";
    const ENTITY: &'static str = "harvest";
    const COLUMNS: &'static [&'static str] = &[
        "field_id",
        "culture_id",
        "harvest_date",
        "volume",
        "price_per_kg",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(DbHarvest {
            id: row.get(0)?,
            field_id: row.get(1)?,
            culture_id: row.get(2)?,
            harvest_date: row.get(3)?,
            volume: row.get(4)?,
            price_per_kg: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.field_id),
            Value::from(self.culture_id),
            Value::from(self.harvest_date.clone()),
            Value::from(self.volume),
            Value::from(self.price_per_kg),
        ]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        selected("field", self.field_id)?;
        selected("culture", self.culture_id)?;
        required("harvest date", &self.harvest_date)?;
        positive("volume", self.volume)?;
        positive("price per kg", self.price_per_kg)
    }
}

impl FarmDb {
    /// List every harvest with its field and culture names.
    pub fn list_harvests_detailed(&self) -> Result<Vec<HarvestDetail>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT h.id, h.field_id, h.culture_id, h.harvest_date, h.volume, h.price_per_kg,
                    f.name, c.name
             FROM harvests h
             JOIN fields f ON h.field_id = f.id
             JOIN cultures c ON h.culture_id = c.id
             ORDER BY h.harvest_date, h.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HarvestDetail {
                id: row.get(0)?,
                field_id: row.get(1)?,
                culture_id: row.get(2)?,
                harvest_date: row.get(3)?,
                volume: row.get(4)?,
                price_per_kg: row.get(5)?,
                field_name: row.get(6)?,
                culture_name: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sellable remainder of one harvest: volume minus everything sold
    /// against it. `NotFound` when the harvest row does not exist.
    pub fn available_quantity(&self, harvest_id: i64) -> Result<i64, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT h.volume - COALESCE(SUM(s.quantity), 0)
             FROM harvests h
             LEFT JOIN sales s ON s.harvest_id = h.id
             WHERE h.id = ?1
             GROUP BY h.id, h.volume",
        )?;
        let mut rows = stmt.query_map([harvest_id], |row| row.get::<_, i64>(0))?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Err(FarmError::NotFound {
                entity: "harvest",
                id: harvest_id,
            }),
        }
    }

    /// Every harvest annotated with its current sellable remainder, in one
    /// aggregating pass over the sales table.
    pub fn list_available_harvests(&self) -> Result<Vec<HarvestStock>, FarmError> {
        let mut stmt = self.conn_ref().prepare(
            "SELECT h.id, h.field_id, h.culture_id, h.harvest_date, h.volume, h.price_per_kg,
                    f.name, c.name, h.volume - COALESCE(SUM(s.quantity), 0)
             FROM harvests h
             JOIN fields f ON h.field_id = f.id
             JOIN cultures c ON h.culture_id = c.id
             LEFT JOIN sales s ON s.harvest_id = h.id
             GROUP BY h.id, h.field_id, h.culture_id, h.harvest_date, h.volume, h.price_per_kg,
                      f.name, c.name
             ORDER BY h.harvest_date, h.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HarvestStock {
                id: row.get(0)?,
                field_id: row.get(1)?,
                culture_id: row.get(2)?,
                harvest_date: row.get(3)?,
                volume: row.get(4)?,
                price_per_kg: row.get(5)?,
                field_name: row.get(6)?,
                culture_name: row.get(7)?,
                available_quantity: row.get(8)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

// =============================================================================
// Tests
// =============================================================================
