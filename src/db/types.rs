//! Shared type definitions for the database layer.
//!
//! Every row struct is a plain, fully-typed mirror of one table; the
//! `*Detail` structs are denormalized read models produced by explicit
//! joins for display. Foreign keys stay plain ids, never live object
//! graphs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),
}

/// A row from the `fields` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbField {
    pub id: i64,
    pub name: String,
    pub area: f64,
    pub soil_type: String,
}

/// A row from the `cultures` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbCulture {
    pub id: i64,
    pub name: String,
    pub seasonality: String,
    pub average_yield: f64,
}

/// A row from the `employees` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbEmployee {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub position: String,
}

/// A row from the `techniques` table. `usage_cost` is the cost of one
/// hour of machine time; `condition` is conventionally one of
/// `New` / `Used` / `InRepair`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTechnique {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub usage_cost: i64,
    pub condition: String,
}

/// A row from the `material_types` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbMaterialType {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub unit: String,
}

/// A row from the `suppliers` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbSupplier {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub product_type: String,
}

/// A row from the `plantings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbPlanting {
    pub id: i64,
    pub field_id: i64,
    pub culture_id: i64,
    pub sowing_date: String,
}

/// A row from the `harvests` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbHarvest {
    pub id: i64,
    pub field_id: i64,
    pub culture_id: i64,
    pub harvest_date: String,
    pub volume: i64,
    pub price_per_kg: i64,
}

impl DbHarvest {
    /// Total value of the harvest at its recorded price.
    pub fn total_value(&self) -> i64 {
        self.volume * self.price_per_kg
    }
}

/// A row from the `work_types` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbWorkType {
    pub id: i64,
    pub name: String,
}

/// A row from the `works` table. Technique and employee assignments are
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbWork {
    pub id: i64,
    pub work_type_id: i64,
    pub field_id: i64,
    pub technique_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub date: String,
    pub duration: i64,
}

/// A row from the `material_usages` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbMaterialUsage {
    pub id: i64,
    pub material_type_id: i64,
    pub quantity: i64,
    pub work_id: i64,
}

/// A row from the `purchases` table. The presence of `contract_date`
/// distinguishes a contract from a spot purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbPurchase {
    pub id: i64,
    pub material_type_id: i64,
    pub supplier_id: i64,
    pub date: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub contract_date: Option<String>,
    pub delivery_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl DbPurchase {
    /// Total cost of the purchase.
    pub fn total_cost(&self) -> i64 {
        self.quantity * self.unit_price
    }

    /// A purchase is a contract exactly when a contract date is recorded.
    /// A delivery date alone does not make one.
    pub fn is_contract(&self) -> bool {
        self.contract_date.is_some()
    }
}

/// A row from the `clients` table. Phone is stored as text so leading
/// zeros and "+380…" formats survive round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbClient {
    pub id: i64,
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
}

/// A row from the `sales` table. `status` is conventionally one of
/// `Active` / `Completed` / `Cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbSale {
    pub id: i64,
    pub client_id: i64,
    pub harvest_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub contract_date: Option<String>,
    pub delivery_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_date: String,
}

impl DbSale {
    /// Total sale amount.
    pub fn total_amount(&self) -> i64 {
        self.quantity * self.unit_price
    }

    /// A sale is a contract exactly when a contract date is recorded.
    pub fn is_contract(&self) -> bool {
        self.contract_date.is_some()
    }
}

/// A row from the `expenses` table. The linked work is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbExpense {
    pub id: i64,
    pub expense_type: String,
    pub amount: i64,
    pub date: String,
    pub work_id: Option<i64>,
}

// =============================================================================
// Read models (display joins)
// =============================================================================

/// A planting joined with its field and culture names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingDetail {
    pub id: i64,
    pub field_id: i64,
    pub culture_id: i64,
    pub sowing_date: String,
    pub field_name: String,
    pub culture_name: String,
}

/// A harvest joined with its field and culture names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestDetail {
    pub id: i64,
    pub field_id: i64,
    pub culture_id: i64,
    pub harvest_date: String,
    pub volume: i64,
    pub price_per_kg: i64,
    pub field_name: String,
    pub culture_name: String,
}

impl HarvestDetail {
    pub fn total_value(&self) -> i64 {
        self.volume * self.price_per_kg
    }
}

/// A harvest annotated with its sellable remainder, computed from the
/// sales recorded against it at call time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestStock {
    pub id: i64,
    pub field_id: i64,
    pub culture_id: i64,
    pub harvest_date: String,
    pub volume: i64,
    pub price_per_kg: i64,
    pub field_name: String,
    pub culture_name: String,
    pub available_quantity: i64,
}

/// A work joined with every display name the works grid shows. Carries
/// the assigned technique's hourly cost so the work cost can be derived
/// without a second lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetail {
    pub id: i64,
    pub work_type_id: i64,
    pub field_id: i64,
    pub technique_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub date: String,
    pub duration: i64,
    pub work_type_name: String,
    pub field_name: String,
    pub employee_name: Option<String>,
    pub technique_name: Option<String>,
    pub technique_usage_cost: Option<i64>,
}

impl WorkDetail {
    /// Cost of the work: the technique's hourly cost times the duration,
    /// zero when no technique is assigned.
    pub fn cost(&self) -> i64 {
        self.technique_usage_cost
            .map_or(0, |per_hour| per_hour * self.duration)
    }
}

/// A material usage joined with material and work display names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsageDetail {
    pub id: i64,
    pub material_type_id: i64,
    pub quantity: i64,
    pub work_id: i64,
    pub material_name: String,
    pub material_unit: String,
    pub work_type_name: String,
    pub field_name: String,
}

/// A purchase joined with material and supplier names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetail {
    pub id: i64,
    pub material_type_id: i64,
    pub supplier_id: i64,
    pub date: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub contract_date: Option<String>,
    pub delivery_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub material_name: String,
    pub supplier_name: String,
}

impl PurchaseDetail {
    pub fn total_cost(&self) -> i64 {
        self.quantity * self.unit_price
    }

    pub fn is_contract(&self) -> bool {
        self.contract_date.is_some()
    }
}

/// A sale joined with the client's company name and the harvest's
/// culture and field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub id: i64,
    pub client_id: i64,
    pub harvest_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub contract_date: Option<String>,
    pub delivery_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_date: String,
    pub company_name: String,
    pub culture_name: String,
    pub field_name: String,
}

impl SaleDetail {
    pub fn total_amount(&self) -> i64 {
        self.quantity * self.unit_price
    }

    pub fn is_contract(&self) -> bool {
        self.contract_date.is_some()
    }
}

/// An expense joined with the linked work's display names, when a work
/// is linked at all.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDetail {
    pub id: i64,
    pub expense_type: String,
    pub amount: i64,
    pub date: String,
    pub work_id: Option<i64>,
    pub work_type_name: Option<String>,
    pub field_name: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
