//! Farm operations working store.
//!
//! One local SQLite file holds every record a small farm tracks: reference
//! data (fields, cultures, employees, techniques, material types, suppliers,
//! work types) and the operational records hanging off them (plantings,
//! harvests, works, material usages, purchases, sales, expenses).
//!
//! The crate is the data layer of a desktop application: a synchronous,
//! single-user library API. Callers open a [`FarmDb`], read typed rows, and
//! write through validated operations. The one piece of real business logic
//! is sellable-inventory tracking: a harvest's available quantity is its
//! volume minus everything already sold against it, and sale writes re-check
//! that inside the same transaction so a harvest can never be oversold.

pub mod db;
pub mod error;
mod migrations;

pub use db::{FarmDb, Record};
pub use error::{FarmError, ValidationError};
