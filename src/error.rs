//! Error types for store operations.
//!
//! Errors are classified by recoverability:
//! - Validation: an input failed a field rule; re-prompt, nothing written
//! - NotFound: the row vanished out from under the caller; reload and retry
//! - Persistence: the store itself failed or rejected the write

use thiserror::Error;

use crate::db::DbError;

/// Field-level validation failures. Raised before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("no {field} selected")]
    MissingReference { field: &'static str },

    #[error("requested quantity {requested} exceeds the {available} available from this harvest")]
    ExceedsAvailable { requested: i64, available: i64 },
}

/// Top-level error for every store operation.
#[derive(Debug, Error)]
pub enum FarmError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Persistence(#[from] DbError),
}

impl FarmError {
    /// True when the caller can recover by re-prompting or reloading:
    /// validation failures and vanished rows. Persistence failures are
    /// surfaced to the user instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FarmError::Validation(_) | FarmError::NotFound { .. }
        )
    }
}

impl From<rusqlite::Error> for FarmError {
    fn from(err: rusqlite::Error) -> Self {
        FarmError::Persistence(DbError::Sqlite(err))
    }
}

/// Require a non-blank text field.
pub(crate) fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Require a strictly positive integer quantity, price, or duration.
pub(crate) fn positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

/// Require a strictly positive real measure (area, average yield).
pub(crate) fn positive_real(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

/// Require a foreign-key selection to be set to a real row id.
pub(crate) fn selected(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::MissingReference { field });
    }
    Ok(())
}
