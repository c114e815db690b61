//! Patient row model.

use patient_register_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `patients` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Patient {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub problem: String,
    pub created_at: Timestamp,
}
