//! `PatientStore` implementations, one per supported backend.

pub mod postgres;
pub mod sqlite;

pub use postgres::PgPatientStore;
pub use sqlite::SqlitePatientStore;

/// Column list for `patients` queries.
const PATIENT_COLUMNS: &str = "id, name, age, gender, problem, created_at";
