//! Row structs for the database tables.

pub mod patient;
