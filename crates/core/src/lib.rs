//! Domain types and rules for the patient register.
//!
//! Everything in this crate is pure: no I/O, no async. The database and
//! HTTP crates build on these types.

pub mod flash;
pub mod patient;
pub mod types;
