//! Patient register HTTP server library.
//!
//! Exposes config, state, error handling, routes and rendering so the
//! integration tests and the binary entrypoint share one router.

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod render;
pub mod router;
pub mod routes;
pub mod state;
