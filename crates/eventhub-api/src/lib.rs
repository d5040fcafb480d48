//! Eventhub booking API: HTTP surface for the hotel booking context.
//!
//! The binary in `main.rs` wires configuration, tracing, the PostgreSQL
//! store and the router defined here.

pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;
pub mod telemetry;
