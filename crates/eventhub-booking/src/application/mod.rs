//! Application layer: handlers that load records, apply the eligibility
//! rules, and perform writes.

pub mod command_handlers;
pub mod query_handlers;
