//! Domain layer: commands, policy, and the eligibility rules.
//!
//! The records these rules inspect and the storage traits that load them
//! live in `eventhub_core::model` and `eventhub_core::repository`.

pub mod commands;
pub mod eligibility;
pub mod policy;
