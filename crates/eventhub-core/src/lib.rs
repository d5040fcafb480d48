//! Eventhub Core: shared domain abstractions.
//!
//! This crate defines the identifier aliases, the records owned by the
//! persistence layer, the storage traits the booking context depends on, and
//! the error taxonomy. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod id;
pub mod model;
pub mod repository;
