//! Eventhub Store: PostgreSQL implementations of the booking service's
//! storage collaborators.

pub mod pg_booking_store;
mod rows;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
