//! Eventhub: Hotel Booking bounded context.
//!
//! Decides whether a ticket holder may reserve, view, or move a hotel room
//! booking, and performs the corresponding write through the storage
//! collaborators declared in [`eventhub_core::repository`].

pub mod application;
pub mod domain;
