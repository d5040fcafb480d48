//! Shared test fakes and fixtures for the Eventhub booking service.

mod clock;
mod fixtures;
mod store;

pub use clock::{FixedClock, fixed_now};
pub use fixtures::{paid_hotel_ticket, room, ticket};
pub use store::{FailingStore, InMemoryStore};
