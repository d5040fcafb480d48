//! Shared application state.

use std::sync::Arc;

use eventhub_booking::application::command_handlers::BookingRepositories;
use eventhub_booking::domain::policy::BookingPolicy;
use eventhub_core::repository::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Enrollment lookups.
    pub enrollments: Arc<dyn EnrollmentRepository>,
    /// Ticket lookups.
    pub tickets: Arc<dyn TicketRepository>,
    /// Room lookups.
    pub rooms: Arc<dyn RoomRepository>,
    /// Booking reads and writes.
    pub bookings: Arc<dyn BookingRepository>,
    /// Policy settings for the booking handlers.
    pub policy: BookingPolicy,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        tickets: Arc<dyn TicketRepository>,
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            enrollments,
            tickets,
            rooms,
            bookings,
            policy,
        }
    }

    /// Create application state backed by a single store.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, policy: BookingPolicy) -> Self
    where
        S: EnrollmentRepository + TicketRepository + RoomRepository + BookingRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store, policy)
    }

    /// Borrows the collaborators in the form the handlers take.
    #[must_use]
    pub fn repositories(&self) -> BookingRepositories<'_> {
        BookingRepositories {
            enrollments: self.enrollments.as_ref(),
            tickets: self.tickets.as_ref(),
            rooms: self.rooms.as_ref(),
            bookings: self.bookings.as_ref(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
