//! Commands for the Hotel Booking context.

use eventhub_core::command::Command;
use eventhub_core::id::{BookingId, RoomId, UserId};
use uuid::Uuid;

/// Command to book a room for the caller.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authenticated caller.
    pub user_id: UserId,
    /// The room to book.
    pub room_id: RoomId,
}

impl Command for CreateBooking {
    fn command_type(&self) -> &'static str {
        "booking.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn issued_by(&self) -> UserId {
        self.user_id
    }
}

/// Command to move one of the caller's bookings to another room.
#[derive(Debug, Clone)]
pub struct ChangeBookingRoom {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authenticated caller.
    pub user_id: UserId,
    /// The room to move into.
    pub room_id: RoomId,
    /// The booking being changed.
    pub booking_id: BookingId,
}

impl Command for ChangeBookingRoom {
    fn command_type(&self) -> &'static str {
        "booking.change_room"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn issued_by(&self) -> UserId {
        self.user_id
    }
}
