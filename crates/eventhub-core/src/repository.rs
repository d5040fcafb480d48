//! Storage collaborator traits.
//!
//! Every lookup distinguishes absence (`Ok(None)`) from failure (`Err`).
//! Writes return `Ok(None)` when the store produced no record.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::id::{BookingId, EnrollmentId, RoomId, UserId};
use crate::model::{Booking, BookingWithRoom, Enrollment, RoomOccupancy, Ticket};

/// Read access to enrollments.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Finds the enrollment owned by `user_id`.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>, DomainError>;
}

/// Read access to tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Finds the ticket bought for `enrollment_id`, with its type embedded.
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError>;
}

/// Read access to hotel rooms.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Finds a room together with the bookings currently occupying it.
    async fn find_by_id(&self, room_id: RoomId) -> Result<Option<RoomOccupancy>, DomainError>;
}

/// Read/write access to bookings.
///
/// `create` and `update_room` are capacity-guarded: the occupancy check and
/// the write happen as one atomic step, and `Ok(None)` is returned when the
/// target room has no free place at write time. Two concurrent writers can
/// therefore never push a room past its capacity.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Finds the caller's current booking with its room embedded.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>, DomainError>;

    /// Finds a booking by id.
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, DomainError>;

    /// Creates a booking of `room_id` for `user_id` if the room has a free
    /// place.
    async fn create(&self, user_id: UserId, room_id: RoomId)
    -> Result<Option<Booking>, DomainError>;

    /// Moves `booking_id` to `room_id` if the room has a free place. The
    /// booking being moved does not count against the target room.
    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError>;
}
