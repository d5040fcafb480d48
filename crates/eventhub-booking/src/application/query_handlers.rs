//! Query handlers for the Hotel Booking context.
//!
//! This module contains query handlers that load the caller's booking and
//! return read-only view DTOs.

use eventhub_core::error::{DomainError, Entity};
use eventhub_core::id::{BookingId, HotelId, RoomId, UserId};
use eventhub_core::model::{BookingWithRoom, Room};
use serde::Serialize;
use tracing::instrument;

use crate::application::command_handlers::{BookingRepositories, log_rejection};
use crate::domain::policy::{BookingPolicy, BookingVisibility};

/// Read-only view of a room embedded in a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    /// The room identifier.
    pub id: RoomId,
    /// The hotel the room belongs to.
    pub hotel_id: HotelId,
    /// Display name.
    pub name: String,
    /// Number of places in the room.
    pub capacity: i32,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            hotel_id: room.hotel_id,
            name: room.name,
            capacity: room.capacity,
        }
    }
}

/// Read-only view of a booking.
///
/// Owner and timestamps are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    /// The booking identifier.
    pub id: BookingId,
    /// The booked room.
    pub room_id: RoomId,
    /// Details of the booked room.
    pub room: RoomView,
}

impl From<BookingWithRoom> for BookingView {
    fn from(found: BookingWithRoom) -> Self {
        Self {
            id: found.booking.id,
            room_id: found.booking.room_id,
            room: RoomView::from(found.room),
        }
    }
}

/// Retrieves the caller's current booking.
///
/// Under `BookingVisibility::RequireHotelTicket` the caller must also hold an
/// enrollment with a hotel-inclusive ticket.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the booking does not exist, or if a
/// precondition of the configured visibility is not met. Returns
/// `DomainError::Infrastructure` if a store call fails.
#[instrument(skip(policy, repos))]
pub async fn get_booking(
    user_id: UserId,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingView, DomainError> {
    find_booking(user_id, policy, repos)
        .await
        .inspect_err(log_rejection)
}

async fn find_booking(
    user_id: UserId,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingView, DomainError> {
    if policy.visibility == BookingVisibility::RequireHotelTicket {
        let enrollment = repos
            .enrollments
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::NotFound(Entity::Enrollment))?;
        let ticket = repos.tickets.find_by_enrollment(enrollment.id).await?;
        if !ticket.is_some_and(|ticket| ticket.ticket_type.includes_hotel) {
            return Err(DomainError::NotFound(Entity::Ticket));
        }
    }

    let found = repos
        .bookings
        .find_by_user(user_id)
        .await?
        .ok_or(DomainError::NotFound(Entity::Booking))?;

    Ok(BookingView::from(found))
}
