//! Command handlers for the Hotel Booking context.
//!
//! Each handler walks the eligibility chain in a fixed order, stops at the
//! first failing step, and only then performs the write. Later steps depend
//! on earlier lookups, so the store calls are strictly sequential.

use eventhub_core::command::Command;
use eventhub_core::error::{Denial, DomainError, Entity};
use eventhub_core::id::{BookingId, RoomId, UserId};
use eventhub_core::model::Booking;
use eventhub_core::repository::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};
use tracing::{error, info, instrument, warn};

use crate::domain::commands::{ChangeBookingRoom, CreateBooking};
use crate::domain::eligibility;
use crate::domain::policy::BookingPolicy;

/// The storage collaborators a booking handler talks to.
#[derive(Clone, Copy)]
pub struct BookingRepositories<'a> {
    /// Enrollment lookups.
    pub enrollments: &'a dyn EnrollmentRepository,
    /// Ticket lookups.
    pub tickets: &'a dyn TicketRepository,
    /// Room lookups.
    pub rooms: &'a dyn RoomRepository,
    /// Booking reads and writes.
    pub bookings: &'a dyn BookingRepository,
}

impl<'a> BookingRepositories<'a> {
    /// Uses one store for all four collaborators.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: EnrollmentRepository + TicketRepository + RoomRepository + BookingRepository,
    {
        Self {
            enrollments: store,
            tickets: store,
            rooms: store,
            bookings: store,
        }
    }
}

/// Result of a successfully handled booking command.
#[derive(Debug)]
pub struct BookingCommandResult {
    /// The booking created or changed.
    pub booking_id: BookingId,
    /// The room the booking now holds.
    pub room_id: RoomId,
}

impl From<Booking> for BookingCommandResult {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.id,
            room_id: booking.room_id,
        }
    }
}

/// Steps shared by create and change: enrollment, ticket, room.
async fn ensure_can_book(
    user_id: UserId,
    room_id: RoomId,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<(), DomainError> {
    let enrollment = repos
        .enrollments
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| policy.missing_enrollment.error())?;

    let ticket = repos
        .tickets
        .find_by_enrollment(enrollment.id)
        .await?
        .ok_or(DomainError::NotFound(Entity::Ticket))?;
    eligibility::check_ticket(&ticket)?;

    let room = repos
        .rooms
        .find_by_id(room_id)
        .await?
        .ok_or(DomainError::NotFound(Entity::Room))?;
    eligibility::check_room(&room)
}

pub(crate) fn log_rejection(err: &DomainError) {
    match err {
        DomainError::Forbidden(denial) => warn!(%denial, "booking request denied"),
        DomainError::NotFound(entity) => {
            info!(%entity, "booking request references a missing record");
        }
        DomainError::Validation(message) => info!(%message, "booking request rejected"),
        DomainError::Infrastructure(message) => error!(%message, "booking store failure"),
    }
}

/// Handles the `CreateBooking` command: checks eligibility for the target
/// room and books it for the caller.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the enrollment (under the default
/// policy), ticket, or room does not exist. Returns `DomainError::Forbidden`
/// if the ticket is unpaid, remote, or without hotel, if the room is full,
/// or if the store produced no booking. Returns
/// `DomainError::Infrastructure` if a store call fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = command.user_id,
        room_id = command.room_id,
    )
)]
pub async fn handle_create_booking(
    command: &CreateBooking,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingCommandResult, DomainError> {
    create_booking(command, policy, repos)
        .await
        .inspect_err(log_rejection)
}

async fn create_booking(
    command: &CreateBooking,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingCommandResult, DomainError> {
    ensure_can_book(command.issued_by(), command.room_id, policy, repos).await?;

    let booking = repos
        .bookings
        .create(command.issued_by(), command.room_id)
        .await?
        .ok_or(DomainError::Forbidden(Denial::WriteRejected))?;

    info!(booking_id = booking.id, "booking created");
    Ok(BookingCommandResult::from(booking))
}

/// Handles the `ChangeBookingRoom` command: checks eligibility for the new
/// room, checks that the caller owns the booking, and moves it.
///
/// # Errors
///
/// Same as [`handle_create_booking`], plus `DomainError::Forbidden` when the
/// booking does not exist or belongs to another user.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        user_id = command.user_id,
        room_id = command.room_id,
        booking_id = command.booking_id,
    )
)]
pub async fn handle_change_booking_room(
    command: &ChangeBookingRoom,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingCommandResult, DomainError> {
    change_booking_room(command, policy, repos)
        .await
        .inspect_err(log_rejection)
}

async fn change_booking_room(
    command: &ChangeBookingRoom,
    policy: &BookingPolicy,
    repos: &BookingRepositories<'_>,
) -> Result<BookingCommandResult, DomainError> {
    ensure_can_book(command.issued_by(), command.room_id, policy, repos).await?;

    let existing = repos.bookings.find_by_id(command.booking_id).await?;
    eligibility::check_ownership(existing.as_ref(), command.issued_by())?;

    let booking = repos
        .bookings
        .update_room(command.booking_id, command.room_id)
        .await?
        .ok_or(DomainError::Forbidden(Denial::WriteRejected))?;

    info!(booking_id = booking.id, "booking moved to new room");
    Ok(BookingCommandResult::from(booking))
}
