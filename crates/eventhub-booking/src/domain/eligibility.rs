//! Eligibility rules.
//!
//! Pure checks over records that have already been loaded. The handlers in
//! `application` decide which records to load and in what order; these
//! functions only say yes or no.

use eventhub_core::error::{Denial, DomainError};
use eventhub_core::id::UserId;
use eventhub_core::model::{Booking, RoomOccupancy, Ticket, TicketStatus};

/// Checks that the ticket allows a hotel booking: paid, in person, and with
/// a hotel stay included. Rules are evaluated in that order.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` with the first failing rule.
pub fn check_ticket(ticket: &Ticket) -> Result<(), DomainError> {
    if ticket.status == TicketStatus::Reserved {
        return Err(DomainError::Forbidden(Denial::TicketNotPaid));
    }
    if ticket.ticket_type.is_remote {
        return Err(DomainError::Forbidden(Denial::RemoteTicket));
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(DomainError::Forbidden(Denial::HotelNotIncluded));
    }
    Ok(())
}

/// Checks that the room has a free place.
///
/// # Errors
///
/// Returns `DomainError::Forbidden(Denial::RoomFull)` when occupancy has
/// reached capacity.
pub fn check_room(room: &RoomOccupancy) -> Result<(), DomainError> {
    if room.has_vacancy() {
        Ok(())
    } else {
        Err(DomainError::Forbidden(Denial::RoomFull))
    }
}

/// Checks that `booking` exists and belongs to `user_id`.
///
/// A missing booking is reported the same way as someone else's booking so
/// that booking ids cannot be probed.
///
/// # Errors
///
/// Returns `DomainError::Forbidden(Denial::NotBookingOwner)`.
pub fn check_ownership(booking: Option<&Booking>, user_id: UserId) -> Result<(), DomainError> {
    match booking {
        Some(booking) if booking.user_id == user_id => Ok(()),
        _ => Err(DomainError::Forbidden(Denial::NotBookingOwner)),
    }
}
