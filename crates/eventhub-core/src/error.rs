//! Domain error types.
//!
//! Callers see two outcomes for a rejected booking action: the referenced
//! record does not exist ([`DomainError::NotFound`]) or it exists and the
//! action is denied ([`DomainError::Forbidden`]). The [`Denial`] carried by
//! `Forbidden` is for logs only; the HTTP layer never echoes it.

use std::fmt;

use thiserror::Error;

/// Records whose absence can fail a booking action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// The caller's event enrollment.
    Enrollment,
    /// The ticket attached to the enrollment.
    Ticket,
    /// The hotel room being booked.
    Room,
    /// The booking being read or changed.
    Booking,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enrollment => "enrollment",
            Self::Ticket => "ticket",
            Self::Room => "room",
            Self::Booking => "booking",
        };
        f.write_str(name)
    }
}

/// Why a booking action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No enrollment, under a policy that treats this as a permission failure.
    MissingEnrollment,
    /// The ticket is still `RESERVED` (not paid).
    TicketNotPaid,
    /// The ticket type is for remote attendance.
    RemoteTicket,
    /// The ticket type does not include a hotel stay.
    HotelNotIncluded,
    /// The room has no free places.
    RoomFull,
    /// The booking belongs to a different user, or does not exist.
    NotBookingOwner,
    /// The store accepted the request but produced no record.
    WriteRejected,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingEnrollment => "caller has no enrollment",
            Self::TicketNotPaid => "ticket is not paid",
            Self::RemoteTicket => "ticket type is remote",
            Self::HotelNotIncluded => "ticket type does not include hotel",
            Self::RoomFull => "room is at capacity",
            Self::NotBookingOwner => "booking is not owned by caller",
            Self::WriteRejected => "booking write produced no record",
        };
        f.write_str(reason)
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(Entity),

    /// The records exist but policy denies the action.
    #[error("forbidden: {0}")]
    Forbidden(Denial),

    /// A validation error in request input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_entity() {
        assert_eq!(
            DomainError::NotFound(Entity::Room).to_string(),
            "room not found"
        );
    }

    #[test]
    fn test_forbidden_message_carries_the_denial_reason() {
        assert_eq!(
            DomainError::Forbidden(Denial::RoomFull).to_string(),
            "forbidden: room is at capacity"
        );
    }
}
