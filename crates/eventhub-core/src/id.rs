//! Identifier aliases shared across contexts.
//!
//! Identifiers are database serial keys. Anything arriving from outside the
//! process is checked with [`ensure_positive`] before it reaches a handler.

use crate::error::DomainError;

/// Identifies an authenticated user.
pub type UserId = i32;
/// Identifies an enrollment (a user's event registration).
pub type EnrollmentId = i32;
/// Identifies a ticket.
pub type TicketId = i32;
/// Identifies a ticket type.
pub type TicketTypeId = i32;
/// Identifies a hotel.
pub type HotelId = i32;
/// Identifies a hotel room.
pub type RoomId = i32;
/// Identifies a booking.
pub type BookingId = i32;

/// Rejects zero and negative identifiers.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming `field` if `value` is not
/// strictly positive.
pub fn ensure_positive(field: &str, value: i32) -> Result<i32, DomainError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(DomainError::Validation(format!(
            "{field} must be a positive integer, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive_accepts_positive_ids() {
        assert_eq!(ensure_positive("room_id", 7).unwrap(), 7);
    }

    #[test]
    fn test_ensure_positive_rejects_zero_and_negative() {
        for value in [0, -1, i32::MIN] {
            match ensure_positive("room_id", value) {
                Err(DomainError::Validation(msg)) => assert!(msg.contains("room_id")),
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }
}
