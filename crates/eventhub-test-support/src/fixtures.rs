//! Record builders for tests.

use eventhub_core::id::{EnrollmentId, RoomId};
use eventhub_core::model::{Room, Ticket, TicketStatus, TicketType};

/// A ticket for `enrollment_id` with the given status and type flags.
/// The ticket id equals the enrollment id.
#[must_use]
pub fn ticket(
    enrollment_id: EnrollmentId,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) -> Ticket {
    Ticket {
        id: enrollment_id,
        enrollment_id,
        status,
        ticket_type: TicketType {
            id: 1,
            name: if is_remote { "Remote" } else { "In person" }.to_owned(),
            is_remote,
            includes_hotel,
        },
    }
}

/// A paid, in-person ticket that includes hotel.
#[must_use]
pub fn paid_hotel_ticket(enrollment_id: EnrollmentId) -> Ticket {
    ticket(enrollment_id, TicketStatus::Paid, false, true)
}

/// A room named `Room {id}` in hotel 1.
#[must_use]
pub fn room(id: RoomId, capacity: i32) -> Room {
    Room {
        id,
        hotel_id: 1,
        name: format!("Room {id}"),
        capacity,
    }
}
