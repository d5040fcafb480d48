//! Records owned by the persistence layer.
//!
//! These are loaded fresh for every request; nothing here is cached between
//! calls. Relationships are plain foreign keys: Booking → Room → Hotel,
//! Booking → User, Ticket → `TicketType`, Ticket → Enrollment → User.

use chrono::{DateTime, Utc};

use crate::id::{BookingId, EnrollmentId, HotelId, RoomId, TicketId, TicketTypeId, UserId};

/// A user's registration for the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Enrollment identifier.
    pub id: EnrollmentId,
    /// The owning user.
    pub user_id: UserId,
}

/// Payment state of a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatus {
    /// Held but not yet paid.
    Reserved,
    /// Paid and final.
    Paid,
    /// Any status this service does not interpret.
    Other(String),
}

impl TicketStatus {
    /// Maps the stored status label onto a `TicketStatus`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "RESERVED" => Self::Reserved,
            "PAID" => Self::Paid,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The stored status label.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
            Self::Other(label) => label,
        }
    }
}

/// Category of ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketType {
    /// Ticket type identifier.
    pub id: TicketTypeId,
    /// Display name.
    pub name: String,
    /// Remote attendance; remote tickets never include a room.
    pub is_remote: bool,
    /// Whether the ticket grants a hotel stay.
    pub includes_hotel: bool,
}

/// An admission ticket, loaded with its type embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Ticket identifier.
    pub id: TicketId,
    /// The enrollment the ticket was bought for.
    pub enrollment_id: EnrollmentId,
    /// Payment state.
    pub status: TicketStatus,
    /// The ticket's category.
    pub ticket_type: TicketType,
}

/// A hotel room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Room identifier.
    pub id: RoomId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Display name.
    pub name: String,
    /// Number of bookings the room can hold. Never negative.
    pub capacity: i32,
}

/// A room together with the bookings currently occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    /// The room.
    pub room: Room,
    /// Bookings currently assigned to the room.
    pub bookings: Vec<Booking>,
}

impl RoomOccupancy {
    /// Number of bookings currently in the room.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.bookings.len()
    }

    /// True when occupancy is strictly below capacity.
    #[must_use]
    pub fn has_vacancy(&self) -> bool {
        usize::try_from(self.room.capacity).is_ok_and(|capacity| self.occupancy() < capacity)
    }
}

/// A user's reservation of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// The owning user.
    pub user_id: UserId,
    /// The booked room.
    pub room_id: RoomId,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last changed.
    pub updated_at: DateTime<Utc>,
}

/// A booking loaded together with its room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithRoom {
    /// The booking.
    pub booking: Booking,
    /// The booked room.
    pub room: Room,
}
