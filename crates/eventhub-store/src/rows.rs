//! Row types returned by the store's queries.

use chrono::{DateTime, Utc};
use eventhub_core::model::{
    Booking, BookingWithRoom, Enrollment, Room, Ticket, TicketStatus, TicketType,
};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub user_id: i32,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TicketRow {
    pub id: i32,
    pub enrollment_id: i32,
    pub status: String,
    pub ticket_type_id: i32,
    pub ticket_type_name: String,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            enrollment_id: row.enrollment_id,
            status: TicketStatus::from_label(&row.status),
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.ticket_type_name,
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct RoomRow {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub capacity: i32,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: row.id,
            hotel_id: row.hotel_id,
            name: row.name,
            capacity: row.capacity,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A booking joined with its room.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookingWithRoomRow {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub hotel_id: i32,
    pub room_name: String,
    pub capacity: i32,
}

impl From<BookingWithRoomRow> for BookingWithRoom {
    fn from(row: BookingWithRoomRow) -> Self {
        Self {
            booking: Booking {
                id: row.id,
                user_id: row.user_id,
                room_id: row.room_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            room: Room {
                id: row.room_id,
                hotel_id: row.hotel_id,
                name: row.room_name,
                capacity: row.capacity,
            },
        }
    }
}
