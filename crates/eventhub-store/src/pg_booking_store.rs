//! `PostgreSQL` implementation of the storage collaborator traits.
//!
//! Capacity-guarded writes lock the target room row with
//! `SELECT ... FOR UPDATE` before counting its bookings, so writers aimed at
//! the same room run one after another and the count they see includes every
//! booking committed before them.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use eventhub_core::clock::Clock;
use eventhub_core::error::DomainError;
use eventhub_core::id::{BookingId, EnrollmentId, RoomId, UserId};
use eventhub_core::model::{Booking, BookingWithRoom, Enrollment, RoomOccupancy, Ticket};
use eventhub_core::repository::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};

use crate::rows::{BookingRow, BookingWithRoomRow, EnrollmentRow, RoomRow, TicketRow};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

fn infrastructure(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Infrastructure(format!("{context}: {e}"))
}

/// PostgreSQL-backed booking store.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PgBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgBookingStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PgBookingStore {
    /// Creates a new `PgBookingStore`. Booking timestamps are taken from
    /// `clock`.
    #[must_use]
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Locks `room_id` for the rest of the transaction and reports whether a
    /// place is free, ignoring `excluding` when counting.
    ///
    /// Returns `false` for a room that does not exist.
    async fn lock_room_with_vacancy(
        tx: &mut Transaction<'static, Postgres>,
        room_id: RoomId,
        excluding: Option<BookingId>,
    ) -> Result<bool, DomainError> {
        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
                .bind(room_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(infrastructure("failed to lock room"))?;
        let Some(capacity) = capacity else {
            return Ok(false);
        };

        let occupancy: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE room_id = $1 AND ($2::INTEGER IS NULL OR id <> $2)",
        )
        .bind(room_id)
        .bind(excluding)
        .fetch_one(&mut **tx)
        .await
        .map_err(infrastructure("failed to count room bookings"))?;

        debug!(room_id, capacity, occupancy, "room locked for booking write");
        Ok(occupancy < i64::from(capacity))
    }
}

#[async_trait]
impl EnrollmentRepository for PgBookingStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> =
            sqlx::query_as("SELECT id, user_id FROM enrollments WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure("failed to load enrollment"))?;
        Ok(row.map(Enrollment::from))
    }
}

#[async_trait]
impl TicketRepository for PgBookingStore {
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r"
            SELECT t.id, t.enrollment_id, t.status,
                   tt.id AS ticket_type_id, tt.name AS ticket_type_name,
                   tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            ",
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure("failed to load ticket"))?;
        Ok(row.map(Ticket::from))
    }
}

#[async_trait]
impl RoomRepository for PgBookingStore {
    async fn find_by_id(&self, room_id: RoomId) -> Result<Option<RoomOccupancy>, DomainError> {
        let room: Option<RoomRow> =
            sqlx::query_as("SELECT id, hotel_id, name, capacity FROM rooms WHERE id = $1")
                .bind(room_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure("failed to load room"))?;
        let Some(room) = room else {
            return Ok(None);
        };

        let bookings: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1 ORDER BY id"
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure("failed to load room bookings"))?;

        Ok(Some(RoomOccupancy {
            room: room.into(),
            bookings: bookings.into_iter().map(Booking::from).collect(),
        }))
    }
}

#[async_trait]
impl BookingRepository for PgBookingStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        let row: Option<BookingWithRoomRow> = sqlx::query_as(
            r"
            SELECT b.id, b.user_id, b.room_id, b.created_at, b.updated_at,
                   r.hotel_id, r.name AS room_name, r.capacity
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            ORDER BY b.id
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure("failed to load booking"))?;
        Ok(row.map(BookingWithRoom::from))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure("failed to load booking"))?;
        Ok(row.map(Booking::from))
    }

    async fn create(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(infrastructure("failed to start transaction"))?;

        // Dropping `tx` without commit rolls back and releases the lock.
        if !Self::lock_room_with_vacancy(&mut tx, room_id, None).await? {
            return Ok(None);
        }

        let now = self.clock.now();
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "INSERT INTO bookings (user_id, room_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(user_id)
        .bind(room_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(infrastructure("failed to insert booking"))?;

        tx.commit()
            .await
            .map_err(infrastructure("failed to commit booking"))?;
        Ok(row.map(Booking::from))
    }

    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(infrastructure("failed to start transaction"))?;

        if !Self::lock_room_with_vacancy(&mut tx, room_id, Some(booking_id)).await? {
            return Ok(None);
        }

        let now = self.clock.now();
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "UPDATE bookings SET room_id = $2, updated_at = $3 WHERE id = $1 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(room_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(infrastructure("failed to update booking"))?;

        tx.commit()
            .await
            .map_err(infrastructure("failed to commit booking"))?;
        Ok(row.map(Booking::from))
    }
}
