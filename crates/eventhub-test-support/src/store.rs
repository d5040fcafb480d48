//! Fake implementations of the storage collaborator traits.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use eventhub_core::clock::Clock;
use eventhub_core::error::DomainError;
use eventhub_core::id::{BookingId, EnrollmentId, RoomId, UserId};
use eventhub_core::model::{Booking, BookingWithRoom, Enrollment, Room, RoomOccupancy, Ticket};
use eventhub_core::repository::{
    BookingRepository, EnrollmentRepository, RoomRepository, TicketRepository,
};

use crate::clock::FixedClock;
use crate::fixtures::paid_hotel_ticket;

#[derive(Debug)]
struct Tables {
    enrollments: Vec<Enrollment>,
    tickets: Vec<Ticket>,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    next_booking_id: BookingId,
    reject_writes: bool,
}

impl Tables {
    fn occupancy(&self, room_id: RoomId, excluding: Option<BookingId>) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.room_id == room_id && Some(b.id) != excluding)
            .count()
    }

    fn has_vacancy(&self, room: &Room, excluding: Option<BookingId>) -> bool {
        usize::try_from(room.capacity)
            .is_ok_and(|capacity| self.occupancy(room.id, excluding) < capacity)
    }
}

/// An in-memory store implementing every collaborator trait.
///
/// All tables sit behind one mutex, so each capacity-guarded write checks
/// occupancy and writes in a single critical section. Room lookups are
/// counted so tests can assert that a handler stopped early.
#[derive(Debug)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    room_lookups: AtomicUsize,
    clock: FixedClock,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                enrollments: Vec::new(),
                tickets: Vec::new(),
                rooms: Vec::new(),
                bookings: Vec::new(),
                next_booking_id: 1,
                reject_writes: false,
            }),
            room_lookups: AtomicUsize::new(0),
            clock: FixedClock::default(),
        }
    }

    fn tables_mut(&mut self) -> &mut Tables {
        self.tables.get_mut().unwrap()
    }

    /// Adds an enrollment owned by `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_enrollment(mut self, user_id: UserId, enrollment_id: EnrollmentId) -> Self {
        self.tables_mut().enrollments.push(Enrollment {
            id: enrollment_id,
            user_id,
        });
        self
    }

    /// Adds a ticket.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tables_mut().tickets.push(ticket);
        self
    }

    /// Adds an enrollment (id = `user_id`) and a paid, in-person, hotel
    /// ticket for it.
    #[must_use]
    pub fn with_eligible_user(self, user_id: UserId) -> Self {
        self.with_enrollment(user_id, user_id)
            .with_ticket(paid_hotel_ticket(user_id))
    }

    /// Adds a room.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_room(mut self, room: Room) -> Self {
        self.tables_mut().rooms.push(room);
        self
    }

    /// Adds an existing booking, bypassing capacity checks.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_booking(mut self, id: BookingId, user_id: UserId, room_id: RoomId) -> Self {
        let at = self.clock.now();
        let tables = self.tables_mut();
        tables.bookings.push(Booking {
            id,
            user_id,
            room_id,
            created_at: at,
            updated_at: at,
        });
        tables.next_booking_id = tables.next_booking_id.max(id + 1);
        self
    }

    /// Makes every `create` and `update_room` return no record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn rejecting_writes(mut self) -> Self {
        self.tables_mut().reject_writes = true;
        self
    }

    /// Returns a snapshot of one booking.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn booking(&self, booking_id: BookingId) -> Option<Booking> {
        let tables = self.tables.lock().unwrap();
        tables.bookings.iter().find(|b| b.id == booking_id).cloned()
    }

    /// Number of bookings currently assigned to `room_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn bookings_in_room(&self, room_id: RoomId) -> usize {
        self.tables.lock().unwrap().occupancy(room_id, None)
    }

    /// Number of `RoomRepository::find_by_id` calls made so far.
    pub fn room_lookups(&self) -> usize {
        self.room_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .enrollments
            .iter()
            .find(|e| e.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn find_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tickets
            .iter()
            .find(|t| t.enrollment_id == enrollment_id)
            .cloned())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn find_by_id(&self, room_id: RoomId) -> Result<Option<RoomOccupancy>, DomainError> {
        self.room_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .map(|room| RoomOccupancy {
                room: room.clone(),
                bookings: tables
                    .bookings
                    .iter()
                    .filter(|b| b.room_id == room_id)
                    .cloned()
                    .collect(),
            }))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .min_by_key(|b| b.id)
            .and_then(|booking| {
                let room = tables.rooms.iter().find(|r| r.id == booking.room_id)?;
                Some(BookingWithRoom {
                    booking: booking.clone(),
                    room: room.clone(),
                })
            }))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.booking(booking_id))
    }

    async fn create(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.reject_writes {
            return Ok(None);
        }
        let Some(room) = tables.rooms.iter().find(|r| r.id == room_id).cloned() else {
            return Ok(None);
        };
        if !tables.has_vacancy(&room, None) {
            return Ok(None);
        }

        let at = self.clock.now();
        let booking = Booking {
            id: tables.next_booking_id,
            user_id,
            room_id,
            created_at: at,
            updated_at: at,
        };
        tables.next_booking_id += 1;
        tables.bookings.push(booking.clone());
        Ok(Some(booking))
    }

    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.reject_writes {
            return Ok(None);
        }
        let Some(room) = tables.rooms.iter().find(|r| r.id == room_id).cloned() else {
            return Ok(None);
        };
        if !tables.has_vacancy(&room, Some(booking_id)) {
            return Ok(None);
        }

        let at = self.clock.now();
        let Some(booking) = tables.bookings.iter_mut().find(|b| b.id == booking_id) else {
            return Ok(None);
        };
        booking.room_id = room_id;
        booking.updated_at = at;
        Ok(Some(booking.clone()))
    }
}

/// A store whose every call fails with an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

fn unavailable<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

#[async_trait]
impl EnrollmentRepository for FailingStore {
    async fn find_by_user(&self, _user_id: UserId) -> Result<Option<Enrollment>, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl TicketRepository for FailingStore {
    async fn find_by_enrollment(
        &self,
        _enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl RoomRepository for FailingStore {
    async fn find_by_id(&self, _room_id: RoomId) -> Result<Option<RoomOccupancy>, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl BookingRepository for FailingStore {
    async fn find_by_user(&self, _user_id: UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        unavailable()
    }

    async fn find_by_id(&self, _booking_id: BookingId) -> Result<Option<Booking>, DomainError> {
        unavailable()
    }

    async fn create(
        &self,
        _user_id: UserId,
        _room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        unavailable()
    }

    async fn update_room(
        &self,
        _booking_id: BookingId,
        _room_id: RoomId,
    ) -> Result<Option<Booking>, DomainError> {
        unavailable()
    }
}
