use std::collections::HashMap;

use crate::model::Booking;

/// Bookings indexed by room id. Populated once when an engine is built;
/// immutable afterwards.
///
/// Each room's vector keeps insertion order. That order is load-bearing:
/// cell resolution scans it front to back and the first covering booking
/// wins, so reordering here would change resolved statuses for rooms with
/// overlapping bookings.
#[derive(Debug, Default)]
pub struct BookingStore {
    by_room: HashMap<String, Vec<Booking>>,
    total: usize,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        let mut store = Self::new();
        for booking in bookings {
            store.insert(booking);
        }
        store
    }

    /// Append a booking to its room's list. No sort — see the type docs.
    pub fn insert(&mut self, booking: Booking) {
        self.by_room
            .entry(booking.room_id.clone())
            .or_default()
            .push(booking);
        self.total += 1;
    }

    /// All bookings for a room, in insertion order. Unknown rooms yield an
    /// empty slice, not an error.
    pub fn bookings_for(&self, room_id: &str) -> &[Booking] {
        self.by_room.get(room_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn room_count(&self) -> usize {
        self.by_room.len()
    }
}
