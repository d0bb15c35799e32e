use std::collections::HashSet;
use std::io;
use std::path::Path;

use chrono::Days;
use serde::Deserialize;

use crate::limits::*;
use crate::model::*;

/// Validated catalog + booking set for one property, ready to build an
/// engine from. The engine itself never creates data; this layer is the
/// only place bookings come into existence.
#[derive(Debug)]
pub struct SeedData {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
}

/// On-disk seed document. Bookings are a separate raw shape so interval
/// validation runs through `Booking::new` instead of being skipped by a
/// direct deserialize.
#[derive(Debug, Deserialize)]
struct SeedFile {
    rooms: Vec<Room>,
    bookings: Vec<SeedBooking>,
}

#[derive(Debug, Deserialize)]
struct SeedBooking {
    room: String,
    guest: String,
    status: Status,
    start: Day,
    end: Day,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug)]
pub enum SeedError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(ValidationError),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "seed io error: {e}"),
            SeedError::Parse(e) => write!(f, "seed parse error: {e}"),
            SeedError::Invalid(e) => write!(f, "invalid seed data: {e}"),
            SeedError::LimitExceeded(msg) => write!(f, "seed limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<io::Error> for SeedError {
    fn from(e: io::Error) -> Self {
        SeedError::Io(e)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        SeedError::Parse(e)
    }
}

/// Load a `{rooms, bookings}` JSON seed document.
pub fn load_file(path: &Path) -> Result<SeedData, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    let file: SeedFile = serde_json::from_str(&raw)?;
    let seed = build(file)?;
    tracing::info!(
        path = %path.display(),
        rooms = seed.rooms.len(),
        bookings = seed.bookings.len(),
        "seed file loaded"
    );
    Ok(seed)
}

fn build(file: SeedFile) -> Result<SeedData, SeedError> {
    if file.rooms.len() > MAX_ROOMS_PER_PROPERTY {
        return Err(SeedError::LimitExceeded("too many rooms"));
    }

    let known_ids: HashSet<&str> = file.rooms.iter().map(|r| r.id.as_str()).collect();
    let mut per_room_counts: std::collections::HashMap<&str, usize> =
        std::collections::HashMap::new();

    let mut bookings = Vec::with_capacity(file.bookings.len());
    for raw in &file.bookings {
        let count = per_room_counts.entry(raw.room.as_str()).or_insert(0);
        *count += 1;
        if *count > MAX_BOOKINGS_PER_ROOM {
            return Err(SeedError::LimitExceeded("too many bookings on one room"));
        }
        // Resolution never consults the catalog, so a booking on an
        // unlisted room is legal — just worth surfacing.
        if !known_ids.contains(raw.room.as_str()) {
            tracing::warn!(room = %raw.room, guest = %raw.guest, "booking references unlisted room");
        }
        let booking = Booking::new(
            raw.room.clone(),
            raw.guest.clone(),
            raw.status,
            raw.start,
            raw.end,
            raw.note.clone(),
        )
        .map_err(SeedError::Invalid)?;
        bookings.push(booking);
    }

    Ok(SeedData {
        rooms: file.rooms,
        bookings,
    })
}

/// The built-in demo property: six rooms over three floors and three
/// bookings placed relative to an explicit `today` (no ambient clock reads
/// below `main`).
pub fn demo(today: Day) -> SeedData {
    let room = |id: &str, kind: &str, floor: i32| Room {
        id: id.into(),
        kind: kind.into(),
        floor,
    };
    let day = |offset: u64| today + Days::new(offset);

    let rooms = vec![
        room("101", "Deluxe", 1),
        room("102", "Deluxe", 1),
        room("201", "Suite", 2),
        room("202", "Suite", 2),
        room("301", "Standard", 3),
        room("302", "Standard", 3),
    ];

    let bookings = vec![
        Booking::new(
            "101",
            "Nguyen Van A",
            Status::Booked,
            day(1),
            day(3),
            Some("OTA: Booking.com".into()),
        ),
        Booking::new(
            "201",
            "Tran Thi B",
            Status::Occupied,
            day(0),
            day(5),
            Some("Late checkout 14:00".into()),
        ),
        Booking::new(
            "301",
            "Le C",
            Status::Maintenance,
            day(2),
            day(6),
            Some("A/C repair".into()),
        ),
    ];
    let bookings = bookings
        .into_iter()
        .map(|b| b.expect("demo booking spans are non-empty"))
        .collect();

    SeedData { rooms, bookings }
}
