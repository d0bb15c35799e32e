use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Calendar date at local midnight — the only time type.
pub type Day = NaiveDate;

/// Half-open day range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySpan {
    pub start: Day,
    pub end: Day,
}

impl DaySpan {
    pub fn new(start: Day, end: Day) -> Self {
        debug_assert!(start < end, "DaySpan start must be before end");
        Self { start, end }
    }

    /// Nights covered: `[d, d+2)` is two nights.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// End day is exclusive: `[d, d+2)` contains `d` and `d+1`, not `d+2`.
    pub fn contains_day(&self, day: Day) -> bool {
        self.start <= day && day < self.end
    }

    #[allow(dead_code)]
    pub fn overlaps(&self, other: &DaySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Room status vocabulary. Closed set — `Available` is what resolution
/// falls back to when no booking covers a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Booked,
    Occupied,
    Maintenance,
    Cleaning,
}

impl Status {
    /// Legend order. Fixed so rendered legends stay stable.
    pub const ALL: [Status; 5] = [
        Status::Available,
        Status::Booked,
        Status::Occupied,
        Status::Maintenance,
        Status::Cleaning,
    ];

    pub fn meta(self) -> StatusMeta {
        match self {
            Status::Available => StatusMeta {
                label: "Available",
                fill: "#f4f4f5",
                indicator: "#71717a",
            },
            Status::Booked => StatusMeta {
                label: "Booked",
                fill: "#fde68a",
                indicator: "#f59e0b",
            },
            Status::Occupied => StatusMeta {
                label: "Occupied",
                fill: "#bfdbfe",
                indicator: "#3b82f6",
            },
            Status::Maintenance => StatusMeta {
                label: "Maintenance",
                fill: "#fecdd3",
                indicator: "#f43f5e",
            },
            Status::Cleaning => StatusMeta {
                label: "Cleaning",
                fill: "#a7f3d0",
                indicator: "#10b981",
            },
        }
    }
}

/// Display-only attributes for one status. Renderers consume these;
/// resolution logic never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusMeta {
    pub label: &'static str,
    pub fill: &'static str,
    pub indicator: &'static str,
}

/// One catalog entry. Immutable for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    /// Room-type label ("Deluxe", "Suite", …).
    #[serde(rename = "type")]
    pub kind: String,
    pub floor: i32,
}

/// One booking occupying `[span.start, span.end)` — end day exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: Ulid,
    pub room_id: String,
    pub guest: String,
    pub status: Status,
    pub span: DaySpan,
    pub note: Option<String>,
}

impl Booking {
    /// Build a booking, rejecting intervals that cover no nights.
    pub fn new(
        room_id: impl Into<String>,
        guest: impl Into<String>,
        status: Status,
        start: Day,
        end: Day,
        note: Option<String>,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptySpan { start, end });
        }
        Ok(Self {
            id: Ulid::new(),
            room_id: room_id.into(),
            guest: guest.into(),
            status,
            span: DaySpan::new(start, end),
            note,
        })
    }
}

/// Inclusive day range rendered as grid columns. Constructed through
/// `new`, so downstream code never sees `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: Day,
    end: Day,
}

impl DateWindow {
    pub fn new(start: Day, end: Day) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::BackwardsWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Day {
        self.start
    }

    pub fn end(&self) -> Day {
        self.end
    }

    /// Column count: `end − start` in days, plus one.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Days in ascending order, both bounds included.
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Booking interval `[start, end)` covers no nights.
    EmptySpan { start: Day, end: Day },
    /// Window end precedes its start.
    BackwardsWindow { start: Day, end: Day },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptySpan { start, end } => {
                write!(f, "empty booking interval [{start}, {end})")
            }
            ValidationError::BackwardsWindow { start, end } => {
                write!(f, "backwards window [{start}, {end}]")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingInfo {
    pub id: Ulid,
    pub room_id: String,
    pub guest: String,
    pub status: Status,
    pub start: Day,
    pub end: Day,
    pub note: Option<String>,
}

impl From<&Booking> for BookingInfo {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id,
            room_id: b.room_id.clone(),
            guest: b.guest.clone(),
            status: b.status,
            start: b.span.start,
            end: b.span.end,
            note: b.note.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub day: Day,
    pub status: Status,
    pub booking: Option<BookingInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRow {
    pub room: Room,
    pub cells: Vec<CellInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub days: Vec<Day>,
    pub rooms: Vec<RoomRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub status: Status,
    pub label: &'static str,
    pub fill: &'static str,
    pub indicator: &'static str,
}

/// Legend rows in `Status::ALL` order.
pub fn legend() -> Vec<LegendEntry> {
    Status::ALL
        .iter()
        .map(|&status| {
            let meta = status.meta();
            LegendEntry {
                status,
                label: meta.label,
                fill: meta.fill,
                indicator: meta.indicator,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Day {
        Day::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn span_basics() {
        let s = DaySpan::new(d(2026, 3, 1), d(2026, 3, 3));
        assert_eq!(s.nights(), 2);
        assert!(s.contains_day(d(2026, 3, 1)));
        assert!(s.contains_day(d(2026, 3, 2)));
        assert!(!s.contains_day(d(2026, 3, 3))); // half-open
        assert!(!s.contains_day(d(2026, 2, 28)));
    }

    #[test]
    fn span_overlap() {
        let a = DaySpan::new(d(2026, 3, 1), d(2026, 3, 5));
        let b = DaySpan::new(d(2026, 3, 4), d(2026, 3, 8));
        let c = DaySpan::new(d(2026, 3, 5), d(2026, 3, 7));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn booking_rejects_empty_interval() {
        let day = d(2026, 3, 1);
        let zero = Booking::new("101", "A", Status::Booked, day, day, None);
        assert!(matches!(zero, Err(ValidationError::EmptySpan { .. })));

        let backwards = Booking::new("101", "A", Status::Booked, day, d(2026, 2, 1), None);
        assert!(matches!(backwards, Err(ValidationError::EmptySpan { .. })));
    }

    #[test]
    fn booking_single_night() {
        let b = Booking::new("101", "A", Status::Booked, d(2026, 3, 1), d(2026, 3, 2), None)
            .unwrap();
        assert_eq!(b.span.nights(), 1);
        assert!(b.span.contains_day(d(2026, 3, 1)));
        assert!(!b.span.contains_day(d(2026, 3, 2)));
    }

    #[test]
    fn window_rejects_backwards() {
        let w = DateWindow::new(d(2026, 3, 5), d(2026, 3, 1));
        assert!(matches!(w, Err(ValidationError::BackwardsWindow { .. })));
    }

    #[test]
    fn window_single_day() {
        let w = DateWindow::new(d(2026, 3, 1), d(2026, 3, 1)).unwrap();
        assert_eq!(w.num_days(), 1);
        assert_eq!(w.days().collect::<Vec<_>>(), vec![d(2026, 3, 1)]);
    }

    #[test]
    fn window_fourteen_days_in_order() {
        let w = DateWindow::new(d(2026, 3, 1), d(2026, 3, 14)).unwrap();
        assert_eq!(w.num_days(), 14);
        let days: Vec<Day> = w.days().collect();
        assert_eq!(days.len(), 14);
        assert_eq!(days[0], d(2026, 3, 1));
        assert_eq!(days[13], d(2026, 3, 14));
        assert!(days.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn window_crosses_month_boundary() {
        let w = DateWindow::new(d(2026, 2, 27), d(2026, 3, 2)).unwrap();
        let days: Vec<Day> = w.days().collect();
        assert_eq!(days.len(), 4); // 2026 is not a leap year
        assert_eq!(days[1], d(2026, 2, 28));
        assert_eq!(days[2], d(2026, 3, 1));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Booked).unwrap(), "\"booked\"");
        let parsed: Status = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(parsed, Status::Maintenance);
    }

    #[test]
    fn legend_order_is_stable() {
        let rows = legend();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].status, Status::Available);
        assert_eq!(rows[1].status, Status::Booked);
        assert_eq!(rows[4].status, Status::Cleaning);
        assert_eq!(rows[3].label, "Maintenance");
    }

    #[test]
    fn room_type_field_renamed() {
        let room: Room =
            serde_json::from_str(r#"{"id":"101","type":"Deluxe","floor":1}"#).unwrap();
        assert_eq!(room.kind, "Deluxe");
        let json = serde_json::to_string(&room).unwrap();
        assert!(json.contains("\"type\":\"Deluxe\""));
    }
}
