use crate::model::*;

// ── Cell resolution ──────────────────────────────────────────────

/// One resolved (room, day) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub day: Day,
    pub status: Status,
    pub booking: Option<&'a Booking>,
}

/// Resolve the status of one day against one room's booking list.
///
/// Scans in list order and returns the first booking whose `[start, end)`
/// interval contains `day`. First-match-wins is the compatibility
/// contract for overlapping bookings: the earliest-inserted booking
/// determines the cell, not the latest or any priority scheme. With no
/// covering booking the cell is `Available`.
///
/// No caching — every lookup re-scans the list. O(B) per cell is the
/// accepted ceiling at this scale (tens of rooms, weeks of days).
pub fn resolve_cell<'a>(bookings: &'a [Booking], day: Day) -> (Status, Option<&'a Booking>) {
    for booking in bookings {
        if booking.span.contains_day(day) {
            return (booking.status, Some(booking));
        }
    }
    (Status::Available, None)
}

/// Resolve one room's timeline row: one cell per day in the window, in
/// window order.
pub fn resolve_row<'a>(bookings: &'a [Booking], window: &DateWindow) -> Vec<Cell<'a>> {
    window
        .days()
        .map(|day| {
            let (status, booking) = resolve_cell(bookings, day);
            Cell {
                day,
                status,
                booking,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Day {
        Day::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn booking(room: &str, status: Status, start: u32, end: u32) -> Booking {
        Booking::new(room, "guest", status, d(start), d(end), None).unwrap()
    }

    fn window(start: u32, end: u32) -> DateWindow {
        DateWindow::new(d(start), d(end)).unwrap()
    }

    // ── resolve_cell ─────────────────────────────────────

    #[test]
    fn no_bookings_is_available() {
        for day in 1..=28 {
            let (status, backing) = resolve_cell(&[], d(day));
            assert_eq!(status, Status::Available);
            assert!(backing.is_none());
        }
    }

    #[test]
    fn interval_boundaries() {
        // [5, 9): covered on 5..=8, free on 4 and 9.
        let bookings = vec![booking("101", Status::Booked, 5, 9)];

        assert_eq!(resolve_cell(&bookings, d(4)).0, Status::Available);
        for day in 5..9 {
            let (status, backing) = resolve_cell(&bookings, d(day));
            assert_eq!(status, Status::Booked);
            assert_eq!(backing.unwrap().id, bookings[0].id);
        }
        assert_eq!(resolve_cell(&bookings, d(9)).0, Status::Available);
    }

    #[test]
    fn two_night_booking_covers_exactly_two_days() {
        let bookings = vec![booking("101", Status::Occupied, 10, 12)];
        assert_eq!(resolve_cell(&bookings, d(10)).0, Status::Occupied);
        assert_eq!(resolve_cell(&bookings, d(11)).0, Status::Occupied);
        assert_eq!(resolve_cell(&bookings, d(12)).0, Status::Available);
    }

    #[test]
    fn first_match_wins_on_overlap() {
        // Both bookings cover day 6; the earlier-inserted one resolves.
        let first = booking("101", Status::Maintenance, 5, 8);
        let second = booking("101", Status::Booked, 6, 10);
        let bookings = vec![first.clone(), second.clone()];

        let (status, backing) = resolve_cell(&bookings, d(6));
        assert_eq!(status, Status::Maintenance);
        assert_eq!(backing.unwrap().id, first.id);

        // Outside the first booking the second takes over.
        let (status, backing) = resolve_cell(&bookings, d(8));
        assert_eq!(status, Status::Booked);
        assert_eq!(backing.unwrap().id, second.id);
    }

    #[test]
    fn first_match_is_insertion_order_not_date_order() {
        // Later-starting booking inserted first still wins on shared days.
        let late_start = booking("101", Status::Cleaning, 7, 9);
        let early_start = booking("101", Status::Booked, 5, 9);
        let bookings = vec![late_start.clone(), early_start];

        let (status, backing) = resolve_cell(&bookings, d(7));
        assert_eq!(status, Status::Cleaning);
        assert_eq!(backing.unwrap().id, late_start.id);
    }

    // ── resolve_row ──────────────────────────────────────

    #[test]
    fn row_matches_window_days() {
        let bookings = vec![booking("101", Status::Booked, 2, 4)];
        let row = resolve_row(&bookings, &window(1, 4));

        assert_eq!(row.len(), 4);
        assert_eq!(row[0].day, d(1));
        assert_eq!(row[0].status, Status::Available);
        assert_eq!(row[1].status, Status::Booked);
        assert_eq!(row[2].status, Status::Booked);
        assert_eq!(row[3].status, Status::Available); // end day exclusive
    }

    #[test]
    fn row_for_empty_list_is_all_available() {
        let row = resolve_row(&[], &window(1, 14));
        assert_eq!(row.len(), 14);
        assert!(row.iter().all(|c| c.status == Status::Available && c.booking.is_none()));
    }

    #[test]
    fn adjacent_bookings_leave_no_gap() {
        // Back-to-back: [3,5) then [5,7) — day 5 belongs to the second.
        let first = booking("101", Status::Booked, 3, 5);
        let second = booking("101", Status::Cleaning, 5, 7);
        let bookings = vec![first.clone(), second.clone()];

        let row = resolve_row(&bookings, &window(3, 7));
        assert_eq!(row[1].booking.unwrap().id, first.id); // day 4
        assert_eq!(row[2].booking.unwrap().id, second.id); // day 5
        assert_eq!(row[4].status, Status::Available); // day 7
    }
}
