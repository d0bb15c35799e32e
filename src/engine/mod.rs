mod error;
mod resolver;
mod store;
mod view;

pub use error::EngineError;
pub use resolver::{Cell, resolve_cell, resolve_row};
pub use store::BookingStore;
pub use view::{build_date_columns, build_room_view};

use crate::limits::*;
use crate::model::*;
use crate::seed::SeedData;

/// One property's catalog and booking set behind the query operations.
///
/// Immutable after construction: the serving layer shares an `Arc<Engine>`
/// across connections with no locking, and every query is a pure function
/// of the engine state and its arguments.
#[derive(Debug)]
pub struct Engine {
    catalog: Vec<Room>,
    store: BookingStore,
}

impl Engine {
    pub fn new(seed: SeedData) -> Self {
        Self {
            catalog: seed.rooms,
            store: BookingStore::from_bookings(seed.bookings),
        }
    }

    /// Engine with no rooms and no bookings. Every query yields empty
    /// results or `available` cells.
    pub fn empty() -> Self {
        Self {
            catalog: Vec::new(),
            store: BookingStore::new(),
        }
    }

    pub fn catalog(&self) -> &[Room] {
        self.catalog.as_slice()
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Resolve a single (room, day) cell.
    ///
    /// Never fails: resolution only consults the booking set, so an id
    /// missing from the catalog behaves like a bookingless room and
    /// resolves `available`. Callers needing existence checks consult
    /// `catalog()` themselves.
    pub fn resolve_cell(&self, room_id: &str, day: Day) -> CellInfo {
        let (status, booking) = resolver::resolve_cell(self.store.bookings_for(room_id), day);
        CellInfo {
            day,
            status,
            booking: booking.map(BookingInfo::from),
        }
    }

    /// Resolve one room's timeline row across the window.
    pub fn resolve_row(&self, room_id: &str, window: &DateWindow) -> Result<Vec<CellInfo>, EngineError> {
        check_window(window)?;
        Ok(resolver::resolve_row(self.store.bookings_for(room_id), window)
            .into_iter()
            .map(cell_info)
            .collect())
    }

    /// Resolve the full status matrix: filtered/ordered rooms as rows,
    /// window days as columns.
    pub fn resolve_grid(
        &self,
        search: &str,
        group_by_floor: bool,
        window: &DateWindow,
    ) -> Result<Grid, EngineError> {
        check_window(window)?;
        check_search(search)?;

        let rooms = view::build_room_view(&self.catalog, search, group_by_floor)
            .into_iter()
            .map(|room| RoomRow {
                cells: resolver::resolve_row(self.store.bookings_for(&room.id), window)
                    .into_iter()
                    .map(cell_info)
                    .collect(),
                room: room.clone(),
            })
            .collect();

        Ok(Grid {
            days: view::build_date_columns(window),
            rooms,
        })
    }

    /// Filtered, ordered rooms without resolving any cells.
    pub fn room_view(&self, search: &str, group_by_floor: bool) -> Result<Vec<Room>, EngineError> {
        check_search(search)?;
        Ok(view::build_room_view(&self.catalog, search, group_by_floor)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The window's column days.
    pub fn date_columns(&self, window: &DateWindow) -> Result<Vec<Day>, EngineError> {
        check_window(window)?;
        Ok(view::build_date_columns(window))
    }
}

fn cell_info(cell: Cell<'_>) -> CellInfo {
    CellInfo {
        day: cell.day,
        status: cell.status,
        booking: cell.booking.map(BookingInfo::from),
    }
}

fn check_window(window: &DateWindow) -> Result<(), EngineError> {
    if window.num_days() > MAX_WINDOW_DAYS {
        return Err(EngineError::LimitExceeded("window too wide"));
    }
    Ok(())
}

fn check_search(search: &str) -> Result<(), EngineError> {
    if search.len() > MAX_SEARCH_LEN {
        return Err(EngineError::LimitExceeded("search string too long"));
    }
    Ok(())
}
