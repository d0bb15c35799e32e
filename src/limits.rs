//! Hard limits guarding queries, seed data, and the wire protocol.

/// Widest date window a single query may resolve.
pub const MAX_WINDOW_DAYS: i64 = 366;

/// Longest accepted search string.
pub const MAX_SEARCH_LEN: usize = 256;

/// Catalog size cap per property.
pub const MAX_ROOMS_PER_PROPERTY: usize = 10_000;

/// Booking cap per room.
pub const MAX_BOOKINGS_PER_ROOM: usize = 10_000;

/// Longest accepted property name.
pub const MAX_PROPERTY_NAME_LEN: usize = 256;

/// Number of properties a single process will hold engines for.
pub const MAX_PROPERTIES: usize = 1024;

/// Longest accepted request line on the wire.
pub const MAX_LINE_LEN: usize = 64 * 1024;
