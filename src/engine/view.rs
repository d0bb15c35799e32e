use crate::model::*;

// ── Room view ────────────────────────────────────────────────────

/// Filter and order the catalog for display.
///
/// A room matches when the case-insensitive concatenation of its id and
/// type contains `search` as a substring; the empty string matches
/// everything. Without grouping the catalog order is kept untouched. With
/// grouping the rooms are stable-sorted by floor ascending, then id
/// (lexicographic) within a floor — stability is part of the contract so
/// future secondary attributes keep their relative order.
pub fn build_room_view<'a>(
    catalog: &'a [Room],
    search: &str,
    group_by_floor: bool,
) -> Vec<&'a Room> {
    let needle = search.to_lowercase();
    let mut rooms: Vec<&Room> = catalog
        .iter()
        .filter(|room| {
            format!("{}{}", room.id, room.kind)
                .to_lowercase()
                .contains(&needle)
        })
        .collect();

    if group_by_floor {
        // Vec::sort_by is stable.
        rooms.sort_by(|a, b| a.floor.cmp(&b.floor).then_with(|| a.id.cmp(&b.id)));
    }
    rooms
}

/// Expand a window into its column days, ascending.
pub fn build_date_columns(window: &DateWindow) -> Vec<Day> {
    window.days().collect()
}
