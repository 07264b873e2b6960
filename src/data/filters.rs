//! Flight and reservation filtering, and pagination
//!
//! Pure functions over in-memory record lists. Nothing here keeps state, so
//! the same inputs always produce the same outputs.

use super::{Flight, Reservation};

/// Number of rows shown per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Criteria for narrowing the flight list
///
/// An empty field places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilters {
    /// Case-insensitive substring of the flight number
    pub search_term: String,
    /// Case-insensitive substring of the status
    pub status: String,
    /// Exact departure date
    pub date: String,
    /// Case-insensitive substring of the aircraft
    pub aircraft: String,
}

impl FlightFilters {
    /// Returns true if any criterion is set
    pub fn is_active(&self) -> bool {
        !(self.search_term.is_empty()
            && self.status.is_empty()
            && self.date.is_empty()
            && self.aircraft.is_empty())
    }

    /// Removes every criterion
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true if `flight` satisfies every non-empty criterion
    pub fn matches(&self, flight: &Flight) -> bool {
        contains_ignore_case(&flight.flight_number, &self.search_term)
            && contains_ignore_case(&flight.status, &self.status)
            && (self.date.is_empty() || flight.departure_date == self.date)
            && contains_ignore_case(&flight.aircraft, &self.aircraft)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keeps the flights matching `filters`, preserving input order
pub fn filter_flights(flights: &[Flight], filters: &FlightFilters) -> Vec<Flight> {
    flights
        .iter()
        .filter(|flight| filters.matches(flight))
        .cloned()
        .collect()
}

/// Keeps the reservations whose status contains `status`, ignoring case
///
/// An empty `status` keeps every reservation.
pub fn filter_reservations_by_status(
    reservations: &[Reservation],
    status: &str,
) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|reservation| contains_ignore_case(&reservation.status, status))
        .cloned()
        .collect()
}

/// Returns page `page` (1-indexed) of `items`
///
/// Pages past the end, page 0, and a zero page size all yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &items[..0];
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &items[..0];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `item_count` items
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}
