//! Booking Ledger: creation, pricing, history and cancellation

use crate::catalog::Catalog;
use crate::schedule;
use chrono::NaiveDateTime;
use reserve_common::{Booking, BookingCreate, EnrichedBooking, Error, Restaurant, Result};
use tracing::{debug, info};

const UNKNOWN: &str = "Unknown";

/// Ordered collection of all active bookings
#[derive(Debug)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    next_id: u64,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            next_id: 1,
        }
    }

    /// Price and append a booking
    ///
    /// Missing restaurants or branches do not fail the request; the raw ids
    /// are recorded as given. A pre-order whose total does not fit in `u64`
    /// is rejected before an id is assigned.
    pub fn create(&mut self, request: BookingCreate, catalog: &Catalog) -> Result<Booking> {
        let restaurant = catalog.get(request.restaurant_id);
        let total_price = price_selection(restaurant, &request)?;

        let id = self.next_id;
        self.next_id += 1;

        let booking = Booking::new(id, request, total_price);
        self.bookings.push(booking.clone());

        info!(
            "Created booking {} for user {} at restaurant {} (total {})",
            booking.id, booking.user_id, booking.restaurant_id, booking.total_price
        );
        Ok(booking)
    }

    /// All bookings in insertion order
    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    /// A user's bookings with catalog labels, newest scheduled first
    pub fn list_for_user(
        &self,
        account_id: u64,
        catalog: &Catalog,
        now: NaiveDateTime,
    ) -> Vec<EnrichedBooking> {
        let mut history: Vec<EnrichedBooking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == account_id)
            .map(|b| enrich(b, catalog, now))
            .collect();

        history.sort_by(|a, b| {
            let a = schedule::sort_key(&a.booking.date, &a.booking.time);
            let b = schedule::sort_key(&b.booking.date, &b.booking.time);
            b.cmp(&a)
        });
        history
    }

    /// Remove a booking on behalf of its owner while it is still ahead
    pub fn cancel(
        &mut self,
        booking_id: u64,
        requesting_account_id: u64,
        now: NaiveDateTime,
    ) -> Result<Booking> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or_else(|| Error::NotFound("Booking".to_string()))?;

        let booking = &self.bookings[index];
        if booking.user_id != requesting_account_id {
            debug!(
                "User {} tried to cancel booking {} owned by {}",
                requesting_account_id, booking_id, booking.user_id
            );
            return Err(Error::Forbidden(
                "booking belongs to another user".to_string(),
            ));
        }
        if !schedule::is_upcoming(&booking.date, &booking.time, now) {
            return Err(Error::InvalidState(
                "cannot cancel a past booking".to_string(),
            ));
        }

        let removed = self.bookings.remove(index);
        info!("Cancelled booking {} for user {}", removed.id, removed.user_id);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// Sum of unit price times quantity over items present in the menu
pub fn price_selection(restaurant: Option<&Restaurant>, request: &BookingCreate) -> Result<u64> {
    let Some(restaurant) = restaurant else {
        return Ok(0);
    };

    request
        .menu_items
        .iter()
        .filter_map(|id| restaurant.menu_item(*id))
        .try_fold(0u64, |total, item| {
            item.line_total(request.quantity_of(item.id))
                .and_then(|line| total.checked_add(line))
        })
        .ok_or_else(|| Error::InvalidInput("pre-order total is too large".to_string()))
}

fn enrich(booking: &Booking, catalog: &Catalog, now: NaiveDateTime) -> EnrichedBooking {
    let (restaurant, branch) = catalog.locate(booking.restaurant_id, booking.branch_id);

    EnrichedBooking {
        booking: booking.clone(),
        restaurant_name: restaurant.map_or(UNKNOWN, |r| r.name.as_str()).to_string(),
        branch_address: branch.map_or(UNKNOWN, |b| b.address.as_str()).to_string(),
        branch_district: branch.map_or(UNKNOWN, |b| b.district.as_str()).to_string(),
        can_delete: schedule::is_upcoming(&booking.date, &booking.time, now),
    }
}
