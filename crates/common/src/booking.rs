//! Booking records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to reserve tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub user_id: u64,
    pub restaurant_id: u64,
    pub branch_id: u64,

    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Clock time, `HH:MM`
    pub time: String,

    pub guests: u32,

    #[serde(default)]
    pub comment: String,

    pub floor: u32,

    /// Table labels such as `t-4`
    pub tables: Vec<String>,

    #[serde(default)]
    pub is_vip: bool,

    /// Pre-ordered menu item ids
    #[serde(default)]
    pub menu_items: Vec<u64>,

    /// Quantity per menu item id, keyed by the id as a decimal string
    #[serde(default)]
    pub menu_quantities: BTreeMap<String, u32>,
}

impl BookingCreate {
    /// Quantity requested for a menu item, 1 when unspecified
    pub fn quantity_of(&self, item_id: u64) -> u32 {
        quantity_of(&self.menu_quantities, item_id)
    }
}

/// A stored reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    pub user_id: u64,
    pub restaurant_id: u64,
    pub branch_id: u64,
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub comment: String,
    pub floor: u32,
    pub tables: Vec<String>,
    pub is_vip: bool,

    /// Always zero until discount rules exist
    pub discount: f64,

    /// Sum of known pre-ordered items, in tenge
    pub total_price: u64,

    pub menu_items: Vec<u64>,
    pub menu_quantities: BTreeMap<String, u32>,
}

impl Booking {
    /// Build a booking from a request and its computed total
    pub fn new(id: u64, request: BookingCreate, total_price: u64) -> Self {
        Self {
            id,
            user_id: request.user_id,
            restaurant_id: request.restaurant_id,
            branch_id: request.branch_id,
            date: request.date,
            time: request.time,
            guests: request.guests,
            comment: request.comment,
            floor: request.floor,
            tables: request.tables,
            is_vip: request.is_vip,
            discount: 0.0,
            total_price,
            menu_items: request.menu_items,
            menu_quantities: request.menu_quantities,
        }
    }

    pub fn quantity_of(&self, item_id: u64) -> u32 {
        quantity_of(&self.menu_quantities, item_id)
    }
}

fn quantity_of(quantities: &BTreeMap<String, u32>, item_id: u64) -> u32 {
    quantities.get(&item_id.to_string()).copied().unwrap_or(1)
}

/// Booking as shown in a user's history, with catalog labels resolved
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedBooking {
    #[serde(flatten)]
    pub booking: Booking,

    pub restaurant_name: String,
    pub branch_address: String,
    pub branch_district: String,

    /// Whether the scheduled moment is still ahead
    pub can_delete: bool,
}
