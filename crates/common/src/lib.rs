pub mod account;
pub mod booking;
pub mod catalog;
pub mod error;

pub use account::Account;
pub use booking::{Booking, BookingCreate, EnrichedBooking};
pub use catalog::{Branch, MenuItem, Restaurant};
pub use error::{Error, Result};
