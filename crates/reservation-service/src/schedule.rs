//! Booking date/time interpretation
//!
//! Stored dates and times are plain strings. Anything that does not parse is
//! treated permissively: still cancellable, and sorted as the earliest moment.

use chrono::NaiveDateTime;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Scheduled moment of a booking in local wall-clock time
pub fn scheduled_at(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date.trim(), time.trim()), DATE_TIME_FORMAT).ok()
}

/// True when the scheduled moment is strictly after `now`, or unparseable
pub fn is_upcoming(date: &str, time: &str, now: NaiveDateTime) -> bool {
    scheduled_at(date, time).map_or(true, |at| at > now)
}

/// Ordering key for history views
pub fn sort_key(date: &str, time: &str) -> NaiveDateTime {
    scheduled_at(date, time).unwrap_or(NaiveDateTime::MIN)
}
