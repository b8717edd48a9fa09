//! Europe/Zurich localization helpers.
//!
//! The core only works with zone-aware instants. Naive wall-clock values are
//! mapped through `TIME_ZONE` and rejected when the mapping is not unique.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::TIME_ZONE;
use crate::error::{BookingError, BookingResult};

/// Combine a calendar date and a wall-clock time into a Zurich instant.
///
/// Times that fall into a DST gap (no instant) or fold (two instants) are
/// errors instead of being shifted silently.
pub fn localize(date: NaiveDate, time: NaiveTime) -> BookingResult<DateTime<Tz>> {
    let naive = date.and_time(time);

    match TIME_ZONE.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(a, b) => Err(BookingError::AmbiguousLocalTime(format!(
            "{naive} could be {} or {}",
            a.to_rfc3339(),
            b.to_rfc3339()
        ))),
        LocalResult::None => Err(BookingError::AmbiguousLocalTime(format!(
            "{naive} does not exist in {TIME_ZONE}"
        ))),
    }
}

/// Today's date as seen from Zurich.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&TIME_ZONE).date_naive()
}

/// Spoken 12-hour clock, e.g. "08:30 AM".
pub fn format_clock(dt: &DateTime<Tz>) -> String {
    dt.format("%I:%M %p").to_string()
}
