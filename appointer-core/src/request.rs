//! The structured, possibly ambiguous appointment request.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DURATION_MINUTES, TIME_ZONE};
use crate::error::{BookingError, BookingResult};
use crate::time::localize;

/// Required meeting length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl MeetingDuration {
    pub const fn new(hours: u32, minutes: u32) -> Self {
        MeetingDuration { hours, minutes }
    }

    pub fn to_duration(self) -> Duration {
        Duration::hours(i64::from(self.hours)) + Duration::minutes(i64::from(self.minutes))
    }
}

impl Default for MeetingDuration {
    fn default() -> Self {
        MeetingDuration::new(0, DEFAULT_DURATION_MINUTES)
    }
}

/// A request as understood so far.
///
/// `flex_window_hours` is `None` until a day-part phrase supplies a window,
/// and `Some(0)` once an exact start time has been agreed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    pub date: Option<NaiveDate>,
    pub time_of_day: Option<NaiveTime>,
    pub duration: MeetingDuration,
    pub flex_window_hours: Option<u32>,
    /// Offset of the agreed start; picks the right instant inside a DST fold.
    #[serde(skip)]
    pub utc_offset: Option<FixedOffset>,
}

impl EventRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_well_defined(&self) -> bool {
        self.flex_window_hours == Some(0)
    }

    /// Exact start of a well-defined request.
    pub fn start(&self) -> BookingResult<DateTime<Tz>> {
        if !self.is_well_defined() {
            return Err(BookingError::UnderspecifiedRequest(format!(
                "no exact start time yet ({self})"
            )));
        }

        let (date, time) = self.anchor()?;

        if let Some(offset) = self.utc_offset {
            let local = date.and_time(time);
            if let Some(agreed) = local.and_local_timezone(offset).single() {
                let agreed = agreed.with_timezone(&TIME_ZONE);
                if agreed.naive_local() == local {
                    return Ok(agreed);
                }
            }
        }

        localize(date, time)
    }

    pub fn end(&self) -> BookingResult<DateTime<Tz>> {
        Ok(self.start()? + self.duration.to_duration())
    }

    /// The flexible window `[anchor, anchor + flex_window_hours]` to search.
    pub fn search_window(&self) -> BookingResult<(DateTime<Tz>, DateTime<Tz>)> {
        let (date, time) = self.anchor()?;
        let hours = self.flex_window_hours.ok_or_else(|| {
            BookingError::UnderspecifiedRequest("no time of day given".to_string())
        })?;

        let start = localize(date, time)?;
        Ok((start, start + Duration::hours(i64::from(hours))))
    }

    /// Agree on an exact start, making the request well-defined.
    pub fn fix_start(&mut self, start: &DateTime<Tz>) {
        self.date = Some(start.date_naive());
        self.time_of_day = Some(start.time());
        self.flex_window_hours = Some(0);
        self.utc_offset = Some(start.offset().fix());
    }

    fn anchor(&self) -> BookingResult<(NaiveDate, NaiveTime)> {
        match (self.date, self.time_of_day) {
            (Some(date), Some(time)) => Ok((date, time)),
            (None, Some(_)) => Err(BookingError::UnderspecifiedRequest(
                "no date given".to_string(),
            )),
            (Some(_), None) => Err(BookingError::UnderspecifiedRequest(
                "no time of day given".to_string(),
            )),
            (None, None) => Err(BookingError::UnderspecifiedRequest(
                "no date or time of day given".to_string(),
            )),
        }
    }
}

impl fmt::Display for EventRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        let time = self
            .time_of_day
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "?".to_string());
        let flex = self
            .flex_window_hours
            .map(|h| format!("{h}h"))
            .unwrap_or_else(|| "?".to_string());

        write!(
            f,
            "{date} - {time} - {flex} ({}h{:02}m)",
            self.duration.hours, self.duration.minutes
        )
    }
}
