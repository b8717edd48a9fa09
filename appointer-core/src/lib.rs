//! Core of appointer: turns a spoken appointment request into a booking.
//!
//! - `parse` / `phrase` turn request text into an `EventRequest`
//! - `slot` finds a free start time inside a flexible window
//! - `dialog` negotiates a proposed time with the caller
//! - `booking` ties these together with a `CalendarService` and an
//!   `InteractionChannel`
//! - `protocol` and `calendar::ProviderCalendar` talk to provider binaries

pub mod booking;
pub mod calendar;
pub mod channel;
pub mod config;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod parse;
pub mod phrase;
pub mod protocol;
pub mod request;
pub mod slot;
pub mod time;

pub use booking::{BookingOutcome, BookingPipeline, BookingSettings};
pub use error::{BookingError, BookingResult};
pub use request::{EventRequest, MeetingDuration};
