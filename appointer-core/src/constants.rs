use chrono_tz::Tz;

/// Every instant produced for display or booking is localized here.
pub const TIME_ZONE: Tz = chrono_tz::Europe::Zurich;

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

pub const DEFAULT_PROVIDER: &str = "google";

pub const DEFAULT_LOCATION: &str = "Route de praz Veguey";

pub const APPOINTMENT_TITLE: &str = "Medical Appointment";

/// Upper bound on busy intervals fetched for one search window.
pub const MAX_BUSY_RESULTS: u32 = 100;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;
