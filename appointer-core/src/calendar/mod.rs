//! The calendar the appointments are booked into.

mod provider;

pub use provider::ProviderCalendar;

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::TIME_ZONE;
use crate::error::BookingResult;
use crate::protocol::BusyPeriod;
use crate::slot::BusyInterval;

/// Read busy time and create appointments.
///
/// Implementations report failures as
/// [`crate::error::BookingError::CalendarService`] and never retry.
#[allow(async_fn_in_trait)]
pub trait CalendarService {
    /// Busy intervals overlapping `[from, to]`, sorted by start.
    async fn list_events(
        &self,
        from: &DateTime<Tz>,
        to: &DateTime<Tz>,
    ) -> BookingResult<Vec<BusyInterval>>;

    /// Create the appointment and return a link to it.
    async fn create_event(&self, appointment: &Appointment) -> BookingResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub method: ReminderMethod,
    /// Minutes before the appointment
    pub minutes: i64,
}

impl Reminder {
    /// Email a day ahead, pop up ten minutes before.
    pub fn defaults() -> Vec<Reminder> {
        vec![
            Reminder {
                method: ReminderMethod::Email,
                minutes: 24 * 60,
            },
            Reminder {
                method: ReminderMethod::Popup,
                minutes: 10,
            },
        ]
    }
}

/// An appointment ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// IANA zone the appointment is displayed in
    pub time_zone: String,
    pub reminders: Vec<Reminder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_email: Option<String>,
}

impl Appointment {
    pub fn new(
        title: &str,
        attendee: Option<&str>,
        location: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Self {
        let summary = match attendee {
            Some(name) => format!("{title} with {name}"),
            None => title.to_string(),
        };

        Appointment {
            description: summary.clone(),
            summary,
            location: location.to_string(),
            start: start.fixed_offset(),
            end: end.fixed_offset(),
            time_zone: TIME_ZONE.name().to_string(),
            reminders: Reminder::defaults(),
            attendee_email: None,
        }
    }

    pub fn with_attendee_email(mut self, email: Option<String>) -> Self {
        self.attendee_email = email;
        self
    }
}

impl From<BusyPeriod> for BusyInterval {
    fn from(period: BusyPeriod) -> Self {
        BusyInterval {
            start: period.start.with_timezone(&TIME_ZONE),
            end: period.end.with_timezone(&TIME_ZONE),
            summary: period.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(hour: u32) -> DateTime<Tz> {
        TIME_ZONE.with_ymd_and_hms(2025, 3, 21, hour, 0, 0).unwrap()
    }

    #[test]
    fn appointment_with_attendee() {
        let appointment = Appointment::new("Medical Appointment", Some("Alex"), "Office", &at(8), &at(9));

        assert_eq!(appointment.summary, "Medical Appointment with Alex");
        assert_eq!(appointment.description, "Medical Appointment with Alex");
        assert_eq!(appointment.time_zone, "Europe/Zurich");
        assert_eq!(appointment.start.to_rfc3339(), "2025-03-21T08:00:00+01:00");
        assert_eq!(appointment.attendee_email, None);
        assert_eq!(
            appointment.reminders,
            vec![
                Reminder { method: ReminderMethod::Email, minutes: 1440 },
                Reminder { method: ReminderMethod::Popup, minutes: 10 },
            ]
        );
    }

    #[test]
    fn appointment_without_attendee() {
        let appointment = Appointment::new("Medical Appointment", None, "Office", &at(8), &at(9))
            .with_attendee_email(Some("alex@example.com".to_string()));

        assert_eq!(appointment.summary, "Medical Appointment");
        assert_eq!(appointment.attendee_email.as_deref(), Some("alex@example.com"));
    }

    #[test]
    fn busy_period_is_localized_to_zurich() {
        let period = BusyPeriod {
            start: DateTime::parse_from_rfc3339("2025-03-21T08:00:00Z").unwrap(),
            end: DateTime::parse_from_rfc3339("2025-03-21T08:30:00Z").unwrap(),
            summary: "Checkup".to_string(),
        };

        let interval = BusyInterval::from(period);

        assert_eq!(interval.start.hour(), 9);
        assert_eq!(interval.start, at(9));
        assert_eq!(interval.summary, "Checkup");
    }
}
