//! Conversions between Google Calendar events and appointer's wire types.

use anyhow::{Result, bail};
use appointer_core::calendar::{Appointment, ReminderMethod};
use appointer_core::constants::TIME_ZONE;
use appointer_core::protocol::BusyPeriod;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use google_calendar::types::{Event, EventAttendee, EventDateTime, EventReminder, Reminders};

/// Busy period for a Google event, or `None` if the event does not block time.
pub fn busy_period_from_google(event: &Event) -> Result<Option<BusyPeriod>> {
    if event.status == "cancelled" || event.transparency == "transparent" {
        return Ok(None);
    }

    let Some(start) = event.start.as_ref() else {
        bail!("Event '{}' has no start time", event.summary);
    };
    let Some(end) = event.end.as_ref() else {
        bail!("Event '{}' has no end time", event.summary);
    };

    Ok(Some(BusyPeriod {
        start: instant_from_google(start)?,
        end: instant_from_google(end)?,
        summary: event.summary.clone(),
    }))
}

/// All-day events are pinned to local midnight.
fn instant_from_google(time: &EventDateTime) -> Result<DateTime<FixedOffset>> {
    if let Some(dt) = time.date_time {
        return Ok(dt.with_timezone(&TIME_ZONE).fixed_offset());
    }

    match time.date {
        Some(date) => local_midnight(date),
        None => bail!("Event time has neither date nor dateTime"),
    }
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<FixedOffset>> {
    let midnight = date.and_time(NaiveTime::MIN);
    TIME_ZONE
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| anyhow::anyhow!("{} has no local midnight in {}", date, TIME_ZONE))
}

pub fn appointment_to_google(appointment: &Appointment) -> Event {
    let reminders = Reminders {
        overrides: appointment
            .reminders
            .iter()
            .map(|r| EventReminder {
                method: match r.method {
                    ReminderMethod::Email => "email".to_string(),
                    ReminderMethod::Popup => "popup".to_string(),
                },
                minutes: r.minutes,
            })
            .collect(),
        use_default: false,
    };

    let attendees = appointment
        .attendee_email
        .iter()
        .map(|email| EventAttendee {
            email: email.clone(),
            display_name: String::new(),
            response_status: "needsAction".to_string(),
            additional_guests: 0,
            comment: String::new(),
            id: String::new(),
            optional: false,
            organizer: false,
            resource: false,
            self_: false,
        })
        .collect();

    Event {
        summary: appointment.summary.clone(),
        description: appointment.description.clone(),
        location: appointment.location.clone(),
        start: Some(zoned_time(&appointment.start, &appointment.time_zone)),
        end: Some(zoned_time(&appointment.end, &appointment.time_zone)),
        reminders: Some(reminders),
        attendees,
        ..Default::default()
    }
}

fn zoned_time(dt: &DateTime<FixedOffset>, time_zone: &str) -> EventDateTime {
    EventDateTime {
        date: None,
        date_time: Some(dt.with_timezone(&Utc)),
        time_zone: time_zone.to_string(),
    }
}
